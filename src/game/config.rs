//! Engine configuration and board geometry.

use std::time::Duration;

use super::{
    CANVAS_HEIGHT, CANVAS_WIDTH, CELL_SIZE, ConfigError, FOOD_APPEAR_DURATION, FOOD_REVEAL_INTERVAL,
    FOOD_SCALE, INITIAL_SNAKE_POSITION, INITIAL_TICK_INTERVAL, MAX_FOOD_SLOTS, MAX_SPAWN_ATTEMPTS,
    MIN_FOOD_SEPARATION_CELLS, POINTS_PER_LEVEL, Position, TICK_INTERVAL_FLOOR, TICK_INTERVAL_STEP,
};

/// Tunables for one engine instance. `Default` is the built-in game.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub cell_size: i32,
    pub food_scale: f32,
    pub min_food_separation_cells: i32,
    pub max_spawn_attempts: u32,
    pub max_food_slots: usize,
    pub reveal_interval: Duration,
    pub appear_duration: Duration,
    pub initial_tick_interval: Duration,
    pub tick_interval_floor: Duration,
    pub tick_interval_step: Duration,
    pub points_per_level: u32,
    pub start_position: Position,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            cell_size: CELL_SIZE,
            food_scale: FOOD_SCALE,
            min_food_separation_cells: MIN_FOOD_SEPARATION_CELLS,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,
            max_food_slots: MAX_FOOD_SLOTS,
            reveal_interval: FOOD_REVEAL_INTERVAL,
            appear_duration: FOOD_APPEAR_DURATION,
            initial_tick_interval: INITIAL_TICK_INTERVAL,
            tick_interval_floor: TICK_INTERVAL_FLOOR,
            tick_interval_step: TICK_INTERVAL_STEP,
            points_per_level: POINTS_PER_LEVEL,
            start_position: INITIAL_SNAKE_POSITION,
        }
    }
}

impl EngineConfig {
    /// Validates the geometry and snaps the canvas down to whole cells.
    pub fn board(&self) -> Result<Board, ConfigError> {
        if self.cell_size <= 0 {
            return Err(ConfigError::NonPositiveCell(self.cell_size));
        }
        if self.food_scale < 1.0 {
            return Err(ConfigError::FoodScaleTooSmall(self.food_scale));
        }
        let cell = self.cell_size as u32;
        let width = self.canvas_width / cell * cell;
        let height = self.canvas_height / cell * cell;
        if width == 0 || height == 0 {
            return Err(ConfigError::CanvasTooSmall {
                width: self.canvas_width,
                height: self.canvas_height,
                cell: self.cell_size,
            });
        }
        Ok(Board {
            width: width as i32,
            height: height as i32,
            cell_size: self.cell_size,
        })
    }

    /// Food items on screen for a given level.
    pub fn food_slots(&self, level: u32) -> usize {
        if level <= 1 {
            1
        } else {
            (level as usize)
                .min(super::FoodCategory::COUNT)
                .min(self.max_food_slots)
        }
    }
}

/// Playable area in pixels, always a whole number of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl Board {
    /// True when the whole cell starting at `pos` lies on the board.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.x + self.cell_size <= self.width
            && pos.y + self.cell_size <= self.height
    }

    #[cfg(test)]
    pub fn columns(&self) -> i32 {
        self.width / self.cell_size
    }

    #[cfg(test)]
    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }
}
