//! Game constants for board geometry, timing, speed ramp, colors, and rendering layers.

use bevy::prelude::*;
use std::time::Duration;

use super::Position;

// Board geometry (pixels)
pub const CANVAS_WIDTH: u32 = 580;
pub const CANVAS_HEIGHT: u32 = 580;
pub const CELL_SIZE: i32 = 30;

// Food sprites are drawn larger than a cell and must stay on the canvas
pub const FOOD_SCALE: f32 = 1.3;
pub const MIN_FOOD_SEPARATION_CELLS: i32 = 3;
pub const MAX_SPAWN_ATTEMPTS: u32 = 100;
pub const MAX_FOOD_SLOTS: usize = 5;

// Reveal cascade
pub const FOOD_REVEAL_INTERVAL: Duration = Duration::from_millis(150);
pub const FOOD_APPEAR_DURATION: Duration = Duration::from_millis(200);

// Speed ramp
pub const INITIAL_TICK_INTERVAL: Duration = Duration::from_millis(150);
pub const TICK_INTERVAL_FLOOR: Duration = Duration::from_millis(50);
pub const TICK_INTERVAL_STEP: Duration = Duration::from_millis(2);

// Level progression
pub const POINTS_PER_LEVEL: u32 = 5;

// Initial positions
pub const INITIAL_SNAKE_POSITION: Position = Position { x: 150, y: 150 };

// Colors
pub const ARENA_COLOR: Color = Color::srgba(0.93, 0.95, 0.91, 1.0);
pub const ARENA_BORDER_COLOR: Color = Color::srgba(0.16, 0.35, 0.06, 1.0);
pub const BACKGROUND_COLOR: Color = Color::srgba(0.04, 0.04, 0.04, 1.0);

// Z-index constants for rendering layers
pub const Z_BACKGROUND: f32 = 0.0;
pub const Z_FOOD: f32 = 1.0;
pub const Z_SNAKE: f32 = 2.0;
