//! Food placement under board, snake and separation constraints.

use std::ops::RangeInclusive;

use bevy::prelude::*;
use rand::Rng;

use super::FoodItem;
use crate::game::{Board, EngineConfig, FoodCategory, Position};

/// Cells a new item must keep clear of.
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    pub snake: Vec<Position>,
    /// Revealed items already on the board. Hidden items never block.
    pub revealed: Vec<Position>,
}

/// Picks random cells for food with a bounded number of attempts.
#[derive(Debug, Clone)]
pub struct SpawnPlanner {
    board: Board,
    food_scale: f32,
    min_separation_sq: i64,
    max_attempts: u32,
}

impl SpawnPlanner {
    pub fn new(board: Board, config: &EngineConfig) -> Self {
        let separation = i64::from(config.min_food_separation_cells * board.cell_size);
        SpawnPlanner {
            board,
            food_scale: config.food_scale,
            min_separation_sq: separation * separation,
            max_attempts: config.max_spawn_attempts,
        }
    }

    /// Column and row indices where the scaled sprite stays fully on the canvas.
    pub fn cell_ranges(&self) -> Option<(RangeInclusive<i32>, RangeInclusive<i32>)> {
        let cell = self.board.cell_size as f32;
        let drawn = cell * self.food_scale;
        let offset = (drawn - cell) / 2.0;
        let first = (offset / cell).ceil() as i32;
        let last_x = ((self.board.width as f32 - drawn + offset) / cell).floor() as i32;
        let last_y = ((self.board.height as f32 - drawn + offset) / cell).floor() as i32;
        if last_x < first || last_y < first {
            return None;
        }
        Some((first..=last_x, first..=last_y))
    }

    /// Tries to place one item of `category`.
    ///
    /// Returns `None` once the attempt budget is spent; callers fall back.
    pub fn place_one<R: Rng>(
        &self,
        rng: &mut R,
        category: FoodCategory,
        occupancy: &Occupancy,
        batch: &[FoodItem],
    ) -> Option<FoodItem> {
        let (columns, rows) = self.cell_ranges()?;
        for _ in 0..self.max_attempts {
            let candidate = Position::new(
                rng.random_range(columns.clone()) * self.board.cell_size,
                rng.random_range(rows.clone()) * self.board.cell_size,
            );
            if !self.is_blocked(candidate, occupancy, batch) {
                return Some(FoodItem::hidden(candidate, category));
            }
        }
        debug!(
            "no free cell for {} after {} attempts",
            category, self.max_attempts
        );
        None
    }

    /// True when `pos` is taken by the snake or too close to other food.
    pub fn is_blocked(&self, pos: Position, occupancy: &Occupancy, batch: &[FoodItem]) -> bool {
        if occupancy.snake.iter().any(|s| s.collides_with(&pos)) {
            return true;
        }
        let others = occupancy
            .revealed
            .iter()
            .chain(batch.iter().map(|item| &item.position));
        for other in others {
            if other.collides_with(&pos) || pos.distance_squared(other) < self.min_separation_sq {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn planner() -> SpawnPlanner {
        let config = EngineConfig::default();
        SpawnPlanner::new(config.board().unwrap(), &config)
    }

    #[test]
    fn keeps_oversized_sprite_on_canvas() {
        let (columns, rows) = planner().cell_ranges().unwrap();
        assert_eq!(columns, 1..=17);
        assert_eq!(rows, 1..=17);
    }

    #[test]
    fn tiny_board_has_no_candidates() {
        let config = EngineConfig {
            canvas_width: 30,
            canvas_height: 30,
            ..EngineConfig::default()
        };
        let planner = SpawnPlanner::new(config.board().unwrap(), &config);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(planner.cell_ranges().is_none());
        assert!(
            planner
                .place_one(&mut rng, FoodCategory::Papel, &Occupancy::default(), &[])
                .is_none()
        );
    }

    #[test]
    fn separation_uses_strict_radius() {
        let planner = planner();
        let occupancy = Occupancy {
            snake: vec![],
            revealed: vec![Position::new(150, 150)],
        };
        // 60px away is inside the 90px radius, 90px away is not.
        assert!(planner.is_blocked(Position::new(210, 150), &occupancy, &[]));
        assert!(!planner.is_blocked(Position::new(240, 150), &occupancy, &[]));
        assert!(planner.is_blocked(Position::new(150, 150), &occupancy, &[]));
    }

    #[test]
    fn fully_packed_board_exhausts_attempts() {
        let planner = planner();
        let (columns, rows) = planner.cell_ranges().unwrap();
        let mut snake = Vec::new();
        for cx in columns {
            for cy in rows.clone() {
                snake.push(Position::new(cx * 30, cy * 30));
            }
        }
        let occupancy = Occupancy {
            snake,
            revealed: vec![],
        };
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!(
            planner
                .place_one(&mut rng, FoodCategory::Metal, &occupancy, &[])
                .is_none()
        );
    }

    #[test]
    fn random_boards_never_violate_constraints() {
        let planner = planner();
        let board = EngineConfig::default().board().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
        let random_cell = |rng: &mut ChaCha8Rng| {
            Position::new(
                rng.random_range(0..board.columns()) * board.cell_size,
                rng.random_range(0..board.rows()) * board.cell_size,
            )
        };

        for _ in 0..1000 {
            let snake_len = rng.random_range(1..120);
            let snake: Vec<Position> = (0..snake_len).map(|_| random_cell(&mut rng)).collect();
            let revealed: Vec<Position> = (0..rng.random_range(0..4))
                .map(|_| random_cell(&mut rng))
                .collect();
            let batch: Vec<FoodItem> = (0..rng.random_range(0..3))
                .map(|_| FoodItem::hidden(random_cell(&mut rng), FoodCategory::Vidro))
                .collect();
            let occupancy = Occupancy { snake, revealed };

            let Some(item) = planner.place_one(&mut rng, FoodCategory::Papel, &occupancy, &batch)
            else {
                continue;
            };
            assert!(!occupancy.snake.contains(&item.position));
            for other in occupancy
                .revealed
                .iter()
                .chain(batch.iter().map(|b| &b.position))
            {
                assert!(item.position.distance_squared(other) >= 90 * 90);
            }
            assert!(!item.is_revealed);
        }
    }
}
