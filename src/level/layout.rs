//! Composition of a food layout with exactly one item of the target category.

use bevy::prelude::*;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::food::{FoodItem, Occupancy, SpawnPlanner};
use crate::game::{FoodCategory, GameOverCause};

/// A freshly placed batch and the target it was built around.
///
/// The target can differ from the requested one when the board forced a substitution.
#[derive(Debug, Clone)]
pub struct Layout {
    pub items: Vec<FoodItem>,
    pub target: FoodCategory,
}

impl Layout {
    pub fn target_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.category == self.target)
            .count()
    }
}

/// Places `slots` items: the target first, then distinct other categories.
///
/// Degrades step by step when the board is too crowded:
/// 1. the target alone on a cleared board,
/// 2. the first category that fits, scanning from a random start, adopted as the new target,
/// 3. `PlacementExhausted` when nothing fits at all.
pub fn compose_layout<R: Rng>(
    planner: &SpawnPlanner,
    rng: &mut R,
    slots: usize,
    target: FoodCategory,
    occupancy: &Occupancy,
) -> Result<Layout, GameOverCause> {
    let mut batch: Vec<FoodItem> = Vec::with_capacity(slots);
    if let Some(item) = planner.place_one(rng, target, occupancy, &batch) {
        batch.push(item);
    }

    let mut others: Vec<FoodCategory> = FoodCategory::ALL
        .iter()
        .copied()
        .filter(|category| *category != target)
        .collect();
    let repeats = others.clone();
    let remaining = slots.saturating_sub(batch.len());
    for _ in 0..remaining {
        let category = if others.is_empty() {
            match repeats.choose(rng) {
                Some(category) => *category,
                None => break,
            }
        } else {
            let index = rng.random_range(0..others.len());
            others.swap_remove(index)
        };
        if let Some(item) = planner.place_one(rng, category, occupancy, &batch) {
            batch.push(item);
        }
    }

    if batch.iter().any(|item| item.category == target) {
        return Ok(Layout {
            items: batch,
            target,
        });
    }

    warn!("target {} did not fit, clearing the board", target);
    let cleared = Occupancy {
        snake: occupancy.snake.clone(),
        revealed: Vec::new(),
    };
    if let Some(item) = planner.place_one(rng, target, &cleared, &[]) {
        return Ok(Layout {
            items: vec![item],
            target,
        });
    }

    let offset = rng.random_range(0..FoodCategory::COUNT);
    for i in 0..FoodCategory::COUNT {
        let category = FoodCategory::ALL[(offset + i) % FoodCategory::COUNT];
        if let Some(item) = planner.place_one(rng, category, &cleared, &[]) {
            warn!("adopting {} as target, {} cannot be placed", category, target);
            return Ok(Layout {
                items: vec![item],
                target: category,
            });
        }
    }

    error!("no category can be placed on the board");
    Err(GameOverCause::PlacementExhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{EngineConfig, Position};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn planner() -> SpawnPlanner {
        let config = EngineConfig::default();
        SpawnPlanner::new(config.board().unwrap(), &config)
    }

    fn snake_only(cells: Vec<Position>) -> Occupancy {
        Occupancy {
            snake: cells,
            revealed: Vec::new(),
        }
    }

    #[test]
    fn exactly_one_target_in_every_layout() {
        let planner = planner();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for slots in 1..=5 {
            for target in FoodCategory::ALL {
                let layout = compose_layout(
                    &planner,
                    &mut rng,
                    slots,
                    target,
                    &snake_only(vec![Position::new(150, 150)]),
                )
                .unwrap();
                assert_eq!(layout.target, target);
                assert_eq!(layout.target_count(), 1);
                assert!(layout.items.len() <= slots);
                assert!(layout.items.iter().all(|item| !item.is_revealed));
            }
        }
    }

    #[test]
    fn other_categories_are_distinct() {
        let planner = planner();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let layout = compose_layout(
            &planner,
            &mut rng,
            5,
            FoodCategory::Vidro,
            &Occupancy::default(),
        )
        .unwrap();
        assert_eq!(layout.items.len(), 5);
        for category in FoodCategory::ALL {
            assert_eq!(
                layout
                    .items
                    .iter()
                    .filter(|item| item.category == category)
                    .count(),
                1
            );
        }
    }

    #[test]
    fn crowded_board_falls_back_to_lone_target() {
        let planner = planner();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        // Every candidate cell is blocked by stale revealed food, which the fallback clears.
        let (columns, rows) = planner.cell_ranges().unwrap();
        let mut revealed = Vec::new();
        for cx in columns.step_by(2) {
            for cy in rows.clone().step_by(2) {
                revealed.push(Position::new(cx * 30, cy * 30));
            }
        }
        let occupancy = Occupancy {
            snake: vec![Position::new(0, 0)],
            revealed,
        };
        let layout =
            compose_layout(&planner, &mut rng, 3, FoodCategory::Metal, &occupancy).unwrap();
        assert_eq!(layout.items.len(), 1);
        assert_eq!(layout.target, FoodCategory::Metal);
    }

    #[test]
    fn single_free_cell_may_switch_the_target() {
        let planner = planner();
        let free = Position::new(270, 270);
        let (columns, rows) = planner.cell_ranges().unwrap();
        let mut cells = Vec::new();
        for cx in columns {
            for cy in rows.clone() {
                let cell = Position::new(cx * 30, cy * 30);
                if cell != free {
                    cells.push(cell);
                }
            }
        }
        let occupancy = snake_only(cells);

        let mut switched = 0;
        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let layout =
                compose_layout(&planner, &mut rng, 1, FoodCategory::Papel, &occupancy).unwrap();
            assert_eq!(layout.items.len(), 1);
            assert_eq!(layout.items[0].position, free);
            assert_eq!(layout.target_count(), 1);
            if layout.target != FoodCategory::Papel {
                switched += 1;
            }
        }
        assert!(switched > 0);
    }

    #[test]
    fn full_board_is_exhausted() {
        let planner = planner();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let (columns, rows) = planner.cell_ranges().unwrap();
        let mut cells = Vec::new();
        for cx in columns {
            for cy in rows.clone() {
                cells.push(Position::new(cx * 30, cy * 30));
            }
        }
        let result = compose_layout(
            &planner,
            &mut rng,
            2,
            FoodCategory::Papel,
            &snake_only(cells),
        );
        assert!(matches!(result, Err(GameOverCause::PlacementExhausted)));
    }
}
