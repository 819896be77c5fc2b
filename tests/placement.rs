//! Placement and layout properties over many seeded boards.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use recycle_snake::food::{Occupancy, SpawnPlanner};
use recycle_snake::game::{EngineConfig, FoodCategory, Position};
use recycle_snake::level::compose_layout;

fn planner() -> (SpawnPlanner, i32) {
    let config = EngineConfig::default();
    let board = config.board().unwrap();
    (SpawnPlanner::new(board, &config), board.cell_size)
}

fn random_snake(rng: &mut ChaCha8Rng, cell: i32) -> Vec<Position> {
    let len = rng.random_range(1..40);
    (0..len)
        .map(|_| {
            Position::new(
                rng.random_range(0..19) * cell,
                rng.random_range(0..19) * cell,
            )
        })
        .collect()
}

#[test]
fn layouts_hold_exactly_one_target_and_keep_their_distance() {
    let (planner, cell) = planner();
    let min_sq = i64::from(3 * cell) * i64::from(3 * cell);
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    for round in 0..300 {
        let snake = random_snake(&mut rng, cell);
        let occupancy = Occupancy {
            snake: snake.clone(),
            revealed: Vec::new(),
        };
        let target = FoodCategory::ALL[round % FoodCategory::COUNT];
        let slots = 1 + round % 5;
        let layout = compose_layout(&planner, &mut rng, slots, target, &occupancy).unwrap();

        assert_eq!(layout.target_count(), 1, "round {round}");
        assert!(layout.items.len() <= slots);
        for (i, item) in layout.items.iter().enumerate() {
            assert!(!snake.contains(&item.position), "round {round}");
            for other in &layout.items[i + 1..] {
                assert!(item.position.distance_squared(&other.position) >= min_sq);
            }
        }
    }
}

#[test]
fn single_items_avoid_revealed_food() {
    let (planner, cell) = planner();
    let min_sq = i64::from(3 * cell) * i64::from(3 * cell);
    let mut rng = ChaCha8Rng::seed_from_u64(77);

    for _ in 0..1000 {
        let snake = random_snake(&mut rng, cell);
        let revealed = vec![Position::new(
            rng.random_range(1..=17) * cell,
            rng.random_range(1..=17) * cell,
        )];
        let occupancy = Occupancy {
            snake: snake.clone(),
            revealed: revealed.clone(),
        };
        if let Some(item) = planner.place_one(&mut rng, FoodCategory::Metal, &occupancy, &[]) {
            assert!(!snake.contains(&item.position));
            assert!(item.position.distance_squared(&revealed[0]) >= min_sq);
            assert!(!item.is_revealed);
        }
    }
}
