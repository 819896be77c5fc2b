//! Terminal game events and configuration errors.

use thiserror::Error;

use super::FoodCategory;

/// Why a move could not be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Collision {
    #[error("snake head left the board")]
    OutOfBounds,
    #[error("snake head ran into its own body")]
    SelfCollision,
}

/// Why a run ended. These are expected game outcomes, not faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameOverCause {
    #[error(transparent)]
    Collision(#[from] Collision),
    #[error("ate {eaten} while the target was {target}")]
    WrongCategoryEaten {
        eaten: FoodCategory,
        target: FoodCategory,
    },
    #[error("no food could be placed on the board")]
    PlacementExhausted,
}

/// Invalid board geometry in an [`EngineConfig`](super::EngineConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("cell size must be positive, got {0}")]
    NonPositiveCell(i32),
    #[error("canvas {width}x{height} cannot hold a single {cell}px cell")]
    CanvasTooSmall { width: u32, height: u32, cell: i32 },
    #[error("food scale must be at least 1.0, got {0}")]
    FoodScaleTooSmall(f32),
}
