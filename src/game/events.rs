//! Game events (messages) the engine hands to the UI shell.

use bevy::prelude::*;

use super::CategoryCount;

/// Raised by the engine at most once per kind per tick.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    ScoreChanged(u32),
    LevelChanged(u32),
    GameOver {
        final_score: u32,
        stats: Vec<CategoryCount>,
    },
    LevelComplete {
        stats: Vec<CategoryCount>,
    },
}
