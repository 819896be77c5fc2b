//! Score, level and phase bookkeeping for one run.

mod layout;

use bevy::prelude::*;

pub use layout::{Layout, compose_layout};

use crate::game::{CategoryCount, FoodCategory, GameOverCause, GamePhase, PickupTally};

/// What a correct pickup led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupOutcome {
    /// Keep playing the current level.
    Continue,
    /// The level quota was met; `level` is the one now unlocked.
    LevelComplete { level: u32 },
}

/// Level state machine: `Running` -> `LevelComplete` -> `Running` ..., `Running` -> `GameOver`.
#[derive(Debug, Clone)]
pub struct LevelProgress {
    phase: GamePhase,
    score: u32,
    points_this_level: u32,
    level: u32,
    points_per_level: u32,
    tally: PickupTally,
    cause: Option<GameOverCause>,
}

impl LevelProgress {
    pub fn new(points_per_level: u32) -> Self {
        LevelProgress {
            phase: GamePhase::Running,
            score: 0,
            points_this_level: 0,
            level: 1,
            points_per_level: points_per_level.max(1),
            tally: PickupTally::default(),
            cause: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn points_this_level(&self) -> u32 {
        self.points_this_level
    }

    #[cfg(test)]
    pub fn tally(&self) -> &PickupTally {
        &self.tally
    }

    pub fn stats(&self) -> Vec<CategoryCount> {
        self.tally.stats()
    }

    /// Why the run ended, once it has.
    pub fn game_over_cause(&self) -> Option<&GameOverCause> {
        self.cause.as_ref()
    }

    /// Credits a correct pickup. Ignored unless running.
    pub fn record_pickup(&mut self, category: FoodCategory) -> Option<PickupOutcome> {
        if !self.is_running() {
            return None;
        }
        self.score += 1;
        self.points_this_level += 1;
        self.tally.record(category);

        if self.points_this_level >= self.points_per_level {
            self.level += 1;
            self.phase = GamePhase::LevelComplete;
            info!("level {} complete, score {}", self.level - 1, self.score);
            return Some(PickupOutcome::LevelComplete { level: self.level });
        }
        Some(PickupOutcome::Continue)
    }

    /// Ends the run. Returns false when it had already ended.
    pub fn fail(&mut self, cause: GameOverCause) -> bool {
        if self.phase == GamePhase::GameOver {
            return false;
        }
        info!("game over: {}, final score {}", cause, self.score);
        self.phase = GamePhase::GameOver;
        self.cause = Some(cause);
        true
    }

    /// Leaves the level-complete screen. Only valid from `LevelComplete`.
    pub fn continue_level(&mut self) -> bool {
        if self.phase != GamePhase::LevelComplete {
            return false;
        }
        self.points_this_level = 0;
        self.phase = GamePhase::Running;
        true
    }
}
