//! Food plugin - food items, the on-board food set, and its staggered reveal.

mod assets;
mod spawn;

use std::time::Duration;

use bevy::prelude::*;

pub use assets::{AssetGate, FoodSprites, SpriteState};
pub use spawn::{Occupancy, SpawnPlanner};

use crate::game::{FoodCategory, Position};

/// Plugin for food-related systems.
pub struct FoodPlugin;

impl Plugin for FoodPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FoodSprites>()
            .add_systems(Startup, assets::load_food_sprites)
            .add_systems(Update, assets::track_sprite_loading);
    }
}

/// A placed item. Hidden items can neither be eaten nor block placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodItem {
    pub position: Position,
    pub category: FoodCategory,
    pub is_revealed: bool,
    /// When the item becomes visible; `None` until a reveal is scheduled.
    pub reveal_at: Option<Duration>,
    /// Start of the appear animation; cleared once it has played.
    pub reveal_started_at: Option<Duration>,
}

impl FoodItem {
    pub fn hidden(position: Position, category: FoodCategory) -> Self {
        FoodItem {
            position,
            category,
            is_revealed: false,
            reveal_at: None,
            reveal_started_at: None,
        }
    }

    /// Appear-animation progress in `0.0..=1.0`; 1.0 once steady.
    pub fn appear_progress(&self, now: Duration, appear_duration: Duration) -> f32 {
        match self.reveal_started_at {
            Some(started) if !appear_duration.is_zero() => {
                let elapsed = now.saturating_sub(started);
                (elapsed.as_secs_f32() / appear_duration.as_secs_f32()).min(1.0)
            }
            _ => 1.0,
        }
    }
}

/// Food currently on the board: one slot in level 1, several afterwards.
#[derive(Debug, Clone, Default)]
pub struct FoodSet {
    items: Vec<FoodItem>,
}

impl FoodSet {
    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn revealed(&self) -> impl Iterator<Item = &FoodItem> {
        self.items.iter().filter(|item| item.is_revealed)
    }

    pub fn count_of(&self, category: FoodCategory) -> usize {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .count()
    }

    /// Swaps in a new batch and staggers its reveal: item `i` shows at `now + i * interval`.
    pub fn replace(&mut self, batch: Vec<FoodItem>, now: Duration, interval: Duration) {
        self.items = batch;
        for (i, item) in self.items.iter_mut().enumerate() {
            item.is_revealed = false;
            item.reveal_started_at = None;
            item.reveal_at = Some(now + interval * i as u32);
        }
    }

    /// Reveals every item whose time has come. Returns how many flipped.
    pub fn reveal_due(&mut self, now: Duration) -> usize {
        let mut revealed = 0;
        for item in &mut self.items {
            if item.is_revealed {
                continue;
            }
            if item.reveal_at.is_some_and(|at| at <= now) {
                item.is_revealed = true;
                item.reveal_started_at = Some(now);
                revealed += 1;
            }
        }
        revealed
    }

    /// Drops finished appear animations back to steady-state rendering.
    pub fn settle_animations(&mut self, now: Duration, appear_duration: Duration) {
        for item in &mut self.items {
            if item
                .reveal_started_at
                .is_some_and(|started| now.saturating_sub(started) >= appear_duration)
            {
                item.reveal_started_at = None;
            }
        }
    }

    /// Index of the revealed item on `pos`, if any.
    pub fn revealed_at(&self, pos: Position) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.is_revealed && item.position.collides_with(&pos))
    }

    /// Removes the item found by a previous scan.
    pub fn take(&mut self, index: usize) -> Option<FoodItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }
}
