//! Food sprite loading and the completion counter that gates the first tick.

use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::GameEngine;
use crate::game::FoodCategory;

/// Load outcome of one category sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpriteState {
    #[default]
    Pending,
    Loaded,
    /// Drawn as a flat rectangle in the category color instead.
    Failed,
}

/// Counts sprites that have loaded or failed. The game only starts once all have settled.
#[derive(Debug, Clone, Default)]
pub struct AssetGate {
    states: [SpriteState; FoodCategory::COUNT],
}

impl AssetGate {
    #[cfg(test)]
    /// A gate where every sprite already has the given outcome.
    pub fn settled_with(state: SpriteState) -> Self {
        AssetGate {
            states: [state; FoodCategory::COUNT],
        }
    }

    /// Records an outcome. Later reports for the same sprite are ignored.
    pub fn settle(&mut self, category: FoodCategory, loaded: bool) -> bool {
        let slot = &mut self.states[category.index()];
        if *slot != SpriteState::Pending {
            return false;
        }
        if loaded {
            *slot = SpriteState::Loaded;
        } else {
            warn!(
                "sprite {} for {} failed to load, drawing flat color",
                category.sprite_path(),
                category
            );
            *slot = SpriteState::Failed;
        }
        true
    }

    pub fn state(&self, category: FoodCategory) -> SpriteState {
        self.states[category.index()]
    }

    pub fn has_sprite(&self, category: FoodCategory) -> bool {
        self.state(category) == SpriteState::Loaded
    }

    pub fn settled(&self) -> usize {
        self.states
            .iter()
            .filter(|s| **s != SpriteState::Pending)
            .count()
    }

    pub fn is_ready(&self) -> bool {
        self.settled() == FoodCategory::COUNT
    }
}

/// Image handles per category, in table order.
#[derive(Resource, Default)]
pub struct FoodSprites {
    handles: Vec<(FoodCategory, Handle<Image>)>,
}

impl FoodSprites {
    pub fn handle(&self, category: FoodCategory) -> Option<&Handle<Image>> {
        self.handles
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, handle)| handle)
    }
}

/// Startup system that requests every category sprite.
pub(super) fn load_food_sprites(asset_server: Res<AssetServer>, mut sprites: ResMut<FoodSprites>) {
    sprites.handles = FoodCategory::ALL
        .iter()
        .map(|category| (*category, asset_server.load(category.sprite_path())))
        .collect();
}

/// System to report finished or failed loads to the engine.
pub(super) fn track_sprite_loading(
    asset_server: Res<AssetServer>,
    sprites: Res<FoodSprites>,
    mut engine: ResMut<GameEngine>,
) {
    if engine.assets().is_ready() {
        return;
    }
    for (category, handle) in &sprites.handles {
        if engine.assets().state(*category) != SpriteState::Pending {
            continue;
        }
        match asset_server.get_load_state(handle.id()) {
            Some(LoadState::Loaded) => engine.asset_settled(*category, true),
            Some(LoadState::Failed(_)) => engine.asset_settled(*category, false),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_only_when_every_sprite_settles() {
        let mut gate = AssetGate::default();
        for category in &FoodCategory::ALL[..4] {
            gate.settle(*category, true);
        }
        assert!(!gate.is_ready());
        gate.settle(FoodCategory::Organico, false);
        assert!(gate.is_ready());
        assert!(!gate.has_sprite(FoodCategory::Organico));
        assert!(gate.has_sprite(FoodCategory::Papel));
    }

    #[test]
    fn duplicate_reports_do_not_double_count() {
        let mut gate = AssetGate::default();
        assert!(gate.settle(FoodCategory::Metal, false));
        assert!(!gate.settle(FoodCategory::Metal, true));
        assert_eq!(gate.settled(), 1);
        assert_eq!(gate.state(FoodCategory::Metal), SpriteState::Failed);
    }
}
