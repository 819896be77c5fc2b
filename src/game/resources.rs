//! Run-level state shared between the level state machine and the shell.

use super::FoodCategory;

/// Game phase enum to track which state the run is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Running,
    /// Ticks are frozen until the shell calls `continue_next_level`.
    LevelComplete,
    /// Terminal until the shell calls `restart`.
    GameOver,
}

/// Pickups per category over the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PickupTally {
    counts: [u32; FoodCategory::COUNT],
}

impl PickupTally {
    pub fn record(&mut self, category: FoodCategory) {
        self.counts[category.index()] += 1;
    }

    pub fn count(&self, category: FoodCategory) -> u32 {
        self.counts[category.index()]
    }

    #[cfg(test)]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Labelled counts in category table order, as shown on the overlays.
    pub fn stats(&self) -> Vec<CategoryCount> {
        FoodCategory::ALL
            .iter()
            .map(|category| CategoryCount {
                label: category.label(),
                count: self.count(*category),
            })
            .collect()
    }
}

/// One row of the end-of-level / end-of-game statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCount {
    pub label: &'static str,
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_follow_table_order() {
        let mut tally = PickupTally::default();
        tally.record(FoodCategory::Metal);
        tally.record(FoodCategory::Metal);
        tally.record(FoodCategory::Papel);

        let stats = tally.stats();
        assert_eq!(stats.len(), FoodCategory::COUNT);
        assert_eq!(stats[0].label, "Papel (Azul)");
        assert_eq!(stats[0].count, 1);
        assert_eq!(stats[3].count, 2);
        assert_eq!(tally.total(), 3);
    }
}
