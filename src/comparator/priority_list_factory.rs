//! Builds the six-key priority list for a requested optimization priority
//! (spec.md §4.6 "Composition").

use crate::comparator::RankKey;
use crate::models::enums::OptimizationPriority;

pub struct PriorityListFactory;

impl PriorityListFactory {
    /// The same six-key order drives both a worker's per-thread pruning
    /// and the task's final selection; only the configured priority
    /// changes which of the two orderings below is used.
    pub fn build(priority: OptimizationPriority) -> Vec<RankKey> {
        use RankKey::*;
        match priority {
            OptimizationPriority::MostTiles => vec![
                MostTiles,
                LeastWastedArea,
                LeastNbrCuts,
                LeastNbrMosaics,
                BiggestUnusedTileArea,
                MostHvDiscrepancy,
            ],
            OptimizationPriority::LeastWastedArea => vec![
                MostTiles,
                LeastNbrCuts,
                LeastWastedArea,
                LeastNbrMosaics,
                BiggestUnusedTileArea,
                MostHvDiscrepancy,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_tiles_priority_puts_waste_before_cuts() {
        let list = PriorityListFactory::build(OptimizationPriority::MostTiles);
        assert_eq!(list[1], RankKey::LeastWastedArea);
        assert_eq!(list[2], RankKey::LeastNbrCuts);
    }

    #[test]
    fn least_wasted_area_priority_puts_cuts_before_waste() {
        let list = PriorityListFactory::build(OptimizationPriority::LeastWastedArea);
        assert_eq!(list[1], RankKey::LeastNbrCuts);
        assert_eq!(list[2], RankKey::LeastWastedArea);
    }
}
