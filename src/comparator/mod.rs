//! Solution ranking (spec.md §4.6). Inheritance-based comparator classes
//! are replaced by a tagged `RankKey` enum and lexicographic composition
//! over a configured key order (spec.md §9 design note).

pub mod priority_list_factory;

use crate::models::solution::Solution;
use std::cmp::Ordering;

/// One of the nine named total orders on solutions (spec.md §4.6 table).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankKey {
    MostTiles,
    LeastWastedArea,
    LeastNbrCuts,
    LeastNbrMosaics,
    BiggestUnusedTileArea,
    MostHvDiscrepancy,
    SmallestCenterOfMassDistToOrigin,
    LeastNbrUnusedTiles,
    MostUnusedPanelArea,
}

impl RankKey {
    /// Compare two solutions under this key alone; `Equal` means tied.
    pub fn compare(self, a: &Solution, b: &Solution) -> Ordering {
        match self {
            RankKey::MostTiles => b.nbr_final_tiles().cmp(&a.nbr_final_tiles()),
            RankKey::LeastWastedArea => a.total_unused_area().cmp(&b.total_unused_area()),
            RankKey::LeastNbrCuts => a.total_nbr_cuts().cmp(&b.total_nbr_cuts()),
            RankKey::LeastNbrMosaics => a.nbr_mosaics().cmp(&b.nbr_mosaics()),
            RankKey::BiggestUnusedTileArea => b.biggest_unused_area().cmp(&a.biggest_unused_area()),
            RankKey::MostHvDiscrepancy => {
                a.max_distinct_tile_set_size().cmp(&b.max_distinct_tile_set_size())
            }
            RankKey::SmallestCenterOfMassDistToOrigin => a
                .avg_center_of_mass_distance()
                .partial_cmp(&b.avg_center_of_mass_distance())
                .unwrap_or(Ordering::Equal),
            RankKey::LeastNbrUnusedTiles => a.nbr_unused_tiles().cmp(&b.nbr_unused_tiles()),
            RankKey::MostUnusedPanelArea => b
                .max_unused_panel_area_per_mosaic()
                .cmp(&a.max_unused_panel_area_per_mosaic()),
        }
    }
}

/// Lexicographic composition of an ordered key list: the first non-zero
/// key decides (spec.md §4.6 "Composition").
#[derive(Debug, Clone)]
pub struct MultiCriteriaComparator {
    pub keys: Vec<RankKey>,
}

impl MultiCriteriaComparator {
    pub fn new(keys: Vec<RankKey>) -> Self {
        Self { keys }
    }

    pub fn compare(&self, a: &Solution, b: &Solution) -> Ordering {
        for key in &self.keys {
            let ord = key.compare(a, b);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

/// Beam-wide helpers built on top of a comparator (sort, dedup, truncate).
pub struct SolutionUtils;

impl SolutionUtils {
    pub fn sort_solutions(solutions: &mut [Solution], comparator: &MultiCriteriaComparator) {
        solutions.sort_by(|a, b| comparator.compare(a, b));
    }

    /// Drop solutions whose mosaic-tree shape identifier has already been
    /// seen, keeping the first (best-ranked, if sorted first) occurrence
    /// (spec.md §4.4 step 2).
    pub fn remove_duplicates(solutions: &mut Vec<Solution>) {
        let mut seen = std::collections::HashSet::new();
        solutions.retain(|s| seen.insert(s.structure_identifier()));
    }

    pub fn process_solutions(
        solutions: &mut Vec<Solution>,
        comparator: &MultiCriteriaComparator,
        k: usize,
    ) {
        Self::remove_duplicates(solutions);
        Self::sort_solutions(solutions, comparator);
        crate::engine::beam::truncate_with_off_by_one(solutions, k);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tile::TileDimensions;

    #[test]
    fn most_tiles_orders_descending() {
        let bundle = vec![TileDimensions::new(1, 100, 100)];
        let a = crate::models::solution::Solution::from_bundle(&bundle, "AREA");
        let b = crate::models::solution::Solution::from_bundle(&bundle, "AREA");
        assert_eq!(RankKey::MostTiles.compare(&a, &b), Ordering::Equal);
    }
}
