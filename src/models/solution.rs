//! `Solution` — one candidate final layout: a set of mosaics, the queue of
//! not-yet-instantiated stock sheets, and the no-fit list (spec.md §3).

use crate::models::mosaic::Mosaic;
use crate::models::tile::TileDimensions;
use crate::types::next_solution_id;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone)]
pub struct Solution {
    pub id: i64,
    /// Sorted ascending by unused area on every insertion (spec.md §3).
    pub mosaics: Vec<Mosaic>,
    pub unused_stock_panels: Vec<TileDimensions>,
    pub no_fit_panels: Vec<TileDimensions>,
    pub creator_thread_group: String,
    pub timestamp_ms: u128,
    pub aux_info: Option<String>,
}

impl Solution {
    /// A solution seeded from one stock bundle: its first sheet becomes the
    /// first mosaic, the rest sit in the unused-stock queue.
    pub fn from_bundle(bundle: &[TileDimensions], creator_thread_group: impl Into<String>) -> Self {
        let mut unused_stock_panels: Vec<TileDimensions> = bundle.to_vec();
        let mosaics = if unused_stock_panels.is_empty() {
            Vec::new()
        } else {
            let first = unused_stock_panels.remove(0);
            vec![Mosaic::new(&first)]
        };
        Self {
            id: next_solution_id(),
            mosaics,
            unused_stock_panels,
            no_fit_panels: Vec::new(),
            creator_thread_group: creator_thread_group.into(),
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            aux_info: None,
        }
    }

    pub fn insert_mosaic(&mut self, mosaic: Mosaic) {
        let pos = self
            .mosaics
            .partition_point(|m| m.unused_area() <= mosaic.unused_area());
        self.mosaics.insert(pos, mosaic);
    }

    /// Replace one mosaic with its placed descendant. Identified by the
    /// root node's id rather than `stock_id`: a bundle can carry two or
    /// more stock sheets that share the same id (identical boards), which
    /// would otherwise make this drop every mosaic on that id instead of
    /// just the one being replaced.
    pub fn replace_mosaic(&self, mosaic_root_id: i32, replacement: Mosaic) -> Solution {
        let mut clone = self.clone_shallow_for_child();
        clone.mosaics = self
            .mosaics
            .iter()
            .filter(|m| m.root.id != mosaic_root_id)
            .cloned()
            .collect();
        clone.insert_mosaic(replacement);
        clone
    }

    /// Instantiate a fresh mosaic from the unused-stock queue, consuming
    /// the first sheet that fits `t` in either orientation.
    pub fn instantiate_from_unused_stock(&self, t: &TileDimensions) -> Option<(Solution, Mosaic)> {
        let index = self.unused_stock_panels.iter().position(|s| {
            s.fits(t.width, t.height) || s.fits(t.height, t.width)
        })?;
        let mut clone = self.clone_shallow_for_child();
        let stock = clone.unused_stock_panels.remove(index);
        let mosaic = Mosaic::new(&stock);
        Some((clone, mosaic))
    }

    fn clone_shallow_for_child(&self) -> Solution {
        Solution {
            id: next_solution_id(),
            mosaics: self.mosaics.clone(),
            unused_stock_panels: self.unused_stock_panels.clone(),
            no_fit_panels: self.no_fit_panels.clone(),
            creator_thread_group: self.creator_thread_group.clone(),
            timestamp_ms: self.timestamp_ms,
            aux_info: self.aux_info.clone(),
        }
    }

    pub fn nbr_final_tiles(&self) -> usize {
        self.mosaics.iter().map(|m| m.root.nbr_final_tiles()).sum()
    }

    pub fn total_unused_area(&self) -> i64 {
        self.mosaics.iter().map(|m| m.unused_area()).sum()
    }

    pub fn total_used_area(&self) -> i64 {
        self.mosaics.iter().map(|m| m.used_area()).sum()
    }

    pub fn total_nbr_cuts(&self) -> usize {
        self.mosaics.iter().map(|m| m.nbr_cuts()).sum()
    }

    pub fn nbr_mosaics(&self) -> usize {
        self.mosaics.len()
    }

    pub fn biggest_unused_area(&self) -> i64 {
        self.mosaics
            .iter()
            .map(|m| m.biggest_unused_area())
            .max()
            .unwrap_or(0)
    }

    pub fn max_distinct_tile_set_size(&self) -> usize {
        self.mosaics
            .iter()
            .map(|m| m.root.distinct_tile_set().len())
            .max()
            .unwrap_or(0)
    }

    pub fn avg_center_of_mass_distance(&self) -> f64 {
        if self.mosaics.is_empty() {
            return 0.0;
        }
        let sum: f64 = self
            .mosaics
            .iter()
            .map(|m| m.root.center_of_mass_distance_to_origin())
            .sum();
        sum / self.mosaics.len() as f64
    }

    pub fn nbr_unused_tiles(&self) -> usize {
        self.mosaics.iter().map(|m| m.root.nbr_unused_tiles()).sum()
    }

    pub fn max_unused_panel_area_per_mosaic(&self) -> i64 {
        self.mosaics
            .iter()
            .map(|m| m.unused_area())
            .max()
            .unwrap_or(0)
    }

    /// Is this an "all fit" solution: every demand panel placed, none in
    /// the no-fit list.
    pub fn is_all_fit(&self) -> bool {
        self.no_fit_panels.is_empty()
    }

    /// Dedup key across the whole beam (spec.md §4.4 step 2): the
    /// concatenation of every mosaic's tree-shape identifier.
    pub fn structure_identifier(&self) -> String {
        self.mosaics
            .iter()
            .map(|m| m.root.to_string_identifier())
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Drop mosaics whose root has zero used area — these are sheets that
    /// were instantiated but never received a placement (spec.md §4.4
    /// step 3).
    pub fn drop_empty_mosaics(&mut self) {
        self.mosaics.retain(|m| m.used_area() > 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bundle_seeds_first_mosaic_and_keeps_rest_unused() {
        let bundle = vec![
            TileDimensions::new(1, 100, 50),
            TileDimensions::new(2, 200, 100),
        ];
        let solution = Solution::from_bundle(&bundle, "AREA");
        assert_eq!(solution.mosaics.len(), 1);
        assert_eq!(solution.unused_stock_panels.len(), 1);
    }

    #[test]
    fn structure_identifier_differs_after_placement() {
        let bundle = vec![TileDimensions::new(1, 100, 50)];
        let solution = Solution::from_bundle(&bundle, "AREA");
        let before = solution.structure_identifier();
        let outcome = solution.mosaics[0].add(
            &TileDimensions::new(2, 60, 50),
            crate::models::enums::FirstCutOrientation::Horizontal,
            0,
            10,
            false,
        );
        let placed = solution.replace_mosaic(solution.mosaics[0].root.id, outcome.mosaics[0].clone());
        assert_ne!(before, placed.structure_identifier());
    }
}
