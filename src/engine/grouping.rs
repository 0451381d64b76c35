//! Demand grouping, step 1 of the per-material driver (spec.md §4.3).

use crate::models::grouped_tile::GroupedTileDimensions;
use crate::models::tile::TileDimensions;
use std::collections::{HashMap, HashSet};

/// Whether every demand and stock side, across the whole material, shares
/// one common value on width or height.
///
/// Reimplemented per the redesign note: intersect the set `{W, H}` of the
/// first demand panel against every subsequent demand and stock panel;
/// non-empty at the end means one-dimensional. (The source computed this
/// destructively mid-iteration; this is the equivalent fixed-point form.)
pub fn is_one_dimensional(demand: &[TileDimensions], stock: &[TileDimensions]) -> bool {
    let Some(first) = demand.first() else {
        return false;
    };
    let mut candidates: HashSet<i32> = [first.width, first.height].into_iter().collect();
    for t in demand.iter().chain(stock.iter()) {
        candidates.retain(|v| *v == t.width || *v == t.height);
        if candidates.is_empty() {
            return false;
        }
    }
    !candidates.is_empty()
}

/// Bucket demand by (width, height), assigning each panel a group index.
/// A size's panels stay in group 0 until the running count within that
/// size exceeds `threshold` *and* the size's total count exceeds
/// `threshold`, at which point later panels of that size move to group 1
/// (spec.md §4.3 step 1 — "split frequent identical panels into at most
/// two groups").
pub fn group_demand(demand: &[TileDimensions], stock: &[TileDimensions]) -> Vec<GroupedTileDimensions> {
    let n = demand.len();
    let threshold = if is_one_dimensional(demand, stock) {
        1
    } else {
        (n / 100).max(1)
    };

    let mut total_count: HashMap<(i32, i32), usize> = HashMap::new();
    for t in demand {
        *total_count.entry((t.width, t.height)).or_insert(0) += 1;
    }

    let mut next_size_index = 0i32;
    let mut size_index: HashMap<(i32, i32), i32> = HashMap::new();
    let mut running: HashMap<(i32, i32), usize> = HashMap::new();
    let mut switched: HashSet<(i32, i32)> = HashSet::new();

    demand
        .iter()
        .map(|t| {
            let key = (t.width, t.height);
            let idx = *size_index.entry(key).or_insert_with(|| {
                let i = next_size_index;
                next_size_index += 1;
                i
            });

            if total_count[&key] > threshold {
                let r = running.entry(key).or_insert(0);
                *r += 1;
                if *r > threshold {
                    switched.insert(key);
                }
            }

            let sub = if switched.contains(&key) { 1 } else { 0 };
            GroupedTileDimensions::new(t.clone(), idx * 2 + sub)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(id: i32, w: i32, h: i32) -> TileDimensions {
        TileDimensions::new(id, w, h)
    }

    #[test]
    fn one_dimensional_detects_shared_side() {
        let demand = vec![tile(1, 100, 50), tile(2, 100, 80)];
        let stock = vec![tile(10, 100, 200)];
        assert!(is_one_dimensional(&demand, &stock));
    }

    #[test]
    fn not_one_dimensional_without_a_shared_side() {
        let demand = vec![tile(1, 100, 50), tile(2, 60, 80)];
        let stock = vec![tile(10, 200, 200)];
        assert!(!is_one_dimensional(&demand, &stock));
    }

    #[test]
    fn frequent_size_splits_into_two_groups() {
        let demand: Vec<TileDimensions> = (0..250).map(|i| tile(i, 100, 50)).collect();
        let stock = vec![tile(1000, 500, 500)];
        let grouped = group_demand(&demand, &stock);
        let groups: HashSet<i32> = grouped.iter().map(|g| g.group).collect();
        assert_eq!(groups.len(), 2);
    }
}
