//! `StockBundle` — a multiset of stock sheets proposed as the containers
//! for one whole solution (spec.md §4.5, glossary).

use crate::models::tile::TileDimensions;

#[derive(Debug, Clone)]
pub struct StockBundle {
    pub tiles: Vec<TileDimensions>,
}

impl StockBundle {
    pub fn new(tiles: Vec<TileDimensions>) -> Self {
        Self { tiles }
    }

    pub fn total_area(&self) -> i64 {
        self.tiles.iter().map(|t| t.area()).sum()
    }

    pub fn max_dimension(&self) -> i32 {
        self.tiles.iter().map(|t| t.max_dimension()).max().unwrap_or(0)
    }

    pub fn is_uniform_dimensions(&self) -> bool {
        let mut iter = self.tiles.iter();
        let Some(first) = iter.next() else { return true };
        iter.all(|t| t.has_same_dimensions(first))
    }

    /// Clone with tiles reordered descending, for the sorter's "opposite
    /// placement order" variant (spec.md §4.5 sorter thread).
    pub fn sorted_descending(&self) -> StockBundle {
        let mut tiles = self.tiles.clone();
        tiles.sort_by(|a, b| b.area().cmp(&a.area()));
        StockBundle::new(tiles)
    }

    /// Multiset-of-(width,height) equality regardless of order and id
    /// (spec.md §9 item 3 — the decompiled equality had a missing
    /// inner-loop continue; this is the deterministic replacement).
    pub fn same_multiset(&self, other: &StockBundle) -> bool {
        if self.tiles.len() != other.tiles.len() {
            return false;
        }
        let mut mine: Vec<(i32, i32)> = self.tiles.iter().map(|t| (t.width, t.height)).collect();
        let mut theirs: Vec<(i32, i32)> = other.tiles.iter().map(|t| (t.width, t.height)).collect();
        mine.sort_unstable();
        theirs.sort_unstable();
        mine == theirs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(id: i32, w: i32, h: i32) -> TileDimensions {
        TileDimensions::new(id, w, h)
    }

    #[test]
    fn same_multiset_ignores_order_and_id() {
        let a = StockBundle::new(vec![tile(1, 100, 50), tile(2, 200, 100)]);
        let b = StockBundle::new(vec![tile(9, 200, 100), tile(8, 100, 50)]);
        assert!(a.same_multiset(&b));
    }

    #[test]
    fn different_multiset_is_not_equal() {
        let a = StockBundle::new(vec![tile(1, 100, 50)]);
        let b = StockBundle::new(vec![tile(1, 100, 60)]);
        assert!(!a.same_multiset(&b));
    }

    #[test]
    fn sorted_descending_orders_by_area() {
        let bundle = StockBundle::new(vec![tile(1, 10, 10), tile(2, 100, 100)]);
        let sorted = bundle.sorted_descending();
        assert_eq!(sorted.tiles[0].id, 2);
    }
}
