//! Geometry primitives: `TileDimensions` (immutable demand/stock rectangle),
//! `Tile` (a plain axis-aligned rectangle) and `TileNode` (the mutable
//! guillotine split tree), per spec.md §3.

use crate::models::enums::Orientation;
use crate::types::next_tile_node_id;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// An immutable rectangle a panel or stock sheet contributes to the engine.
/// Equality is id+width+height; a separate "dimension-based" hash (ignoring
/// id) is used where the engine only cares about interchangeable sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileDimensions {
    pub id: i32,
    pub width: i32,
    pub height: i32,
    pub material: String,
    pub orientation: Orientation,
    pub label: Option<String>,
    pub is_rotated: bool,
}

impl TileDimensions {
    pub fn new(id: i32, width: i32, height: i32) -> Self {
        Self {
            id,
            width,
            height,
            material: crate::types::DEFAULT_MATERIAL.to_string(),
            orientation: Orientation::Any,
            label: None,
            is_rotated: false,
        }
    }

    /// A tile with no identity of its own, for generated stock-bundle
    /// placeholders; `simple` because it carries none of the optional
    /// panel metadata.
    pub fn simple(width: i32, height: i32) -> Self {
        Self::new(0, width, height)
    }

    pub fn new_with_rotation(id: i32, width: i32, height: i32, is_rotated: bool) -> Self {
        Self {
            is_rotated,
            ..Self::new(id, width, height)
        }
    }

    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    pub fn max_dimension(&self) -> i32 {
        self.width.max(self.height)
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    pub fn is_horizontal(&self) -> bool {
        self.width > self.height
    }

    pub fn has_same_dimensions(&self, other: &TileDimensions) -> bool {
        (self.width == other.width && self.height == other.height)
            || (self.width == other.height && self.height == other.width)
    }

    pub fn fits(&self, width: i32, height: i32) -> bool {
        self.width <= width && self.height <= height
    }

    /// Swap sides and flip grain orientation (spec.md §3 invariant).
    pub fn rotate90(&self) -> TileDimensions {
        TileDimensions {
            id: self.id,
            width: self.height,
            height: self.width,
            material: self.material.clone(),
            orientation: self.orientation.flipped(),
            label: self.label.clone(),
            is_rotated: !self.is_rotated,
        }
    }

    /// Cantor-pairing-like hash over (width, height) used to compare
    /// distinct tile sets regardless of id (spec.md §3 `TileNode`).
    pub fn dimensions_based_hash_code(&self) -> i64 {
        let w = self.width as i64;
        let h = self.height as i64;
        ((w + h) * (w + h + 1)) / 2 + h
    }
}

impl PartialEq for TileDimensions {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.width == other.width && self.height == other.height
    }
}
impl Eq for TileDimensions {}

impl Hash for TileDimensions {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.width.hash(state);
        self.height.hash(state);
    }
}

/// A plain axis-aligned rectangle in the integer coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Tile {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    pub fn area(&self) -> i64 {
        self.width() as i64 * self.height() as i64
    }
}

/// One node of a mosaic's binary guillotine tree. A leaf with `is_final`
/// carries a placed demand panel (`external_id`); an internal node has
/// exactly two children from one horizontal or vertical cut.
#[derive(Debug, Clone)]
pub struct TileNode {
    pub id: i32,
    pub tile: Tile,
    pub child1: Option<Box<TileNode>>,
    pub child2: Option<Box<TileNode>>,
    pub is_final: bool,
    pub is_rotated: bool,
    pub external_id: Option<i32>,
    used_area_cache: std::cell::Cell<Option<i64>>,
}

impl TileNode {
    pub fn new(tile: Tile) -> Self {
        Self {
            id: next_tile_node_id(),
            tile,
            child1: None,
            child2: None,
            is_final: false,
            is_rotated: false,
            external_id: None,
            used_area_cache: std::cell::Cell::new(None),
        }
    }

    pub fn has_children(&self) -> bool {
        self.child1.is_some() || self.child2.is_some()
    }

    pub fn width(&self) -> i32 {
        self.tile.width()
    }

    pub fn height(&self) -> i32 {
        self.tile.height()
    }

    pub fn area(&self) -> i64 {
        self.tile.area()
    }

    /// Deep copy — every mutation path in the worker copies the whole
    /// subtree rather than sharing nodes across sibling solutions
    /// (spec.md §9 "deep-copy of shared trees"). IDs are preserved; the
    /// copy is structurally identical, only independently owned.
    pub fn deep_clone(&self) -> TileNode {
        TileNode {
            id: self.id,
            tile: self.tile,
            child1: self.child1.as_ref().map(|c| Box::new(c.deep_clone())),
            child2: self.child2.as_ref().map(|c| Box::new(c.deep_clone())),
            is_final: self.is_final,
            is_rotated: self.is_rotated,
            external_id: self.external_id,
            used_area_cache: std::cell::Cell::new(None),
        }
    }

    /// Locate the node with `id`, if any, searching this subtree.
    pub fn find(&self, id: i32) -> Option<&TileNode> {
        if self.id == id {
            return Some(self);
        }
        self.child1
            .as_deref()
            .and_then(|c| c.find(id))
            .or_else(|| self.child2.as_deref().and_then(|c| c.find(id)))
    }

    pub fn find_mut(&mut self, id: i32) -> Option<&mut TileNode> {
        if self.id == id {
            return Some(self);
        }
        if let Some(found) = self.child1.as_deref_mut().and_then(|c| c.find_mut(id)) {
            return Some(found);
        }
        self.child2.as_deref_mut().and_then(|c| c.find_mut(id))
    }

    /// Sum of the area of every final leaf beneath this node. Memoized
    /// per node since it is queried repeatedly while ranking solutions.
    pub fn used_area(&self) -> i64 {
        if let Some(cached) = self.used_area_cache.get() {
            return cached;
        }
        let area = if self.is_final {
            self.area()
        } else if self.has_children() {
            self.child1.as_ref().map_or(0, |c| c.used_area())
                + self.child2.as_ref().map_or(0, |c| c.used_area())
        } else {
            0
        };
        self.used_area_cache.set(Some(area));
        area
    }

    pub fn unused_area(&self) -> i64 {
        self.area() - self.used_area()
    }

    pub fn used_area_ratio(&self) -> f64 {
        if self.area() == 0 {
            0.0
        } else {
            self.used_area() as f64 / self.area() as f64
        }
    }

    /// Non-final leaves (free rectangles still available to place into).
    pub fn unused_leaves(&self) -> Vec<&TileNode> {
        let mut out = Vec::new();
        self.collect_unused_leaves(&mut out);
        out
    }

    fn collect_unused_leaves<'a>(&'a self, out: &mut Vec<&'a TileNode>) {
        if !self.has_children() {
            if !self.is_final {
                out.push(self);
            }
            return;
        }
        if let Some(c) = &self.child1 {
            c.collect_unused_leaves(out);
        }
        if let Some(c) = &self.child2 {
            c.collect_unused_leaves(out);
        }
    }

    pub fn final_leaves(&self) -> Vec<&TileNode> {
        let mut out = Vec::new();
        self.collect_final_leaves(&mut out);
        out
    }

    fn collect_final_leaves<'a>(&'a self, out: &mut Vec<&'a TileNode>) {
        if self.is_final {
            out.push(self);
            return;
        }
        if let Some(c) = &self.child1 {
            c.collect_final_leaves(out);
        }
        if let Some(c) = &self.child2 {
            c.collect_final_leaves(out);
        }
    }

    pub fn nbr_unused_tiles(&self) -> usize {
        self.unused_leaves().len()
    }

    pub fn nbr_final_tiles(&self) -> usize {
        self.final_leaves().len()
    }

    pub fn biggest_unused_area(&self) -> i64 {
        self.unused_leaves()
            .iter()
            .map(|n| n.area())
            .max()
            .unwrap_or(0)
    }

    pub fn nbr_final_horizontal(&self) -> usize {
        self.final_leaves()
            .iter()
            .filter(|n| n.width() > n.height())
            .count()
    }

    pub fn nbr_final_vertical(&self) -> usize {
        self.final_leaves()
            .iter()
            .filter(|n| n.width() <= n.height())
            .count()
    }

    /// Distinct (width, height) combinations across final leaves, keyed by
    /// the Cantor-pairing-style hash spec.md §3 calls for.
    pub fn distinct_tile_set(&self) -> HashSet<i64> {
        self.final_leaves()
            .iter()
            .map(|n| {
                let w = n.width() as i64;
                let h = n.height() as i64;
                ((w + h) * (w + h + 1)) / 2 + h
            })
            .collect()
    }

    /// Center of mass of final leaves, as distance from the origin.
    pub fn center_of_mass_distance_to_origin(&self) -> f64 {
        let leaves = self.final_leaves();
        if leaves.is_empty() {
            return 0.0;
        }
        let total_area: f64 = leaves.iter().map(|n| n.area() as f64).sum();
        if total_area == 0.0 {
            return 0.0;
        }
        let (cx, cy) = leaves.iter().fold((0.0, 0.0), |(cx, cy), n| {
            let area = n.area() as f64;
            let center_x = (n.tile.x1 + n.tile.x2) as f64 / 2.0;
            let center_y = (n.tile.y1 + n.tile.y2) as f64 / 2.0;
            (cx + center_x * area, cy + center_y * area)
        });
        ((cx / total_area).powi(2) + (cy / total_area).powi(2)).sqrt()
    }

    /// Dedup key: leaf coordinates and final-flag across the whole tree,
    /// used by the beam to drop structurally identical solutions
    /// (spec.md §4.4 step 2).
    pub fn to_string_identifier(&self) -> String {
        let mut s = String::new();
        self.append_to_string_identifier(&mut s);
        s
    }

    fn append_to_string_identifier(&self, out: &mut String) {
        use std::fmt::Write;
        if self.has_children() {
            if let Some(c) = &self.child1 {
                c.append_to_string_identifier(out);
            }
            if let Some(c) = &self.child2 {
                c.append_to_string_identifier(out);
            }
        } else {
            let _ = write!(
                out,
                "[{},{},{},{},{}]",
                self.tile.x1, self.tile.y1, self.tile.x2, self.tile.y2, self.is_final as u8
            );
        }
    }

    pub fn max_depth(&self) -> usize {
        if !self.has_children() {
            return 1;
        }
        let d1 = self.child1.as_ref().map_or(0, |c| c.max_depth());
        let d2 = self.child2.as_ref().map_or(0, |c| c.max_depth());
        1 + d1.max(d2)
    }
}

impl PartialEq for TileNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.tile == other.tile && self.is_final == other.is_final
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate90_swaps_sides_and_flips_orientation() {
        let t = TileDimensions {
            orientation: Orientation::Horizontal,
            ..TileDimensions::new(1, 100, 50)
        };
        let r = t.rotate90();
        assert_eq!(r.width, 50);
        assert_eq!(r.height, 100);
        assert_eq!(r.orientation, Orientation::Vertical);
        assert!(r.is_rotated);
    }

    #[test]
    fn equality_uses_id_and_dimensions_only() {
        let a = TileDimensions::new(1, 100, 50);
        let mut b = TileDimensions::new(1, 100, 50);
        b.label = Some("different label".to_string());
        assert_eq!(a, b);
    }

    #[test]
    fn used_area_sums_final_leaves() {
        let mut root = TileNode::new(Tile::new(0, 0, 100, 50));
        let mut left = TileNode::new(Tile::new(0, 0, 60, 50));
        left.is_final = true;
        left.external_id = Some(2);
        let right = TileNode::new(Tile::new(60, 0, 100, 50));
        root.child1 = Some(Box::new(left));
        root.child2 = Some(Box::new(right));
        assert_eq!(root.used_area(), 3000);
        assert_eq!(root.unused_area(), 2000);
    }
}
