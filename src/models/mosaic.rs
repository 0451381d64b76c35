//! `Mosaic` — one stock sheet's guillotine split tree plus the cuts that
//! produced it (spec.md §3, §4.4.1 placement primitive).

use crate::models::cut::Cut;
use crate::models::enums::{FirstCutOrientation, Orientation};
use crate::models::tile::{Tile, TileDimensions, TileNode};

#[derive(Debug, Clone)]
pub struct Mosaic {
    pub root: TileNode,
    pub cuts: Vec<Cut>,
    pub material: String,
    pub stock_id: i32,
    pub orientation: Orientation,
}

/// A candidate leaf rejected placement only because of the min-trim
/// constraint, for the caller to latch `is_min_trim_dimension_influenced`.
pub struct PlacementOutcome {
    pub mosaics: Vec<Mosaic>,
    pub min_trim_influenced: bool,
}

impl Mosaic {
    pub fn new(stock: &TileDimensions) -> Self {
        let root = TileNode::new(Tile::new(0, 0, stock.width, stock.height));
        Self {
            root,
            cuts: Vec::new(),
            material: stock.material.clone(),
            stock_id: stock.id,
            orientation: stock.orientation,
        }
    }

    pub fn used_area(&self) -> i64 {
        self.root.used_area()
    }

    pub fn unused_area(&self) -> i64 {
        self.root.unused_area()
    }

    pub fn used_area_ratio(&self) -> f64 {
        self.root.used_area_ratio()
    }

    pub fn biggest_unused_area(&self) -> i64 {
        self.root.biggest_unused_area()
    }

    pub fn nbr_cuts(&self) -> usize {
        self.cuts.len()
    }

    pub fn cut_length(&self) -> i64 {
        self.cuts.iter().map(|c| c.length()).sum()
    }

    fn candidate_variants(&self, t: &TileDimensions, consider_grain: bool) -> Vec<TileDimensions> {
        if consider_grain && self.orientation != Orientation::Any && t.orientation != Orientation::Any {
            if t.orientation == self.orientation {
                vec![t.clone()]
            } else {
                vec![t.rotate90()]
            }
        } else if t.is_square() {
            vec![t.clone()]
        } else {
            vec![t.clone(), t.rotate90()]
        }
    }

    /// Non-final leaves big enough for `(w, h)` respecting the min-trim
    /// constraint (spec.md §4.4.1 step 2). Returns the candidate leaf ids
    /// plus whether any rejection was due to min-trim alone.
    fn find_candidates(&self, w: i32, h: i32, min_trim: i32) -> (Vec<i32>, bool) {
        let mut ids = Vec::new();
        let mut min_trim_influenced = false;
        for leaf in self.root.unused_leaves() {
            if leaf.width() < w || leaf.height() < h {
                continue;
            }
            let width_ok = leaf.width() == w || leaf.width() >= w + min_trim;
            let height_ok = leaf.height() == h || leaf.height() >= h + min_trim;
            if width_ok && height_ok {
                ids.push(leaf.id);
            } else {
                min_trim_influenced = true;
            }
        }
        ids
            .sort_unstable();
        (ids, min_trim_influenced)
    }

    /// Try to place `t` into this mosaic, trying both orientation variants
    /// (subject to grain consideration) and every eligible candidate leaf,
    /// per the first-cut policy (spec.md §4.4.1).
    pub fn add(
        &self,
        t: &TileDimensions,
        policy: FirstCutOrientation,
        kerf: i32,
        min_trim: i32,
        consider_grain: bool,
    ) -> PlacementOutcome {
        let mut mosaics = Vec::new();
        let mut min_trim_influenced = false;

        for variant in self.candidate_variants(t, consider_grain) {
            let (candidate_ids, influenced) =
                self.find_candidates(variant.width, variant.height, min_trim);
            min_trim_influenced |= influenced;

            for leaf_id in candidate_ids {
                let leaf = self.root.find(leaf_id).expect("candidate id exists");
                let exact_fit = leaf.width() == variant.width && leaf.height() == variant.height;

                if exact_fit {
                    let mut clone = self.clone_for_mutation();
                    let node = clone.root.find_mut(leaf_id).unwrap();
                    node.is_final = true;
                    node.external_id = Some(t.id);
                    node.is_rotated = variant.is_rotated;
                    mosaics.push(clone);
                    continue;
                }

                if matches!(policy, FirstCutOrientation::Both | FirstCutOrientation::Horizontal) {
                    let mut clone = self.clone_for_mutation();
                    let cuts = {
                        let node = clone.root.find_mut(leaf_id).unwrap();
                        split_horizontal_first(node, &variant, kerf)
                    };
                    clone.cuts.extend(cuts);
                    mosaics.push(clone);
                }

                if matches!(policy, FirstCutOrientation::Both | FirstCutOrientation::Vertical) {
                    let mut clone = self.clone_for_mutation();
                    let cuts = {
                        let node = clone.root.find_mut(leaf_id).unwrap();
                        split_vertical_first(node, &variant, kerf)
                    };
                    clone.cuts.extend(cuts);
                    mosaics.push(clone);
                }
            }
        }

        PlacementOutcome {
            mosaics,
            min_trim_influenced,
        }
    }

    fn clone_for_mutation(&self) -> Mosaic {
        Mosaic {
            root: self.root.deep_clone(),
            cuts: self.cuts.clone(),
            material: self.material.clone(),
            stock_id: self.stock_id,
            orientation: self.orientation,
        }
    }
}

/// Split a leaf horizontally (a vertical-axis cut at `x = w`) first; if the
/// leaf's height exceeds `t.height` recurse with a horizontal-axis cut
/// inside the left child (spec.md §4.4.1 / §3 split semantics).
fn split_horizontal_first(node: &mut TileNode, t: &TileDimensions, kerf: i32) -> Vec<Cut> {
    let tile = node.tile;
    let mut cuts = Vec::new();

    let child1_tile = Tile::new(tile.x1, tile.y1, tile.x1 + t.width, tile.y2);
    let mut child1 = TileNode::new(child1_tile);
    let remaining_width = tile.width() - t.width - kerf;
    let child2 = if remaining_width > 0 {
        Some(TileNode::new(Tile::new(
            tile.x1 + t.width + kerf,
            tile.y1,
            tile.x2,
            tile.y2,
        )))
    } else {
        None
    };

    cuts.push(
        crate::models::cut::CutBuilder::new()
            .x1(tile.x1 + t.width)
            .y1(tile.y1)
            .x2(tile.x1 + t.width)
            .y2(tile.y2)
            .original_width(tile.width())
            .original_height(tile.height())
            .is_horizontal(false)
            .cut_coord(t.width)
            .original_tile_id(node.id)
            .child1_tile_id(child1.id)
            .child2_tile_id(child2.as_ref().map_or(-1, |c| c.id))
            .build(),
    );

    if tile.height() > t.height {
        let inner = child1.tile;
        let final_tile = Tile::new(inner.x1, inner.y1, inner.x2, inner.y1 + t.height);
        let mut final_node = TileNode::new(final_tile);
        final_node.is_final = true;
        final_node.external_id = Some(t.id);
        final_node.is_rotated = t.is_rotated;

        let remaining_height = inner.height() - t.height - kerf;
        let leftover = if remaining_height > 0 {
            Some(TileNode::new(Tile::new(
                inner.x1,
                inner.y1 + t.height + kerf,
                inner.x2,
                inner.y2,
            )))
        } else {
            None
        };

        cuts.push(
            crate::models::cut::CutBuilder::new()
                .x1(inner.x1)
                .y1(inner.y1 + t.height)
                .x2(inner.x2)
                .y2(inner.y1 + t.height)
                .original_width(inner.width())
                .original_height(inner.height())
                .is_horizontal(true)
                .cut_coord(t.height)
                .original_tile_id(child1.id)
                .child1_tile_id(final_node.id)
                .child2_tile_id(leftover.as_ref().map_or(-1, |c| c.id))
                .build(),
        );

        child1.child1 = Some(Box::new(final_node));
        child1.child2 = leftover.map(Box::new);
    } else {
        child1.is_final = true;
        child1.external_id = Some(t.id);
        child1.is_rotated = t.is_rotated;
    }

    node.child1 = Some(Box::new(child1));
    node.child2 = child2.map(Box::new);
    cuts
}

/// Symmetric to [`split_horizontal_first`]: a horizontal-axis cut at
/// `y = h` first, recursing vertically inside the bottom child when the
/// leaf's width exceeds `t.width`.
fn split_vertical_first(node: &mut TileNode, t: &TileDimensions, kerf: i32) -> Vec<Cut> {
    let tile = node.tile;
    let mut cuts = Vec::new();

    let child1_tile = Tile::new(tile.x1, tile.y1, tile.x2, tile.y1 + t.height);
    let mut child1 = TileNode::new(child1_tile);
    let remaining_height = tile.height() - t.height - kerf;
    let child2 = if remaining_height > 0 {
        Some(TileNode::new(Tile::new(
            tile.x1,
            tile.y1 + t.height + kerf,
            tile.x2,
            tile.y2,
        )))
    } else {
        None
    };

    cuts.push(
        crate::models::cut::CutBuilder::new()
            .x1(tile.x1)
            .y1(tile.y1 + t.height)
            .x2(tile.x2)
            .y2(tile.y1 + t.height)
            .original_width(tile.width())
            .original_height(tile.height())
            .is_horizontal(true)
            .cut_coord(t.height)
            .original_tile_id(node.id)
            .child1_tile_id(child1.id)
            .child2_tile_id(child2.as_ref().map_or(-1, |c| c.id))
            .build(),
    );

    if tile.width() > t.width {
        let inner = child1.tile;
        let final_tile = Tile::new(inner.x1, inner.y1, inner.x1 + t.width, inner.y2);
        let mut final_node = TileNode::new(final_tile);
        final_node.is_final = true;
        final_node.external_id = Some(t.id);
        final_node.is_rotated = t.is_rotated;

        let remaining_width = inner.width() - t.width - kerf;
        let leftover = if remaining_width > 0 {
            Some(TileNode::new(Tile::new(
                inner.x1 + t.width + kerf,
                inner.y1,
                inner.x2,
                inner.y2,
            )))
        } else {
            None
        };

        cuts.push(
            crate::models::cut::CutBuilder::new()
                .x1(inner.x1 + t.width)
                .y1(inner.y1)
                .x2(inner.x1 + t.width)
                .y2(inner.y2)
                .original_width(inner.width())
                .original_height(inner.height())
                .is_horizontal(false)
                .cut_coord(t.width)
                .original_tile_id(child1.id)
                .child1_tile_id(final_node.id)
                .child2_tile_id(leftover.as_ref().map_or(-1, |c| c.id))
                .build(),
        );

        child1.child1 = Some(Box::new(final_node));
        child1.child2 = leftover.map(Box::new);
    } else {
        child1.is_final = true;
        child1.external_id = Some(t.id);
        child1.is_rotated = t.is_rotated;
    }

    node.child1 = Some(Box::new(child1));
    node.child2 = child2.map(Box::new);
    cuts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock(w: i32, h: i32) -> TileDimensions {
        TileDimensions::new(1, w, h)
    }

    #[test]
    fn exact_fit_marks_leaf_final_with_no_new_cut() {
        let mosaic = Mosaic::new(&stock(100, 50));
        let demand = TileDimensions::new(2, 100, 50);
        let outcome = mosaic.add(&demand, FirstCutOrientation::Both, 0, 10, false);
        assert_eq!(outcome.mosaics.len(), 1);
        let placed = &outcome.mosaics[0];
        assert_eq!(placed.cuts.len(), 0);
        assert_eq!(placed.used_area_ratio(), 1.0);
    }

    #[test]
    fn inexact_fit_emits_one_vertical_cut() {
        let mosaic = Mosaic::new(&stock(100, 50));
        let demand = TileDimensions::new(2, 60, 50);
        let outcome = mosaic.add(&demand, FirstCutOrientation::Horizontal, 0, 10, false);
        assert_eq!(outcome.mosaics.len(), 1);
        let placed = &outcome.mosaics[0];
        assert_eq!(placed.cuts.len(), 1);
        assert!(!placed.cuts[0].is_horizontal);
        assert_eq!(placed.used_area(), 3000);
        assert_eq!(placed.unused_area(), 2000);
    }

    #[test]
    fn kerf_is_consumed_as_waste() {
        let mosaic = Mosaic::new(&stock(100, 10));
        let demand = TileDimensions::new(2, 45, 10);
        let outcome = mosaic.add(&demand, FirstCutOrientation::Horizontal, 10, 0, false);
        let placed = &outcome.mosaics[0];
        assert_eq!(placed.used_area(), 450);
        // second placement should land on the leftover leaf
        let second = placed.add(&demand, FirstCutOrientation::Horizontal, 10, 0, false);
        let final_mosaic = second
            .mosaics
            .iter()
            .find(|m| m.used_area() == 900)
            .expect("second panel placed");
        assert_eq!(final_mosaic.used_area_ratio(), 0.9);
    }

    #[test]
    fn min_trim_blocks_placement_leaving_too_thin_an_offcut() {
        let mosaic = Mosaic::new(&stock(100, 100));
        let demand = TileDimensions::new(2, 95, 100);
        let outcome = mosaic.add(&demand, FirstCutOrientation::Both, 0, 10, false);
        assert!(outcome.mosaics.is_empty());
        assert!(outcome.min_trim_influenced);
    }

    #[test]
    fn rotation_is_tried_when_orientation_does_not_allow_exact_fit() {
        let mosaic = Mosaic::new(&stock(50, 100));
        let demand = TileDimensions::new(2, 100, 50);
        let outcome = mosaic.add(&demand, FirstCutOrientation::Both, 0, 10, false);
        let rotated = outcome
            .mosaics
            .iter()
            .find(|m| m.used_area_ratio() == 1.0)
            .expect("rotated exact fit found");
        let leaf = rotated.root.final_leaves()[0];
        assert!(leaf.is_rotated);
    }
}
