//! `GroupedTileDimensions` — a `TileDimensions` tagged with a group index
//! used to bound permutation explosion (spec.md §3, §4.3 step 1).

use crate::models::tile::TileDimensions;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone)]
pub struct GroupedTileDimensions {
    pub tile_dimensions: TileDimensions,
    pub group: i32,
}

impl GroupedTileDimensions {
    pub fn new(tile_dimensions: TileDimensions, group: i32) -> Self {
        Self {
            tile_dimensions,
            group,
        }
    }

    pub fn id(&self) -> i32 {
        self.tile_dimensions.id
    }

    pub fn width(&self) -> i32 {
        self.tile_dimensions.width
    }

    pub fn height(&self) -> i32 {
        self.tile_dimensions.height
    }

    pub fn area(&self) -> i64 {
        self.tile_dimensions.area()
    }

    pub fn fits(&self, width: i32, height: i32) -> bool {
        self.tile_dimensions.fits(width, height)
    }

    pub fn rotate90(&self) -> GroupedTileDimensions {
        GroupedTileDimensions::new(self.tile_dimensions.rotate90(), self.group)
    }
}

impl PartialEq for GroupedTileDimensions {
    fn eq(&self, other: &Self) -> bool {
        self.tile_dimensions == other.tile_dimensions && self.group == other.group
    }
}
impl Eq for GroupedTileDimensions {}

impl Hash for GroupedTileDimensions {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tile_dimensions.hash(state);
        self.group.hash(state);
    }
}

impl std::fmt::Display for GroupedTileDimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} (group {})",
            self.tile_dimensions.width, self.tile_dimensions.height, self.group
        )
    }
}
