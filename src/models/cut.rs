//! `Cut` — an immutable record of one guillotine split (spec.md §3, §4.4.1).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cut {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub original_width: i32,
    pub original_height: i32,
    pub is_horizontal: bool,
    pub cut_coord: i32,
    pub original_tile_id: i32,
    pub child1_tile_id: i32,
    pub child2_tile_id: i32,
}

impl Cut {
    pub fn length(&self) -> i64 {
        (self.x2 - self.x1).unsigned_abs() as i64 + (self.y2 - self.y1).unsigned_abs() as i64
    }
}

#[derive(Debug, Default)]
pub struct CutBuilder {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    original_width: i32,
    original_height: i32,
    is_horizontal: bool,
    cut_coord: i32,
    original_tile_id: i32,
    child1_tile_id: i32,
    child2_tile_id: i32,
}

impl CutBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x1(mut self, v: i32) -> Self {
        self.x1 = v;
        self
    }
    pub fn y1(mut self, v: i32) -> Self {
        self.y1 = v;
        self
    }
    pub fn x2(mut self, v: i32) -> Self {
        self.x2 = v;
        self
    }
    pub fn y2(mut self, v: i32) -> Self {
        self.y2 = v;
        self
    }
    pub fn original_width(mut self, v: i32) -> Self {
        self.original_width = v;
        self
    }
    pub fn original_height(mut self, v: i32) -> Self {
        self.original_height = v;
        self
    }
    pub fn is_horizontal(mut self, v: bool) -> Self {
        self.is_horizontal = v;
        self
    }
    pub fn cut_coord(mut self, v: i32) -> Self {
        self.cut_coord = v;
        self
    }
    pub fn original_tile_id(mut self, v: i32) -> Self {
        self.original_tile_id = v;
        self
    }
    pub fn child1_tile_id(mut self, v: i32) -> Self {
        self.child1_tile_id = v;
        self
    }
    pub fn child2_tile_id(mut self, v: i32) -> Self {
        self.child2_tile_id = v;
        self
    }

    pub fn build(self) -> Cut {
        Cut {
            x1: self.x1,
            y1: self.y1,
            x2: self.x2,
            y2: self.y2,
            original_width: self.original_width,
            original_height: self.original_height,
            is_horizontal: self.is_horizontal,
            cut_coord: self.cut_coord,
            original_tile_id: self.original_tile_id,
            child1_tile_id: self.child1_tile_id,
            child2_tile_id: self.child2_tile_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_is_manhattan_length_of_the_cut_segment() {
        let cut = CutBuilder::new().x1(0).y1(0).x2(0).y2(50).build();
        assert_eq!(cut.length(), 50);
    }
}
