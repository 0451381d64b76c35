//! Process-wide identifier generation shared by tile nodes and solutions.

use std::sync::atomic::{AtomicI32, AtomicI64, Ordering};

static NEXT_TILE_NODE_ID: AtomicI32 = AtomicI32::new(0);
static NEXT_SOLUTION_ID: AtomicI64 = AtomicI64::new(0);

/// Next id in the `TileNode` id sequence.
pub fn next_tile_node_id() -> i32 {
    NEXT_TILE_NODE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Next id in the `Solution` id sequence.
pub fn next_solution_id() -> i64 {
    NEXT_SOLUTION_ID.fetch_add(1, Ordering::Relaxed)
}

/// Material tag used when a panel or stock sheet does not specify one.
pub const DEFAULT_MATERIAL: &str = "DEFAULT_MATERIAL";

/// Upper bound on an externally supplied panel id.
pub const MAX_EXTERNAL_ID: i32 = 999;
