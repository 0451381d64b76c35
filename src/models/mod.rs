//! The data model (spec.md §3): geometry primitives, the mosaic/solution
//! aggregates, the task and its wire-facing request/response shapes.

pub mod configuration;
pub mod cut;
pub mod enums;
pub mod grouped_tile;
pub mod mosaic;
pub mod panel;
pub mod request;
pub mod response;
pub mod solution;
pub mod stats;
pub mod submission_result;
pub mod task;
pub mod task_status_response;
pub mod tile;

pub use configuration::{Configuration, PerformanceThresholds};
pub use cut::{Cut, CutBuilder};
pub use enums::{
    CutOrientationPreference, FirstCutOrientation, OptimizationPriority, Orientation, Status,
    StatusCode,
};
pub use grouped_tile::GroupedTileDimensions;
pub use mosaic::Mosaic;
pub use panel::{ClientInfo, Edge, Panel};
pub use request::CalculationRequest;
pub use response::CalculationResponse;
pub use solution::Solution;
pub use stats::Stats;
pub use submission_result::SubmissionResult;
pub use task::Task;
pub use task_status_response::TaskStatusResponse;
pub use tile::{Tile, TileDimensions, TileNode};
