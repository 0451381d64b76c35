//! `TaskStatusResponse` — the reply to `Service::get_task_status` (spec.md §6).

use crate::models::enums::Status;
use crate::models::response::CalculationResponse;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatusResponse {
    pub status: Status,
    pub percentage_done: u8,
    /// Max per-thread progress; lets clients show early progress before
    /// the overall percentage counter ticks (spec.md §4.1).
    pub init_percentage: u8,
    pub solution: Option<CalculationResponse>,
}
