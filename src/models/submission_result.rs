//! `SubmissionResult` — the reply to `Service::submit_task` (spec.md §6).

use crate::models::enums::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub status_code: StatusCode,
    pub task_id: Option<String>,
}

impl SubmissionResult {
    pub fn ok(task_id: impl Into<String>) -> Self {
        Self {
            status_code: StatusCode::Ok,
            task_id: Some(task_id.into()),
        }
    }

    pub fn rejected(status_code: StatusCode) -> Self {
        Self {
            status_code,
            task_id: None,
        }
    }
}
