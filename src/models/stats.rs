//! `Stats` — process-wide snapshot returned by `Service::get_stats` (spec.md §4.1, §6).

use crate::models::enums::Status;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskReport {
    pub task_id: String,
    pub client_id: Option<String>,
    pub status: Status,
    pub nbr_running_threads: usize,
    pub nbr_queued_threads: usize,
    pub nbr_total_threads: usize,
    pub panel_count: usize,
    pub percentage_done: u8,
    pub elapsed: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    pub nbr_running_threads: usize,
    pub nbr_queued_threads: usize,
    pub nbr_finished_threads: usize,
    pub nbr_idle_tasks: usize,
    pub nbr_running_tasks: usize,
    pub nbr_finished_tasks: usize,
    pub nbr_stopped_tasks: usize,
    pub nbr_terminated_tasks: usize,
    pub nbr_error_tasks: usize,
    pub task_reports: Vec<TaskReport>,
}

impl Stats {
    pub fn total_tasks(&self) -> usize {
        self.nbr_idle_tasks
            + self.nbr_running_tasks
            + self.nbr_finished_tasks
            + self.nbr_stopped_tasks
            + self.nbr_terminated_tasks
            + self.nbr_error_tasks
    }

    pub fn total_threads(&self) -> usize {
        self.nbr_running_threads + self.nbr_queued_threads + self.nbr_finished_threads
    }

    pub fn is_busy(&self) -> bool {
        self.nbr_running_tasks > 0 || self.nbr_running_threads > 0
    }
}
