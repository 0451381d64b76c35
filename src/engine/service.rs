//! `Service` — the top-level facade (spec.md §4.1, §6): admission, task
//! lifecycle and the process-wide stats snapshot. Analogous to the
//! teacher's top-level runner, but fronting the cutting engine instead.

use crate::constants::MaterialConstants;
use crate::engine::pool::WorkerPool;
use crate::engine::running_tasks::RunningTasks;
use crate::engine::watch_dog;
use crate::engine::{material_driver, response_builder};
use crate::error::{OptimizerError, Result};
use crate::models::enums::{Status, StatusCode};
use crate::models::request::CalculationRequest;
use crate::models::stats::Stats;
use crate::models::submission_result::SubmissionResult;
use crate::models::task::Task;
use crate::models::task_status_response::TaskStatusResponse;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

pub struct Service {
    pool: Arc<WorkerPool>,
    running_tasks: Arc<RunningTasks>,
    task_sequence: AtomicI64,
    _watch_dog: std::thread::JoinHandle<()>,
}

impl Service {
    /// Bring the engine up: the bounded worker pool and the watchdog
    /// thread. `pool_size` defaults to the number of logical CPUs when
    /// `None` (spec.md §5).
    pub fn init(pool_size: Option<usize>) -> Arc<Self> {
        let pool_size = pool_size.unwrap_or_else(num_cpus::get);
        let pool = Arc::new(WorkerPool::new(
            pool_size,
            crate::constants::ConcurrencyConstants::WORKER_QUEUE_CAPACITY,
        ));
        let running_tasks = Arc::new(RunningTasks::new());
        let watch_dog = watch_dog::spawn(running_tasks.clone());
        Arc::new(Self {
            pool,
            running_tasks,
            task_sequence: AtomicI64::new(0),
            _watch_dog: watch_dog,
        })
    }

    /// Validate and admit a request, then spawn its material drivers on
    /// their own thread (spec.md §4.1 admission order).
    pub fn submit_task(self: &Arc<Self>, request: CalculationRequest) -> SubmissionResult {
        if request.enabled_panel_count() == 0 {
            metrics::counter!("cutlist_submissions_rejected").increment(1);
            return SubmissionResult::rejected(StatusCode::InvalidTiles);
        }
        if request.enabled_panel_count() > MaterialConstants::MAX_DEMAND_PANELS as i64 {
            metrics::counter!("cutlist_submissions_rejected").increment(1);
            return SubmissionResult::rejected(StatusCode::TooManyPanels);
        }
        if request.enabled_stock_count() == 0 {
            metrics::counter!("cutlist_submissions_rejected").increment(1);
            return SubmissionResult::rejected(StatusCode::InvalidStockTiles);
        }
        if request.enabled_stock_count() > MaterialConstants::MAX_STOCK_PANELS as i64 {
            metrics::counter!("cutlist_submissions_rejected").increment(1);
            return SubmissionResult::rejected(StatusCode::TooManyStockPanels);
        }

        if !request.configuration.allow_multiple_tasks_per_client {
            if let Some(client_id) = request.client_info.as_ref().map(|c| c.id.as_str()) {
                let running = self.running_tasks.running_count_for_client(client_id);
                if running >= request.configuration.performance_thresholds.max_simultaneous_tasks {
                    metrics::counter!("cutlist_submissions_rejected").increment(1);
                    return SubmissionResult::rejected(StatusCode::TaskAlreadyRunning);
                }
            }
        }

        metrics::counter!("cutlist_submissions_accepted").increment(1);
        let task_id = self.next_task_id();
        let factor = request.scale_factor();
        let task = Arc::new(Task::new(task_id.clone(), request, factor));
        self.running_tasks.add_task(task.clone());

        let pool = self.pool.clone();
        std::thread::spawn(move || Self::drive(task, pool));

        SubmissionResult::ok(task_id)
    }

    /// `yyyyMMddHHmm` followed by a monotonic sequence number, unique
    /// within this process (spec.md §3 task id format).
    fn next_task_id(&self) -> String {
        let now = chrono::Local::now().format("%Y%m%d%H%M");
        let seq = self.task_sequence.fetch_add(1, Ordering::SeqCst);
        format!("{now}{seq}")
    }

    fn drive(task: Arc<Task>, pool: Arc<WorkerPool>) {
        let materials = Arc::new(task.request.materials());
        if materials.is_empty() {
            task.terminate_error("no materials present in request");
            return;
        }

        let mut handles = Vec::new();
        for material in materials.iter().cloned() {
            let demand: Vec<_> = task
                .request
                .panels
                .iter()
                .filter(|p| p.is_valid() && p.material() == material)
                .flat_map(|p| p.expand(task.factor))
                .collect();
            let stock: Vec<_> = task
                .request
                .stock_panels
                .iter()
                .filter(|p| p.is_valid() && p.material() == material)
                .flat_map(|p| p.expand(task.factor))
                .collect();

            let task = task.clone();
            let pool = pool.clone();
            let materials = materials.clone();
            handles.push(std::thread::spawn(move || {
                material_driver::run(task, material, demand, stock, materials, pool);
            }));
        }

        for handle in handles {
            let _ = handle.join();
        }
        task.check_if_finished(&materials);
    }

    pub fn get_task_status(&self, task_id: &str) -> Result<TaskStatusResponse> {
        let task = self
            .running_tasks
            .find(task_id)
            .ok_or_else(|| OptimizerError::TaskNotFound(task_id.to_string()))?;
        task.touch_last_queried();

        let response = response_builder::build_response(&task);
        task.cache_response(response.clone());

        Ok(TaskStatusResponse {
            status: task.status(),
            percentage_done: task.overall_percentage_done(),
            init_percentage: task.init_percentage(),
            solution: Some(response),
        })
    }

    pub fn stop_task(&self, task_id: &str) -> Result<Status> {
        let task = self
            .running_tasks
            .find(task_id)
            .ok_or_else(|| OptimizerError::TaskNotFound(task_id.to_string()))?;
        Ok(task.stop())
    }

    pub fn terminate_task(&self, task_id: &str) -> Result<Status> {
        let task = self
            .running_tasks
            .find(task_id)
            .ok_or_else(|| OptimizerError::TaskNotFound(task_id.to_string()))?;
        Ok(task.terminate())
    }

    pub fn get_stats(&self) -> Stats {
        let tasks = self.running_tasks.snapshot();
        let mut stats = Stats::default();

        for task in &tasks {
            stats.nbr_running_threads += task.nbr_running_threads();
            stats.nbr_queued_threads += task.nbr_queued_threads();
            stats.nbr_finished_threads += task.nbr_finished_threads();
            match task.status() {
                Status::Idle | Status::Queued => stats.nbr_idle_tasks += 1,
                Status::Running => stats.nbr_running_tasks += 1,
                Status::Finished => stats.nbr_finished_tasks += 1,
                Status::Stopped => stats.nbr_stopped_tasks += 1,
                Status::Terminated => stats.nbr_terminated_tasks += 1,
                Status::Error => stats.nbr_error_tasks += 1,
            }
            stats.task_reports.push(watch_dog::build_task_report(task));
        }

        stats.nbr_finished_tasks += self.running_tasks.archived_finished();
        stats.nbr_stopped_tasks += self.running_tasks.archived_stopped();
        stats.nbr_terminated_tasks += self.running_tasks.archived_terminated();
        stats.nbr_error_tasks += self.running_tasks.archived_error();

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::configuration::Configuration;
    use crate::models::panel::Panel;

    fn request() -> CalculationRequest {
        CalculationRequest {
            panels: vec![Panel::new(1, "100", "50", 1)],
            stock_panels: vec![Panel::new(10, "200", "100", 1)],
            configuration: Configuration::default(),
            client_info: None,
        }
    }

    #[test]
    fn rejects_empty_demand() {
        let service = Service::init(Some(1));
        let mut req = request();
        req.panels.clear();
        let result = service.submit_task(req);
        assert_eq!(result.status_code, StatusCode::InvalidTiles);
        assert!(result.task_id.is_none());
    }

    #[test]
    fn rejects_empty_stock() {
        let service = Service::init(Some(1));
        let mut req = request();
        req.stock_panels.clear();
        let result = service.submit_task(req);
        assert_eq!(result.status_code, StatusCode::InvalidStockTiles);
    }

    #[test]
    fn unknown_task_id_is_not_found() {
        let service = Service::init(Some(1));
        assert!(service.get_task_status("nope").is_err());
    }

    #[test]
    fn accepted_submission_registers_a_task() {
        let service = Service::init(Some(1));
        let result = service.submit_task(request());
        assert_eq!(result.status_code, StatusCode::Ok);
        assert!(result.task_id.is_some());
    }
}
