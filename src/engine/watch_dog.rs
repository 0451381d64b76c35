//! The WatchDog (spec.md §4.2): a 5-second loop that reports on every
//! registered task, force-terminates tasks whose workers are all erroring,
//! and enforces the soft deadlines.

use crate::constants::WatchDogConstants;
use crate::engine::running_tasks::RunningTasks;
use crate::models::enums::Status;
use crate::models::stats::TaskReport;
use crate::models::task::Task;
use std::sync::Arc;

pub fn build_task_report(task: &Task) -> TaskReport {
    TaskReport {
        task_id: task.id.clone(),
        client_id: task.client_id.clone(),
        status: task.status(),
        nbr_running_threads: task.nbr_running_threads(),
        nbr_queued_threads: task.nbr_queued_threads(),
        nbr_total_threads: task.nbr_running_threads() + task.nbr_queued_threads() + task.nbr_finished_threads(),
        panel_count: task.request.enabled_panel_count() as usize,
        percentage_done: task.overall_percentage_done(),
        elapsed: format!("{:.1?}", task.elapsed()),
    }
}

/// Spawn the watchdog's dedicated thread; it loops forever until the
/// process exits (spec.md §5 "The WatchDog runs on its own dedicated
/// thread").
pub fn spawn(running_tasks: Arc<RunningTasks>) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || loop {
        std::thread::sleep(WatchDogConstants::LOOP_INTERVAL);
        run_once(&running_tasks);
    })
}

pub fn run_once(running_tasks: &RunningTasks) {
    let tasks = running_tasks.snapshot();

    metrics::gauge!("cutlist_running_tasks").set(tasks.len() as f64);
    metrics::gauge!("cutlist_running_threads")
        .set(tasks.iter().map(|t| t.nbr_running_threads()).sum::<usize>() as f64);

    for task in &tasks {
        let report = build_task_report(task);
        tracing::info!(
            task_id = %report.task_id,
            status = %report.status,
            running = report.nbr_running_threads,
            queued = report.nbr_queued_threads,
            pct = report.percentage_done,
            "watchdog report"
        );

        if task.is_running()
            && task.nbr_finished_threads() == 0
            && task.nbr_error_threads() > WatchDogConstants::MAX_ERROR_THREADS
        {
            task.terminate_error("every spawned worker errored");
            metrics::counter!("cutlist_tasks_error_terminated").increment(1);
        }
    }

    for task in &tasks {
        cleanup_one(running_tasks, task);
    }
}

fn cleanup_one(running_tasks: &RunningTasks, task: &Arc<Task>) {
    let status = task.status();

    if status.is_terminal() {
        if let Some(end) = task.end_time() {
            if end.elapsed() > WatchDogConstants::TERMINAL_TASK_RETENTION {
                running_tasks.archive(&task.id);
            }
        }
        return;
    }

    if status != Status::Running {
        return;
    }

    let has_all_fit = task
        .request
        .materials()
        .iter()
        .any(|m| task.has_all_fit_solution(m));
    if has_all_fit && task.elapsed() > WatchDogConstants::ALL_FIT_GRACE_PERIOD {
        task.terminate();
        return;
    }

    if task.elapsed() > WatchDogConstants::ABSOLUTE_TIMEOUT {
        task.terminate();
        return;
    }

    if task.last_queried().elapsed() > WatchDogConstants::CLIENT_SILENCE_TIMEOUT {
        task.terminate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::configuration::Configuration;
    use crate::models::request::CalculationRequest;

    fn task(id: &str) -> Arc<Task> {
        let request = CalculationRequest {
            panels: vec![],
            stock_panels: vec![],
            configuration: Configuration::default(),
            client_info: None,
        };
        Arc::new(Task::new(id.to_string(), request, 1))
    }

    #[test]
    fn error_threads_over_threshold_terminates_with_error() {
        let registry = RunningTasks::new();
        let t = task("t1");
        t.set_running();
        for _ in 0..(WatchDogConstants::MAX_ERROR_THREADS + 1) {
            t.thread_queued();
            t.thread_started();
            t.thread_errored();
        }
        registry.add_task(t.clone());
        run_once(&registry);
        assert_eq!(t.status(), crate::models::enums::Status::Error);
    }

    #[test]
    fn non_running_tasks_are_left_alone() {
        let registry = RunningTasks::new();
        let t = task("t1");
        registry.add_task(t.clone());
        run_once(&registry);
        assert_eq!(t.status(), crate::models::enums::Status::Idle);
    }
}
