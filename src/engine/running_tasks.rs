//! `RunningTasks` — the process-wide task registry (spec.md §3, §5).
//! Deliberately not a singleton: callers hold an `Arc<RunningTasks>` and
//! construct fresh instances in tests (spec.md §9 "Singletons").

use crate::models::enums::Status;
use crate::models::task::Task;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct ArchivedCounters {
    finished: AtomicUsize,
    stopped: AtomicUsize,
    terminated: AtomicUsize,
    error: AtomicUsize,
}

pub struct RunningTasks {
    tasks: DashMap<String, Arc<Task>>,
    archived: ArchivedCounters,
}

impl Default for RunningTasks {
    fn default() -> Self {
        Self::new()
    }
}

impl RunningTasks {
    pub fn new() -> Self {
        Self {
            tasks: DashMap::new(),
            archived: ArchivedCounters::default(),
        }
    }

    pub fn add_task(&self, task: Arc<Task>) {
        self.tasks.insert(task.id.clone(), task);
    }

    pub fn find(&self, task_id: &str) -> Option<Arc<Task>> {
        self.tasks.get(task_id).map(|entry| entry.value().clone())
    }

    pub fn snapshot(&self) -> Vec<Arc<Task>> {
        self.tasks.iter().map(|entry| entry.value().clone()).collect()
    }

    pub fn running_count_for_client(&self, client_id: &str) -> usize {
        self.tasks
            .iter()
            .filter(|entry| entry.is_running() && entry.client_id.as_deref() == Some(client_id))
            .count()
    }

    /// Drop one terminal task from the registry, moving its count into the
    /// matching archived counter (spec.md §4.2 cleanup pass).
    pub fn archive(&self, task_id: &str) {
        let Some((_, task)) = self.tasks.remove(task_id) else {
            return;
        };
        match task.status() {
            Status::Finished => self.archived.finished.fetch_add(1, Ordering::Relaxed),
            Status::Stopped => self.archived.stopped.fetch_add(1, Ordering::Relaxed),
            Status::Terminated => self.archived.terminated.fetch_add(1, Ordering::Relaxed),
            Status::Error => self.archived.error.fetch_add(1, Ordering::Relaxed),
            _ => 0,
        };
    }

    pub fn archived_finished(&self) -> usize {
        self.archived.finished.load(Ordering::Relaxed)
    }

    pub fn archived_stopped(&self) -> usize {
        self.archived.stopped.load(Ordering::Relaxed)
    }

    pub fn archived_terminated(&self) -> usize {
        self.archived.terminated.load(Ordering::Relaxed)
    }

    pub fn archived_error(&self) -> usize {
        self.archived.error.load(Ordering::Relaxed)
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
    fn archive_moves_a_terminal_task_into_its_counter() {
        let registry = RunningTasks::new();
        let t = task("t1");
        t.set_running();
        t.stop();
        registry.add_task(t);
        registry.archive("t1");
        assert!(registry.find("t1").is_none());
        assert_eq!(registry.archived_stopped(), 1);
    }

    #[test]
    fn fresh_instances_are_independent() {
        let a = RunningTasks::new();
        let b = RunningTasks::new();
        a.add_task(task("t1"));
        assert!(a.find("t1").is_some());
        assert!(b.find("t1").is_none());
    }
}
