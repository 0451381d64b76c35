//! `Task` — per-submission state shared between the driver threads, the
//! workers and `getTaskStatus` (spec.md §3, §5).

use crate::models::enums::Status;
use crate::models::request::CalculationRequest;
use crate::models::response::CalculationResponse;
use crate::models::solution::Solution;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Default)]
struct ThreadCounters {
    running: AtomicUsize,
    queued: AtomicUsize,
    finished: AtomicUsize,
    error: AtomicUsize,
}

/// Per-task lifecycle and shared-beam state. Status and counters use
/// atomics/`parking_lot` locks so workers can read/write from any thread
/// without the task itself needing an outer lock (spec.md §9 "status
/// flags as shared state").
pub struct Task {
    pub id: String,
    pub client_id: Option<String>,
    pub request: CalculationRequest,
    pub factor: i64,
    pub start_time: Instant,
    end_time: Mutex<Option<Instant>>,
    last_queried: Mutex<Instant>,
    status: RwLock<Status>,
    /// material -> ordered beam of candidate solutions, best first.
    beams: Mutex<HashMap<String, Vec<Solution>>>,
    percentage_done: Mutex<HashMap<String, u8>>,
    init_percentage: AtomicU8,
    /// material -> (thread group -> times it ranked in the task's top 5).
    thread_group_rankings: Mutex<HashMap<String, HashMap<String, i64>>>,
    log: Mutex<Vec<String>>,
    cached_response: Mutex<Option<CalculationResponse>>,
    threads: ThreadCounters,
    pub is_min_trim_dimension_influenced: AtomicBool,
    solution_found_at: Mutex<Option<Instant>>,
}

impl Task {
    pub fn new(id: String, request: CalculationRequest, factor: i64) -> Self {
        let client_id = request.client_info.as_ref().map(|c| c.id.clone());
        let now = Instant::now();
        Self {
            id,
            client_id,
            request,
            factor,
            start_time: now,
            end_time: Mutex::new(None),
            last_queried: Mutex::new(now),
            status: RwLock::new(Status::Idle),
            beams: Mutex::new(HashMap::new()),
            percentage_done: Mutex::new(HashMap::new()),
            init_percentage: AtomicU8::new(0),
            thread_group_rankings: Mutex::new(HashMap::new()),
            log: Mutex::new(Vec::new()),
            cached_response: Mutex::new(None),
            threads: ThreadCounters::default(),
            is_min_trim_dimension_influenced: AtomicBool::new(false),
            solution_found_at: Mutex::new(None),
        }
    }

    pub fn status(&self) -> Status {
        *self.status.read()
    }

    pub fn is_running(&self) -> bool {
        self.status() == Status::Running
    }

    pub fn set_running(&self) {
        *self.status.write() = Status::Running;
    }

    /// Idempotent: stopping a non-running task just returns the current
    /// status without mutation (spec.md §8 idempotence).
    pub fn stop(&self) -> Status {
        let mut guard = self.status.write();
        if *guard == Status::Running {
            *guard = Status::Stopped;
            *self.end_time.lock() = Some(Instant::now());
        }
        *guard
    }

    pub fn terminate(&self) -> Status {
        let mut guard = self.status.write();
        if *guard == Status::Running {
            *guard = Status::Terminated;
            *self.end_time.lock() = Some(Instant::now());
        }
        *guard
    }

    pub fn terminate_error(&self, reason: impl Into<String>) {
        let mut guard = self.status.write();
        *guard = Status::Error;
        *self.end_time.lock() = Some(Instant::now());
        drop(guard);
        self.append_log(format!("terminated with error: {}", reason.into()));
    }

    pub fn append_log(&self, line: impl Into<String>) {
        self.log.lock().push(line.into());
    }

    pub fn log_snapshot(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    pub fn touch_last_queried(&self) {
        *self.last_queried.lock() = Instant::now();
    }

    pub fn last_queried(&self) -> Instant {
        *self.last_queried.lock()
    }

    pub fn end_time(&self) -> Option<Instant> {
        *self.end_time.lock()
    }

    pub fn elapsed(&self) -> std::time::Duration {
        match self.end_time() {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    pub fn solution_elapsed(&self) -> std::time::Duration {
        match *self.solution_found_at.lock() {
            Some(found) => found.duration_since(self.start_time),
            None => std::time::Duration::ZERO,
        }
    }

    // --- Beam access ---

    /// Merge `local_beam` into the task's shared beam for `material` under
    /// the beam monitor, then sort by the final comparator chain and
    /// truncate to `k` (spec.md §4.4 step 3).
    pub fn merge_beam<F>(&self, material: &str, local_beam: Vec<Solution>, k: usize, mut sort_key: F)
    where
        F: FnMut(&Solution, &Solution) -> std::cmp::Ordering,
    {
        let mut beams = self.beams.lock();
        let entry = beams.entry(material.to_string()).or_default();
        entry.extend(local_beam);
        entry.sort_by(|a, b| sort_key(a, b));
        crate::engine::beam::truncate_with_off_by_one(entry, k);
        if entry.iter().any(|s| s.is_all_fit()) && self.solution_found_at.lock().is_none() {
            *self.solution_found_at.lock() = Some(Instant::now());
        }
        let top_groups: Vec<String> = entry.iter().take(5).map(|s| s.creator_thread_group.clone()).collect();
        drop(beams);
        for group in top_groups {
            self.record_top_ranking(material, &group);
        }
    }

    pub fn beam_len(&self, material: &str) -> usize {
        self.beams
            .lock()
            .get(material)
            .map(|b| b.len())
            .unwrap_or(0)
    }

    pub fn best_solution(&self, material: &str) -> Option<Solution> {
        self.beams
            .lock()
            .get(material)
            .and_then(|b| b.first())
            .cloned()
    }

    pub fn all_materials_best(&self) -> Vec<Solution> {
        self.beams.lock().values().filter_map(|b| b.first().cloned()).collect()
    }

    pub fn has_all_fit_solution(&self, material: &str) -> bool {
        self.best_solution(material)
            .map(|s| s.is_all_fit())
            .unwrap_or(false)
    }

    pub fn smallest_all_fit_area(&self, material: &str) -> Option<i64> {
        self.beams.lock().get(material).and_then(|b| {
            b.iter()
                .filter(|s| s.is_all_fit() && s.mosaics.len() == 1)
                .map(|s| s.mosaics[0].root.area())
                .min()
        })
    }

    // --- Progress ---

    pub fn set_percentage(&self, material: &str, pct: u8) {
        self.percentage_done
            .lock()
            .insert(material.to_string(), crate::utils::math::clamp(pct, 0, 100));
    }

    pub fn overall_percentage_done(&self) -> u8 {
        let map = self.percentage_done.lock();
        if map.is_empty() {
            return 0;
        }
        let sum: u32 = map.values().map(|&v| v as u32).sum();
        (sum / map.len() as u32) as u8
    }

    pub fn note_init_percentage(&self, pct: u8) {
        self.init_percentage.fetch_max(pct, Ordering::Relaxed);
    }

    pub fn init_percentage(&self) -> u8 {
        self.init_percentage.load(Ordering::Relaxed)
    }

    /// Advance to FINISHED iff every material this task tracks has reached
    /// 100% (spec.md §3 Task lifecycle).
    pub fn check_if_finished(&self, materials: &[String]) {
        let map = self.percentage_done.lock();
        let all_done = materials.iter().all(|m| map.get(m).copied().unwrap_or(0) >= 100);
        drop(map);
        if all_done {
            let mut guard = self.status.write();
            if *guard == Status::Running {
                *guard = Status::Finished;
                drop(guard);
                *self.end_time.lock() = Some(Instant::now());
            }
        }
    }

    // --- Thread-group rankings (spec.md §4.4.2 group eligibility gate) ---

    pub fn record_top_ranking(&self, material: &str, group: &str) {
        let mut map = self.thread_group_rankings.lock();
        *map.entry(material.to_string())
            .or_default()
            .entry(group.to_string())
            .or_insert(0) += 1;
    }

    /// Eligibility gate: always eligible until the material has at least
    /// `warmup` finished threads; afterwards eligible iff this group's
    /// share exceeds 1/5 of the total.
    pub fn group_eligible(&self, material: &str, group: &str, finished_threads: usize, warmup: usize) -> bool {
        if finished_threads < warmup {
            return true;
        }
        let map = self.thread_group_rankings.lock();
        let Some(groups) = map.get(material) else {
            return true;
        };
        let total: i64 = groups.values().sum();
        if total == 0 {
            return true;
        }
        let mine = groups.get(group).copied().unwrap_or(0);
        mine * 5 > total
    }

    // --- Thread counters ---

    pub fn thread_queued(&self) {
        self.threads.queued.fetch_add(1, Ordering::SeqCst);
    }

    pub fn thread_started(&self) {
        self.threads.queued.fetch_sub(1, Ordering::SeqCst);
        self.threads.running.fetch_add(1, Ordering::SeqCst);
    }

    pub fn thread_finished(&self) {
        self.threads.running.fetch_sub(1, Ordering::SeqCst);
        self.threads.finished.fetch_add(1, Ordering::SeqCst);
    }

    pub fn thread_errored(&self) {
        self.threads.running.fetch_sub(1, Ordering::SeqCst);
        self.threads.error.fetch_add(1, Ordering::SeqCst);
    }

    /// Roll back a `thread_queued()` count when the worker pool's bounded
    /// queue rejects the job before it ever starts (spec.md §4.1
    /// rejection policy).
    pub fn thread_rejected(&self) {
        self.threads.queued.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn nbr_running_threads(&self) -> usize {
        self.threads.running.load(Ordering::SeqCst)
    }

    pub fn nbr_queued_threads(&self) -> usize {
        self.threads.queued.load(Ordering::SeqCst)
    }

    pub fn nbr_finished_threads(&self) -> usize {
        self.threads.finished.load(Ordering::SeqCst)
    }

    pub fn nbr_error_threads(&self) -> usize {
        self.threads.error.load(Ordering::SeqCst)
    }

    pub fn has_active_threads(&self) -> bool {
        self.nbr_running_threads() > 0 || self.nbr_queued_threads() > 0
    }

    pub fn cache_response(&self, response: CalculationResponse) {
        *self.cached_response.lock() = Some(response);
    }

    pub fn cached_response(&self) -> Option<CalculationResponse> {
        self.cached_response.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::configuration::Configuration;

    fn task() -> Task {
        let request = CalculationRequest {
            panels: vec![],
            stock_panels: vec![],
            configuration: Configuration::default(),
            client_info: None,
        };
        Task::new("t1".to_string(), request, 1)
    }

    #[test]
    fn stop_on_non_running_task_is_a_no_op() {
        let t = task();
        assert_eq!(t.status(), Status::Idle);
        assert_eq!(t.stop(), Status::Idle);
    }

    #[test]
    fn check_if_finished_requires_every_material_at_100() {
        let t = task();
        t.set_running();
        t.set_percentage("wood", 100);
        t.set_percentage("metal", 50);
        t.check_if_finished(&["wood".to_string(), "metal".to_string()]);
        assert_eq!(t.status(), Status::Running);
        t.set_percentage("metal", 100);
        t.check_if_finished(&["wood".to_string(), "metal".to_string()]);
        assert_eq!(t.status(), Status::Finished);
    }

    #[test]
    fn group_eligibility_has_a_warmup_period() {
        let t = task();
        assert!(t.group_eligible("wood", "AREA", 0, 10));
        t.record_top_ranking("wood", "AREA");
        for _ in 0..10 {
            t.record_top_ranking("wood", "AREA_HCUTS_1ST");
        }
        assert!(!t.group_eligible("wood", "AREA", 10, 10));
    }
}
