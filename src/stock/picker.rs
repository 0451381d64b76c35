//! `StockPanelPicker` — the sorter thread and the consumer-facing
//! `get_stock_solution` call (spec.md §4.5).

use crate::constants::StockConstants;
use crate::models::task::Task;
use crate::models::tile::TileDimensions;
use crate::stock::bundle::StockBundle;
use crate::stock::generator::{GeneratorOutcome, StockBundleGenerator};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::JoinHandle;

pub struct StockPanelPicker {
    solutions: Arc<Mutex<Vec<StockBundle>>>,
    sorter_handle: Option<JoinHandle<()>>,
}

impl StockPanelPicker {
    /// Spawn the sorter thread immediately; it runs until the task stops,
    /// an all-fit solution exists with enough bundles generated, or the
    /// generator is exhausted (spec.md §4.5 sorter thread).
    pub fn spawn(demand: &[TileDimensions], stock: &[TileDimensions], material: String, task: Arc<Task>) -> Self {
        let solutions: Arc<Mutex<Vec<StockBundle>>> = Arc::new(Mutex::new(Vec::new()));
        let mut generator = StockBundleGenerator::new(demand, stock, None);

        let sorter_solutions = solutions.clone();
        let handle = std::thread::spawn(move || {
            let mut total_generated = 0usize;
            loop {
                if !task.is_running() {
                    break;
                }
                if task.has_all_fit_solution(&material)
                    && total_generated >= StockConstants::MIN_BUNDLES_WITH_ALL_FIT_SOLUTION
                {
                    break;
                }

                match generator.next() {
                    GeneratorOutcome::Bundle(bundle) => {
                        total_generated += 1;
                        let mut guard = sorter_solutions.lock();
                        insert_sorted(&mut guard, bundle.clone());
                        if !bundle.is_uniform_dimensions() {
                            insert_sorted(&mut guard, bundle.sorted_descending());
                        }
                    }
                    GeneratorOutcome::Exhausted => break,
                }
            }
        });

        Self {
            solutions,
            sorter_handle: Some(handle),
        }
    }

    /// Block (polling every second) until `solutions[i]` exists, or the
    /// sorter thread has finished producing and never will (spec.md §4.5
    /// "getStockSolution").
    pub fn get_stock_solution(&self, i: usize) -> Option<StockBundle> {
        loop {
            if let Some(bundle) = self.solutions.lock().get(i).cloned() {
                return Some(bundle);
            }
            if self.sorter_handle.as_ref().is_some_and(|h| h.is_finished()) {
                return self.solutions.lock().get(i).cloned();
            }
            std::thread::sleep(StockConstants::POLL_INTERVAL);
        }
    }

    pub fn bundle_count(&self) -> usize {
        self.solutions.lock().len()
    }
}

fn insert_sorted(solutions: &mut Vec<StockBundle>, bundle: StockBundle) {
    let area = bundle.total_area();
    let pos = solutions.partition_point(|b| b.total_area() <= area);
    solutions.insert(pos, bundle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::configuration::Configuration;
    use crate::models::request::CalculationRequest;

    fn tile(id: i32, w: i32, h: i32) -> TileDimensions {
        TileDimensions::new(id, w, h)
    }

    fn idle_task() -> Arc<Task> {
        let request = CalculationRequest {
            panels: vec![],
            stock_panels: vec![],
            configuration: Configuration::default(),
            client_info: None,
        };
        Arc::new(Task::new("t1".to_string(), request, 1))
    }

    #[test]
    fn idle_task_stops_picker_immediately() {
        let task = idle_task();
        let demand = vec![tile(1, 50, 50)];
        let stock = vec![tile(10, 100, 100)];
        let picker = StockPanelPicker::spawn(&demand, &stock, "wood".to_string(), task);
        // Task never ran, so the sorter exits on its first check; the
        // join handle finishing is what unblocks a consumer past the end.
        assert!(picker.get_stock_solution(1_000_000).is_none() || picker.bundle_count() <= 1);
    }
}
