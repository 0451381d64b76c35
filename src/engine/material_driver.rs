//! The per-material driver (spec.md §4.3): groups demand, generates
//! permutations, starts the stock picker, and spawns permutation workers
//! that each submit up to three `CutListWorker` jobs per stock bundle.

use crate::comparator::priority_list_factory::PriorityListFactory;
use crate::comparator::MultiCriteriaComparator;
use crate::constants::{ConcurrencyConstants, EngineConstants};
use crate::engine::pool::WorkerPool;
use crate::engine::{grouping, permutation};
use crate::engine::worker::CutListWorker;
use crate::models::configuration::Configuration;
use crate::models::enums::FirstCutOrientation;
use crate::models::task::Task;
use crate::models::tile::TileDimensions;
use crate::stock::picker::StockPanelPicker;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Throttles how many permutation-worker threads may be alive at once,
/// per the `maxSimultaneousThreads` configuration (spec.md §5).
struct PermutationSpawner {
    alive: Arc<AtomicUsize>,
    max_simultaneous: usize,
    poll_interval: Duration,
}

impl PermutationSpawner {
    fn new(max_simultaneous: usize, poll_interval: Duration) -> Self {
        Self {
            alive: Arc::new(AtomicUsize::new(0)),
            max_simultaneous: max_simultaneous.max(1),
            poll_interval,
        }
    }

    fn spawn<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        while self.alive.load(Ordering::SeqCst) >= self.max_simultaneous {
            std::thread::sleep(self.poll_interval);
        }
        self.alive.fetch_add(1, Ordering::SeqCst);
        let alive = self.alive.clone();
        std::thread::spawn(move || {
            f();
            alive.fetch_sub(1, Ordering::SeqCst);
        });
    }

    fn has_unfinished(&self) -> bool {
        self.alive.load(Ordering::SeqCst) > 0
    }
}

/// Drive one material's whole optimization run to completion. Blocks the
/// calling thread until the material's share of the task is done.
pub fn run(
    task: Arc<Task>,
    material: String,
    demand: Vec<TileDimensions>,
    stock: Vec<TileDimensions>,
    all_materials: Arc<Vec<String>>,
    pool: Arc<WorkerPool>,
) {
    let config = task.request.configuration.clone();

    let grouped = grouping::group_demand(&demand, &stock);
    let permutations = permutation::generate_permutations(&grouped);
    let permutation_count = permutations.len().max(1);

    let picker = Arc::new(StockPanelPicker::spawn(&demand, &stock, material.clone(), task.clone()));
    let comparator = Arc::new(MultiCriteriaComparator::new(PriorityListFactory::build(
        config.optimization_priority,
    )));
    let beam_width = config.accuracy(demand.len());

    task.set_percentage(&material, 0);
    task.set_running();

    let thresholds = config.performance_thresholds;
    let spawner = PermutationSpawner::new(
        thresholds.max_simultaneous_threads,
        Duration::from_millis(thresholds.thread_check_interval_ms),
    );
    let spawned_workers = Arc::new(AtomicUsize::new(0));

    for (p, permutation) in permutations.into_iter().enumerate() {
        if !task.is_running() {
            break;
        }
        if task.has_all_fit_solution(&material)
            && spawned_workers.load(Ordering::SeqCst) > EngineConstants::MAX_PERMUTATIONS_WITH_SOLUTION
        {
            break;
        }

        task.set_percentage(
            &material,
            crate::utils::math::percentage(p as f64, permutation_count as f64) as u8,
        );

        let task = task.clone();
        let picker = picker.clone();
        let pool = pool.clone();
        let comparator = comparator.clone();
        let config = config.clone();
        let material = material.clone();
        let spawned_workers = spawned_workers.clone();

        spawner.spawn(move || {
            run_permutation_worker(
                task,
                material,
                permutation,
                picker,
                pool,
                comparator,
                beam_width,
                config,
                spawned_workers,
            );
        });
    }

    while spawner.has_unfinished() || task.nbr_running_threads() > 0 || task.nbr_queued_threads() > 0 {
        std::thread::sleep(ConcurrencyConstants::DRIVER_DRAIN_POLL);
    }

    if task.is_running() {
        task.set_percentage(&material, 100);
        task.check_if_finished(&all_materials);
    }
}

/// Runs on its own thread (one per permutation, bounded by the spawner).
/// Iterates stock bundles from the picker and submits candidate workers to
/// the shared executor (spec.md §4.3 step 6).
#[allow(clippy::too_many_arguments)]
fn run_permutation_worker(
    task: Arc<Task>,
    material: String,
    permutation: Vec<crate::models::grouped_tile::GroupedTileDimensions>,
    picker: Arc<StockPanelPicker>,
    pool: Arc<WorkerPool>,
    comparator: Arc<MultiCriteriaComparator>,
    beam_width: usize,
    config: Configuration,
    spawned_workers: Arc<AtomicUsize>,
) {
    for i in 0..EngineConstants::MAX_STOCK_BUNDLES_PER_WORKER {
        if !task.is_running() {
            break;
        }

        let Some(bundle) = picker.get_stock_solution(i) else {
            break;
        };

        if let Some(existing_area) = task.smallest_all_fit_area(&material) {
            if existing_area < bundle.total_area() {
                continue;
            }
        }

        for policy in [
            FirstCutOrientation::Both,
            FirstCutOrientation::Horizontal,
            FirstCutOrientation::Vertical,
        ] {
            if !config.cut_orientation_preference.allows(policy) {
                continue;
            }
            let group = policy.to_string();
            if !task.group_eligible(
                &material,
                &group,
                task.nbr_finished_threads(),
                EngineConstants::GROUP_ELIGIBILITY_WARMUP_THREADS,
            ) {
                continue;
            }

            task.thread_queued();
            spawned_workers.fetch_add(1, Ordering::SeqCst);

            let task_job = task.clone();
            let material_job = material.clone();
            let permutation_job = permutation.clone();
            let bundle_tiles = bundle.tiles.clone();
            let comparator_job = comparator.clone();
            let config_job = config.clone();
            let group_job = group.clone();

            let submitted = pool.try_submit(move || {
                task_job.thread_started();
                let worker = CutListWorker::new(&config_job);
                let result = worker.run(
                    &permutation_job,
                    &bundle_tiles,
                    &group_job,
                    &comparator_job,
                    beam_width,
                );
                if result.min_trim_influenced {
                    task_job
                        .is_min_trim_dimension_influenced
                        .store(true, std::sync::atomic::Ordering::Relaxed);
                }
                task_job.merge_beam(&material_job, result.beam, beam_width, |a, b| {
                    comparator_job.compare(a, b)
                });
                task_job.thread_finished();
            });

            if !submitted {
                task.thread_rejected();
                task.append_log(format!("worker rejected: executor queue full ({group})"));
            }
        }
    }
}
