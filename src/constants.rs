//! Tuning constants named throughout spec.md so call sites read as English
//! rather than bare numeric literals.

use std::time::Duration;

/// Admission and engine-wide size limits (spec.md §4.1, §8 boundaries).
pub struct MaterialConstants;

impl MaterialConstants {
    pub const MAX_DEMAND_PANELS: i32 = 5_000;
    pub const MAX_STOCK_PANELS: i32 = 5_000;
    /// Bound on full permutation of the leading distinct group sizes (7!).
    pub const MAX_PERMUTATION_GROUPS: usize = 7;
}

/// Per-material driver and worker tuning (spec.md §4.3, §4.4).
pub struct EngineConstants;

impl EngineConstants {
    /// Once an all-fit solution exists, stop spawning new permutations after
    /// this many workers have already been started (spec.md §4.3 step 6).
    pub const MAX_PERMUTATIONS_WITH_SOLUTION: usize = 150;
    /// Stock bundles tried per permutation worker before giving up.
    pub const MAX_STOCK_BUNDLES_PER_WORKER: usize = 1_000;
    /// Group eligibility warm-up: a group is always eligible until its
    /// material has this many finished threads (spec.md §4.4.2).
    pub const GROUP_ELIGIBILITY_WARMUP_THREADS: usize = 10;
}

/// Stock bundle generator/picker tuning (spec.md §4.5).
pub struct StockConstants;

impl StockConstants {
    /// Sorter keeps pulling while bundle count is at most this many, or the
    /// generator's cursor has not yet reached the end of the stock pool.
    pub const MIN_BUNDLES_BEFORE_IDLE: usize = 10;
    /// Once an all-fit solution exists, the sorter stops after this many
    /// bundles have been generated in total.
    pub const MIN_BUNDLES_WITH_ALL_FIT_SOLUTION: usize = 100;
    /// Poll interval used by `getStockSolution` and the sorter thread.
    pub const POLL_INTERVAL: Duration = Duration::from_secs(1);
}

/// WatchDog cadence and timeouts (spec.md §4.2).
pub struct WatchDogConstants;

impl WatchDogConstants {
    pub const LOOP_INTERVAL: Duration = Duration::from_secs(5);
    pub const TERMINAL_TASK_RETENTION: Duration = Duration::from_secs(60);
    pub const ALL_FIT_GRACE_PERIOD: Duration = Duration::from_secs(60);
    pub const ABSOLUTE_TIMEOUT: Duration = Duration::from_secs(10 * 60);
    pub const CLIENT_SILENCE_TIMEOUT: Duration = Duration::from_secs(60);
    /// Number of errored worker threads that force-terminates a task.
    pub const MAX_ERROR_THREADS: usize = 100;
}

/// Permutation spawner and per-material driver polling (spec.md §5).
pub struct ConcurrencyConstants;

impl ConcurrencyConstants {
    pub const DRIVER_DRAIN_POLL: Duration = Duration::from_secs(1);
    pub const DEFAULT_THREAD_CHECK_INTERVAL_MS: u64 = 1_000;
    pub const DEFAULT_MAX_SIMULTANEOUS_THREADS: usize = 5;
    pub const DEFAULT_MAX_SIMULTANEOUS_TASKS: usize = 1;
    pub const WORKER_QUEUE_CAPACITY: usize = 1_000;
}
