//! Error taxonomy for the optimizer, grouped the way spec.md §7 groups it:
//! Core, Task, Computation, Service, Stock. Every long-running component
//! (worker, sorter, driver, watchdog) converts errors to this type at its
//! top frame rather than propagating; see `engine::worker` and
//! `engine::watch_dog` for that boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptimizerError {
    // --- Core ---
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("number parse error: {0}")]
    NumberParse(#[from] std::num::ParseFloatError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("internal error: {0}")]
    Internal(String),

    // --- Task ---
    #[error("task not found: {0}")]
    TaskNotFound(String),
    #[error("invalid task id: {0}")]
    InvalidTaskId(String),
    #[error("duplicate task: {0}")]
    DuplicateTask(String),
    #[error("invalid task state: expected {expected}, was {actual}")]
    InvalidTaskState { expected: String, actual: String },
    #[error("illegal task transition: {from} -> {to}")]
    IllegalTransition { from: String, to: String },
    #[error("missing client info")]
    MissingClientInfo,
    #[error("task timed out: {0}")]
    TaskTimeout(String),
    #[error("worker terminated before completion")]
    WorkerTerminated,
    #[error("worker synchronization error: {0}")]
    WorkerSync(String),
    #[error("worker execution error: {0}")]
    WorkerExecution(String),
    #[error("material mismatch: expected {expected}, got {actual}")]
    MaterialMismatch { expected: String, actual: String },
    #[error("lock error: {0}")]
    Lock(String),

    // --- Computation ---
    #[error("optimization failed: {0}")]
    OptimizationFailed(String),
    #[error("solution computation error: {0}")]
    SolutionCompute(String),
    #[error("solution comparison error: {0}")]
    SolutionCompare(String),
    #[error("tile node copy error: {0}")]
    NodeCopy(String),
    #[error("candidate search error: {0}")]
    CandidateSearch(String),

    // --- Service ---
    #[error("task already exists: {0}")]
    TaskAlreadyExists(String),
    #[error("client already has a running task: {0}")]
    ClientAlreadyHasTask(String),
    #[error("invalid client: {0}")]
    InvalidClient(String),
    #[error("service is shutting down")]
    ShuttingDown,
    #[error("maximum number of simultaneous tasks reached")]
    MaxTasksReached,
    #[error("service not initialized")]
    NotInitialized,
    #[error("failed to acquire lock: {0}")]
    LockFailed(String),
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("worker pool error: {0}")]
    PoolError(String),
    #[error("initialization error: {0}")]
    Init(String),
    #[error("validation error: {0}")]
    Validation(String),

    // --- Stock ---
    #[error("no stock tiles available")]
    NoStockTiles,
    #[error("no tiles to fit")]
    NoTilesToFit,
    #[error("stock bundle computation limit exceeded")]
    ComputationLimitExceeded,
    #[error("stock picker not initialized")]
    PickerNotInitialized,
    #[error("stock bundle generation interrupted: {0}")]
    GenerationInterrupted(String),
    #[error("no more stock bundle solutions")]
    NoMoreSolutions,
    #[error("stock picker thread error: {0}")]
    PickerThread(String),
}

impl OptimizerError {
    /// Whether the operation that produced this error is safe to retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            OptimizerError::Io(_)
                | OptimizerError::TaskTimeout(_)
                | OptimizerError::WorkerExecution(_)
                | OptimizerError::WorkerSync(_)
                | OptimizerError::ResourceUnavailable(_)
                | OptimizerError::LockFailed(_)
                | OptimizerError::MaxTasksReached
                | OptimizerError::GenerationInterrupted(_)
                | OptimizerError::PickerThread(_)
        )
    }

    /// Whether this error reflects bad caller input rather than a server fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            OptimizerError::InvalidInput(_)
                | OptimizerError::TaskNotFound(_)
                | OptimizerError::DuplicateTask(_)
                | OptimizerError::InvalidTaskState { .. }
                | OptimizerError::Validation(_)
                | OptimizerError::InvalidClient(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, OptimizerError>;
