//! The optimization engine (spec.md §4): per-material driver, permutation
//! spawner, worker threads, the watchdog and the response builder.

pub mod beam;
pub mod grouping;
pub mod material_driver;
pub mod permutation;
pub mod pool;
pub mod response_builder;
pub mod running_tasks;
pub mod service;
pub mod watch_dog;
pub mod worker;

pub use running_tasks::RunningTasks;
pub use service::Service;

