//! Tracing-based logging setup shared by the CLI and the engine's long-running
//! threads (driver, worker, watchdog). Each thread opens a `tracing::span`
//! scoped to its task/material/thread-group so log lines can be filtered with
//! `RUST_LOG` per component.

pub mod enums;
pub mod init;
pub mod macros;
pub mod structs;

pub use enums::LogLevel;
pub use init::{init_cli, init_default, init_logging};
pub use structs::LogConfig;

pub use crate::{log_operation_error, log_operation_start, log_operation_success};
