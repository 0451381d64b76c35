//! Small convenience wrappers over `tracing` macros for the CLI's
//! operation-shaped logging (start/success/error of one command).

/// Log the start of a CLI operation.
#[macro_export]
macro_rules! log_operation_start {
    ($operation:expr) => {
        tracing::info!("starting: {}", $operation);
    };
    ($operation:expr, $($arg:tt)*) => {
        tracing::info!("starting: {}", format!($operation, $($arg)*));
    };
}

/// Log the successful completion of a CLI operation.
#[macro_export]
macro_rules! log_operation_success {
    ($operation:expr) => {
        tracing::info!("completed: {}", $operation);
    };
    ($operation:expr, $($arg:tt)*) => {
        tracing::info!("completed: {}", format!($operation, $($arg)*));
    };
}

/// Log a CLI operation that failed.
#[macro_export]
macro_rules! log_operation_error {
    ($operation:expr, $error:expr) => {
        tracing::error!("error in {}: {}", $operation, $error);
    };
    ($operation:expr, $error:expr, $($arg:tt)*) => {
        tracing::error!("error in {}: {}", format!($operation, $($arg)*), $error);
    };
}
