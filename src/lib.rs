//! CutList Optimizer — a guillotine-cut bin-packing engine for sheet
//! materials (spec.md OVERVIEW): submit a set of demand panels and
//! available stock sheets, get back a best-effort cutting layout per
//! material.
//!
//! # Examples
//!
//! ```rust
//! use cutlist_optimizer_cli::models::Configuration;
//!
//! let config = Configuration::default();
//! assert!(config.validate().is_ok());
//! ```

pub mod cli;
pub mod comparator;
pub mod constants;
pub mod engine;
pub mod error;
pub mod logging;
pub mod models;
pub mod stock;
pub mod types;
pub mod utils;

pub use constants::MaterialConstants;
pub use engine::Service;
pub use error::{OptimizerError, Result};
pub use models::{
    CalculationRequest, CalculationResponse, Configuration, Panel, Stats, SubmissionResult, Task,
    TaskStatusResponse, TileDimensions,
};

pub mod prelude {
    //! Commonly imported types for library consumers.
    pub use crate::engine::Service;
    pub use crate::error::{OptimizerError, Result};
    pub use crate::models::{
        CalculationRequest, CalculationResponse, Configuration, Panel, Stats, SubmissionResult,
        TaskStatusResponse,
    };
}
