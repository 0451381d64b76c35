//! Engine configuration (spec.md §3 `Task`, §4.1, §6 `configuration`).

use crate::error::{OptimizerError, Result};
use crate::models::enums::{CutOrientationPreference, OptimizationPriority};
use serde::{Deserialize, Serialize};

/// Bounds on parallelism applied per task (spec.md §6
/// `performanceThresholds`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceThresholds {
    pub max_simultaneous_threads: usize,
    pub max_simultaneous_tasks: usize,
    pub thread_check_interval_ms: u64,
}

impl Default for PerformanceThresholds {
    fn default() -> Self {
        Self {
            max_simultaneous_threads: crate::constants::ConcurrencyConstants::DEFAULT_MAX_SIMULTANEOUS_THREADS,
            max_simultaneous_tasks: crate::constants::ConcurrencyConstants::DEFAULT_MAX_SIMULTANEOUS_TASKS,
            thread_check_interval_ms: crate::constants::ConcurrencyConstants::DEFAULT_THREAD_CHECK_INTERVAL_MS,
        }
    }
}

/// Request-level tuning for one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Kerf width, already scaled to integer units.
    pub cut_thickness: i32,
    /// Minimum remaining offcut width/height a split may leave behind.
    pub min_trim_dimension: i32,
    pub consider_orientation: bool,
    /// 1..=10; scales beam width (spec.md §4.3 step 4).
    pub optimization_factor: i32,
    pub optimization_priority: OptimizationPriority,
    pub cut_orientation_preference: CutOrientationPreference,
    pub use_single_stock_unit: bool,
    pub allow_multiple_tasks_per_client: bool,
    pub units: String,
    pub performance_thresholds: PerformanceThresholds,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            cut_thickness: 3,
            min_trim_dimension: 10,
            consider_orientation: true,
            optimization_factor: 5,
            optimization_priority: OptimizationPriority::LeastWastedArea,
            cut_orientation_preference: CutOrientationPreference::Both,
            use_single_stock_unit: false,
            allow_multiple_tasks_per_client: false,
            units: "mm".to_string(),
            performance_thresholds: PerformanceThresholds::default(),
        }
    }
}

impl Configuration {
    pub fn validate(&self) -> Result<()> {
        if self.cut_thickness < 0 {
            return Err(OptimizerError::Validation(
                "cut_thickness must be >= 0".to_string(),
            ));
        }
        if self.min_trim_dimension < 0 {
            return Err(OptimizerError::Validation(
                "min_trim_dimension must be >= 0".to_string(),
            ));
        }
        if !(1..=10).contains(&self.optimization_factor) {
            return Err(OptimizerError::Validation(
                "optimization_factor must be between 1 and 10".to_string(),
            ));
        }
        Ok(())
    }

    /// Per-worker and task-wide beam width (spec.md §4.3 step 4).
    pub fn accuracy(&self, demand_panel_count: usize) -> usize {
        let base = (100 * self.optimization_factor) as f64;
        let scaled = if demand_panel_count > 100 {
            base * (0.5 / (demand_panel_count as f64 / 100.0))
        } else {
            base
        };
        scaled.max(1.0).round() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        Configuration::default().validate().unwrap();
    }

    #[test]
    fn rejects_out_of_range_optimization_factor() {
        let mut config = Configuration::default();
        config.optimization_factor = 11;
        assert!(config.validate().is_err());
    }

    #[test]
    fn accuracy_scales_down_for_large_demand() {
        let config = Configuration {
            optimization_factor: 5,
            ..Configuration::default()
        };
        assert_eq!(config.accuracy(50), 500);
        assert!(config.accuracy(500) < 500);
    }
}
