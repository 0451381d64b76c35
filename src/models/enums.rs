//! Small enums shared across the data model (spec.md §3, §6).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grain orientation of a panel or stock sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(i32)]
pub enum Orientation {
    #[default]
    Any = 0,
    Horizontal = 1,
    Vertical = 2,
}

impl Orientation {
    pub fn from_value(v: i32) -> Self {
        match v {
            1 => Orientation::Horizontal,
            2 => Orientation::Vertical,
            _ => Orientation::Any,
        }
    }

    /// Flip used by `TileDimensions::rotate90`: horizontal <-> vertical,
    /// `Any` stays `Any`.
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Any => Orientation::Any,
        }
    }
}

/// Which guillotine cut direction(s) a `CutListWorker` is allowed to try
/// first when an exact fit is unavailable (spec.md §4.4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FirstCutOrientation {
    Both,
    Horizontal,
    Vertical,
}

impl fmt::Display for FirstCutOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FirstCutOrientation::Both => "AREA",
            FirstCutOrientation::Horizontal => "AREA_HCUTS_1ST",
            FirstCutOrientation::Vertical => "AREA_VCUTS_1ST",
        };
        write!(f, "{label}")
    }
}

/// Client-requested cut orientation preference (configuration field);
/// filters which `FirstCutOrientation` policies a worker may run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[repr(i32)]
pub enum CutOrientationPreference {
    #[default]
    Both = 0,
    Horizontal = 1,
    Vertical = 2,
}

impl CutOrientationPreference {
    pub fn from_value(v: i32) -> Self {
        match v {
            1 => CutOrientationPreference::Horizontal,
            2 => CutOrientationPreference::Vertical,
            _ => CutOrientationPreference::Both,
        }
    }

    pub fn allows(self, policy: FirstCutOrientation) -> bool {
        match self {
            CutOrientationPreference::Both => true,
            CutOrientationPreference::Horizontal => policy != FirstCutOrientation::Vertical,
            CutOrientationPreference::Vertical => policy != FirstCutOrientation::Horizontal,
        }
    }
}

/// Which ranking key set the final comparator uses (spec.md §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[repr(i32)]
pub enum OptimizationPriority {
    #[default]
    MostTiles = 0,
    LeastWastedArea = 1,
}

impl OptimizationPriority {
    pub fn from_value(v: i32) -> Self {
        match v {
            1 => OptimizationPriority::LeastWastedArea,
            _ => OptimizationPriority::MostTiles,
        }
    }
}

/// Task lifecycle states (spec.md §3, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Idle,
    Queued,
    Running,
    Finished,
    Stopped,
    Terminated,
    Error,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Status::Finished | Status::Stopped | Status::Terminated | Status::Error
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Idle => "IDLE",
            Status::Queued => "QUEUED",
            Status::Running => "RUNNING",
            Status::Finished => "FINISHED",
            Status::Stopped => "STOPPED",
            Status::Terminated => "TERMINATED",
            Status::Error => "ERROR",
        };
        write!(f, "{s}")
    }
}

/// Submission result codes (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum StatusCode {
    Ok = 0,
    InvalidTiles = 1,
    InvalidStockTiles = 2,
    TaskAlreadyRunning = 3,
    ServerUnavailable = 4,
    TooManyPanels = 5,
    TooManyStockPanels = 6,
}

impl StatusCode {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn string_value(self) -> &'static str {
        match self {
            StatusCode::Ok => "0",
            StatusCode::InvalidTiles => "1",
            StatusCode::InvalidStockTiles => "2",
            StatusCode::TaskAlreadyRunning => "3",
            StatusCode::ServerUnavailable => "4",
            StatusCode::TooManyPanels => "5",
            StatusCode::TooManyStockPanels => "6",
        }
    }

    pub fn from_value(v: u8) -> Option<Self> {
        Some(match v {
            0 => StatusCode::Ok,
            1 => StatusCode::InvalidTiles,
            2 => StatusCode::InvalidStockTiles,
            3 => StatusCode::TaskAlreadyRunning,
            4 => StatusCode::ServerUnavailable,
            5 => StatusCode::TooManyPanels,
            6 => StatusCode::TooManyStockPanels,
            _ => return None,
        })
    }

    pub fn is_ok(self) -> bool {
        matches!(self, StatusCode::Ok)
    }

    pub fn is_error(self) -> bool {
        !self.is_ok()
    }

    pub fn description(self) -> &'static str {
        match self {
            StatusCode::Ok => "accepted",
            StatusCode::InvalidTiles => "no valid demand panels",
            StatusCode::InvalidStockTiles => "no valid stock panels",
            StatusCode::TaskAlreadyRunning => "client already has a running task",
            StatusCode::ServerUnavailable => "server unavailable",
            StatusCode::TooManyPanels => "too many demand panels",
            StatusCode::TooManyStockPanels => "too many stock panels",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.string_value())
    }
}

impl From<StatusCode> for u8 {
    fn from(code: StatusCode) -> Self {
        code.value()
    }
}

impl TryFrom<u8> for StatusCode {
    type Error = crate::error::OptimizerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        StatusCode::from_value(value)
            .ok_or_else(|| crate::error::OptimizerError::InvalidInput(format!("unknown status code: {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_round_trips() {
        for v in 0u8..=6 {
            let code = StatusCode::from_value(v).unwrap();
            assert_eq!(code.value(), v);
        }
        assert!(StatusCode::from_value(7).is_none());
    }

    #[test]
    fn orientation_flip_is_involutive() {
        assert_eq!(Orientation::Horizontal.flipped(), Orientation::Vertical);
        assert_eq!(Orientation::Vertical.flipped().flipped(), Orientation::Vertical);
        assert_eq!(Orientation::Any.flipped(), Orientation::Any);
    }
}
