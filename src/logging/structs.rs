//! Logging output configuration.

use crate::logging::enums::LogLevel;

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LogLevel,
    pub show_time: bool,
    pub show_target: bool,
    pub show_level: bool,
    pub compact: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            show_time: false,
            show_target: false,
            show_level: true,
            compact: true,
        }
    }
}

impl LogConfig {
    pub fn verbose() -> Self {
        Self {
            level: LogLevel::Debug,
            show_time: true,
            show_target: true,
            show_level: true,
            compact: false,
        }
    }

    pub fn quiet() -> Self {
        Self {
            level: LogLevel::Error,
            show_time: false,
            show_target: false,
            show_level: false,
            compact: true,
        }
    }
}
