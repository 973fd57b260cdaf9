use thiserror::Error;

/// A configuration value that the core cannot run with.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} range is empty or inverted: [{min}, {max}]")]
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error("{name} must be > 0, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("{name} must be in (0, 1), got {value}")]
    NotUnitFraction { name: &'static str, value: f64 },
    #[error("{name} must be at least 1")]
    ZeroCount { name: &'static str },
    #[error("initial {name} {value} is outside the {range} range")]
    InitialOutOfRange {
        name: &'static str,
        value: f64,
        range: &'static str,
    },
    #[error("velocity_min_distinct {min_distinct} exceeds velocity_window {window}")]
    MinDistinctExceedsWindow { min_distinct: usize, window: usize },
}
