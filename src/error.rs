//! Configuration errors
//!
//! The simulation itself never fails; only loading or validating a
//! variant configuration can.

/// Errors produced while loading or validating a [`VariantConfig`](crate::VariantConfig).
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A lane-form configuration with no lanes
    NoLanes,
    /// The spawn interval floor is above its ceiling
    IntervalRange { min_ms: f64, max_ms: f64 },
    /// A speed, size or step that must be strictly positive
    NonPositive(&'static str),
    /// A ratio that must lie in its stated range
    OutOfRange { field: &'static str, value: f32 },
    /// JSON could not be parsed into a configuration
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoLanes => write!(f, "lane count must be at least 1"),
            Self::IntervalRange { min_ms, max_ms } => write!(
                f,
                "min spawn interval ({min_ms} ms) exceeds max spawn interval ({max_ms} ms)"
            ),
            Self::NonPositive(field) => write!(f, "{field} must be greater than zero"),
            Self::OutOfRange { field, value } => write!(f, "{field} out of range: {value}"),
            Self::Parse(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
