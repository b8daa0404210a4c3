use thiserror::Error;

use crate::measure::Measurement;

/// Invalid geometric values, rejected at construction time so no invalid
/// measurement or rectangle is ever observable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("measurement value is not finite: {value}")]
    NonFinite { value: f64 },

    #[error("rectangle size must be strictly positive: {width} x {height}")]
    NonPositiveSize {
        width: Measurement,
        height: Measurement,
    },
}

/// Caller errors on element definition and lookup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElementError {
    #[error("element '{element}' already has a pin named '{name}'")]
    DuplicatePin { element: String, name: String },

    #[error("element '{element}' already has a pad named '{name}'")]
    DuplicatePad { element: String, name: String },

    #[error("element '{element}' has no pin named '{name}'")]
    PinNotFound { element: String, name: String },

    #[error("element '{element}' has no pad named '{name}'")]
    PadNotFound { element: String, name: String },
}

/// Component name collisions. Kept separate from [`ElementError`] so a
/// caller can catch the conflict and retry with a different name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    #[error("component name '{0}' has already been issued")]
    Conflict(String),
}
