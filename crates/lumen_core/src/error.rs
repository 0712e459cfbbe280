use thiserror::Error;

/// Rejected field configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("particle count {count} exceeds the maximum of {max}")]
    TooManyParticles { count: u32, max: u32 },

    /// A scalar that must be finite and non-negative was not
    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidValue { field: &'static str, value: f32 },

    #[error("{field} range is inverted: min {min} > max {max}")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },

    #[error("{field} must lie within 0.0..=1.0 (got {value})")]
    OpacityOutOfRange { field: &'static str, value: f32 },
}
