pub mod config;
pub mod constants;
pub mod error;
pub mod surface;
pub mod types;

pub use config::{FieldConfig, FieldOptions, ResizePolicy, ValueRange};
pub use constants::*;
pub use error::ConfigError;
pub use surface::{DrawCommand, GradientStop, RadialGradient, RecordingSurface, Surface};
pub use types::*;
