use serde::{Deserialize, Serialize};

use crate::constants::MAX_PARTICLE_COUNT;
use crate::error::ConfigError;

/// Inclusive `min..=max` range sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        non_negative(field, self.min)?;
        non_negative(field, self.max)?;
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// What happens to the particle set when the viewport changes size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Throw the set away and build a fresh one for the new viewport
    #[default]
    Regenerate,
    /// Keep the set, scaling coordinates to the new viewport
    Reposition,
}

/// Particle field configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Number of particles in the field
    pub particle_count: u32,
    /// Core radius range (pixels)
    pub particle_size: ValueRange,
    /// Initial speed range (pixels/frame)
    pub particle_speed: ValueRange,
    /// Peak opacity range
    pub particle_opacity: ValueRange,
    /// Pairs closer than this get a connective line
    pub connection_distance: f32,
    /// Opacity of a connective line between coincident particles
    pub connection_opacity: f32,
    /// Radius around the pointer within which particles are pulled
    pub mouse_influence: f32,
    /// Velocity added per frame at the pointer itself
    pub mouse_force: f32,
    /// Amplitude of the sinusoidal drift added each frame
    pub wobble_strength: f32,
    pub resize_policy: ResizePolicy,
    /// Random seed for reproducible fields
    pub seed: u64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 100,
            particle_size: ValueRange::new(1.0, 3.0),
            particle_speed: ValueRange::new(0.5, 2.0),
            particle_opacity: ValueRange::new(0.1, 0.8),
            connection_distance: 150.0,
            connection_opacity: 0.3,
            mouse_influence: 100.0,
            mouse_force: 0.5,
            wobble_strength: 0.1,
            resize_policy: ResizePolicy::Regenerate,
            seed: 42,
        }
    }
}

impl FieldConfig {
    /// Check every field; the first problem found is returned
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count > MAX_PARTICLE_COUNT {
            return Err(ConfigError::TooManyParticles {
                count: self.particle_count,
                max: MAX_PARTICLE_COUNT,
            });
        }
        self.particle_size.validate("particle_size")?;
        self.particle_speed.validate("particle_speed")?;
        self.particle_opacity.validate("particle_opacity")?;
        unit_interval("particle_opacity", self.particle_opacity.max)?;
        non_negative("connection_distance", self.connection_distance)?;
        non_negative("connection_opacity", self.connection_opacity)?;
        unit_interval("connection_opacity", self.connection_opacity)?;
        non_negative("mouse_influence", self.mouse_influence)?;
        non_negative("mouse_force", self.mouse_force)?;
        non_negative("wobble_strength", self.wobble_strength)?;
        Ok(())
    }

    /// Apply the supplied overrides on top of this config and validate the result
    pub fn merged(&self, options: &FieldOptions) -> Result<FieldConfig, ConfigError> {
        let mut next = self.clone();
        if let Some(v) = options.particle_count {
            next.particle_count = v;
        }
        if let Some(v) = options.particle_size {
            next.particle_size = v;
        }
        if let Some(v) = options.particle_speed {
            next.particle_speed = v;
        }
        if let Some(v) = options.particle_opacity {
            next.particle_opacity = v;
        }
        if let Some(v) = options.connection_distance {
            next.connection_distance = v;
        }
        if let Some(v) = options.connection_opacity {
            next.connection_opacity = v;
        }
        if let Some(v) = options.mouse_influence {
            next.mouse_influence = v;
        }
        if let Some(v) = options.mouse_force {
            next.mouse_force = v;
        }
        if let Some(v) = options.wobble_strength {
            next.wobble_strength = v;
        }
        if let Some(v) = options.resize_policy {
            next.resize_policy = v;
        }
        if let Some(v) = options.seed {
            next.seed = v;
        }
        next.validate()?;
        Ok(next)
    }
}

/// Partial configuration; unset fields keep their current value on merge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldOptions {
    pub particle_count: Option<u32>,
    pub particle_size: Option<ValueRange>,
    pub particle_speed: Option<ValueRange>,
    pub particle_opacity: Option<ValueRange>,
    pub connection_distance: Option<f32>,
    pub connection_opacity: Option<f32>,
    pub mouse_influence: Option<f32>,
    pub mouse_force: Option<f32>,
    pub wobble_strength: Option<f32>,
    pub resize_policy: Option<ResizePolicy>,
    pub seed: Option<u64>,
}

impl FieldOptions {
    pub fn particle_count(count: u32) -> Self {
        Self {
            particle_count: Some(count),
            ..Default::default()
        }
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { field, value })
    }
}

fn unit_interval(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OpacityOutOfRange { field, value })
    }
}
