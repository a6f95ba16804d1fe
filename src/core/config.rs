//! Field configuration
//!
//! Immutable for the lifetime of a field. Every option has a default, so a
//! partial JSON options object is valid; invalid values are clamped to safe
//! ones by [`FieldConfig::sanitized`] with a warning instead of rejected.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::color::Rgba;

pub const DEFAULT_PARTICLE_COUNT: usize = 50;
pub const DEFAULT_PARTICLE_SIZE: Range = Range::new(2.0, 6.0);
pub const DEFAULT_PARTICLE_SPEED: Range = Range::new(1.0, 3.0);
pub const DEFAULT_PARTICLE_OPACITY: Range = Range::new(0.1, 0.6);
pub const DEFAULT_CONNECTION_DISTANCE: f64 = 150.0;
pub const DEFAULT_CONNECTION_WIDTH: f64 = 1.0;

/// Above this the O(n²) connection pass dominates the frame
pub const QUADRATIC_WARN_COUNT: usize = 500;

/// Hard cap so a stray options value cannot allocate without bound
pub const MAX_PARTICLE_COUNT: usize = 5_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid field options: {0}")]
    Json(#[from] serde_json::Error),
}

/// Inclusive `{min, max}` range
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Uniform sample in `[min, max]`; degenerate ranges yield `min`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.max > self.min {
            rng.gen_range(self.min..=self.max)
        } else {
            self.min
        }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    fn ordered(self, option: &'static str) -> Self {
        if self.min > self.max {
            warn!(option, min = self.min, max = self.max, "min > max, swapping");
            Self::new(self.max, self.min)
        } else {
            self
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    pub particle_count: usize,
    pub particle_size: Range,
    pub particle_speed: Range,
    pub particle_color: Rgba,
    pub particle_opacity: Range,
    pub connection_distance: f64,
    pub connection_color: Rgba,
    pub connection_width: f64,
    pub mouse_interaction: bool,
    pub responsive: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            particle_size: DEFAULT_PARTICLE_SIZE,
            particle_speed: DEFAULT_PARTICLE_SPEED,
            particle_color: Rgba::WHITE,
            particle_opacity: DEFAULT_PARTICLE_OPACITY,
            connection_distance: DEFAULT_CONNECTION_DISTANCE,
            connection_color: Rgba::new(255, 255, 255, 0.1),
            connection_width: DEFAULT_CONNECTION_WIDTH,
            mouse_interaction: true,
            responsive: true,
        }
    }
}

impl FieldConfig {
    /// Landing page hero background
    pub fn hero() -> Self {
        Self {
            particle_count: 30,
            particle_size: Range::new(1.0, 3.0),
            particle_speed: Range::new(0.5, 1.5),
            particle_color: Rgba::new(255, 255, 255, 0.6),
            particle_opacity: Range::new(0.2, 0.8),
            connection_distance: 100.0,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON options object and sanitize it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FieldConfig = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Clamp every option into its valid domain, logging each repair
    pub fn sanitized(mut self) -> Self {
        if self.particle_count == 0 {
            warn!(default = DEFAULT_PARTICLE_COUNT, "particleCount must be > 0, using default");
            self.particle_count = DEFAULT_PARTICLE_COUNT;
        } else if self.particle_count > MAX_PARTICLE_COUNT {
            warn!(
                count = self.particle_count,
                max = MAX_PARTICLE_COUNT,
                "particleCount too large, capping"
            );
            self.particle_count = MAX_PARTICLE_COUNT;
        } else if self.particle_count > QUADRATIC_WARN_COUNT {
            warn!(
                count = self.particle_count,
                "large particleCount, connection pass is quadratic per frame"
            );
        }

        let size = self.particle_size;
        self.particle_size = if !size.is_finite() || size.min <= 0.0 || size.max <= 0.0 {
            warn!(min = size.min, max = size.max, "particleSize must be > 0, using default");
            DEFAULT_PARTICLE_SIZE
        } else {
            size.ordered("particleSize")
        };

        let speed = self.particle_speed;
        self.particle_speed = if !speed.is_finite() || speed.min < 0.0 || speed.max < 0.0 {
            warn!(min = speed.min, max = speed.max, "particleSpeed must be >= 0, using default");
            DEFAULT_PARTICLE_SPEED
        } else {
            speed.ordered("particleSpeed")
        };

        let opacity = self.particle_opacity;
        self.particle_opacity = if !opacity.is_finite() {
            warn!("particleOpacity must be finite, using default");
            DEFAULT_PARTICLE_OPACITY
        } else {
            let clamped = Range::new(opacity.min.clamp(0.0, 1.0), opacity.max.clamp(0.0, 1.0));
            if clamped != opacity {
                warn!(min = opacity.min, max = opacity.max, "particleOpacity clamped into [0, 1]");
            }
            clamped.ordered("particleOpacity")
        };

        if !self.connection_distance.is_finite() {
            warn!("connectionDistance must be finite, using default");
            self.connection_distance = DEFAULT_CONNECTION_DISTANCE;
        } else if self.connection_distance < 0.0 {
            warn!(
                distance = self.connection_distance,
                "negative connectionDistance, connections disabled"
            );
            self.connection_distance = 0.0;
        }

        if !self.connection_width.is_finite() || self.connection_width <= 0.0 {
            warn!(width = self.connection_width, "connectionWidth must be > 0, using default");
            self.connection_width = DEFAULT_CONNECTION_WIDTH;
        }

        self
    }
}
