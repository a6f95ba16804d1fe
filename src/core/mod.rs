//! Platform-agnostic core - shared between the browser, CLI and preview hosts

pub mod color;
pub mod config;
pub mod effects;
pub mod field;
pub mod frame;
pub mod particle;
pub mod render;

pub use color::{ParseColorError, Rgba};
pub use config::{ConfigError, FieldConfig, Range};
pub use effects::{EffectsManager, Firework, Spark, Spawn};
pub use field::{Connection, ParticleField};
pub use frame::{FrameLoop, FrameScheduler, LoopState};
pub use particle::{fade_ratio, Particle, INFLUENCE_RADIUS};
pub use render::{DrawCommand, FrameStats, Painter, RecordingPainter};
