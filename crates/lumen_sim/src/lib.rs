pub mod effects;
pub mod field;
pub mod schedule;

pub use effects::{Effect, Explosion, Trail, Wave};
pub use field::{FieldState, FrameStats, ParticleField};
pub use schedule::{FrameClock, FrameHandle, FrameScheduler};
