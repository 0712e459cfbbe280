// Field constants (screen-space units)
// All motion is expressed per rendered frame, not per second:
// - Distance: 1 unit = 1 logical pixel
// - Velocity: pixels per frame
// - Angles: radians

/// Velocity retained (and inverted) when a particle hits a viewport edge
pub const RESTITUTION: f32 = 0.8;

/// Multiplicative velocity damping applied every frame
pub const DAMPING: f32 = 0.99;

/// Lower bound of the per-particle wobble angular speed (radians/frame)
pub const WOBBLE_SPEED_MIN: f32 = 0.01;

/// Upper bound of the per-particle wobble angular speed (radians/frame)
pub const WOBBLE_SPEED_MAX: f32 = 0.03;

/// Distances below this are treated as coincident (no direction defined)
pub const MIN_DISTANCE: f32 = 1e-4;

/// Hard cap on particle count; the connection pass is O(n^2)
pub const MAX_PARTICLE_COUNT: u32 = 2000;

/// Width of connective lines in pixels
pub const CONNECTION_LINE_WIDTH: f32 = 1.0;

/// Sparks spawned per explosion
pub const EXPLOSION_SPARKS: usize = 20;

/// Maximum spark speed on either axis is half of this
pub const EXPLOSION_SPREAD: f32 = 10.0;

/// Life lost by a spark each frame
pub const EXPLOSION_DECAY: f32 = 0.02;

/// Rendered spark radius
pub const SPARK_RADIUS: f32 = 3.0;

/// Maximum number of points kept by a trail
pub const TRAIL_MAX_POINTS: usize = 50;

/// Life lost by a trail point each frame
pub const TRAIL_DECAY: f32 = 0.02;

/// Horizontal sampling step of the wave polyline
pub const WAVE_SAMPLE_STEP: f32 = 5.0;

/// Stroke width of trail and wave polylines
pub const EFFECT_LINE_WIDTH: f32 = 2.0;
