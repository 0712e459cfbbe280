use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A single point mass drifting across the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Core radius; the glow extends to twice this
    pub radius: f32,
    /// Peak opacity at the particle center (0.0 - 1.0)
    pub opacity: f32,
    /// Wobble phase accumulator (radians)
    pub wobble: f32,
    /// Wobble phase advance per frame (radians)
    pub wobble_speed: f32,
}

impl Particle {
    /// A motionless particle at `pos` with no wobble
    pub fn at_rest(pos: [f32; 2], radius: f32, opacity: f32) -> Self {
        Self {
            x: pos[0],
            y: pos[1],
            vx: 0.0,
            vy: 0.0,
            radius,
            opacity,
            wobble: 0.0,
            wobble_speed: 0.0,
        }
    }

    pub fn pos(&self) -> [f32; 2] {
        [self.x, self.y]
    }

    pub fn vel(&self) -> [f32; 2] {
        [self.vx, self.vy]
    }

    pub fn speed(&self) -> f32 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }

    pub fn distance_to(&self, other: &Particle) -> f32 {
        distance(self.pos(), other.pos())
    }
}

/// Euclidean distance between two points
pub fn distance(a: [f32; 2], b: [f32; 2]) -> f32 {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    (dx * dx + dy * dy).sqrt()
}

/// Drawable area in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Clamp a point into `[0, width] x [0, height]`
    pub fn clamp(&self, pos: [f32; 2]) -> [f32; 2] {
        [pos[0].clamp(0.0, self.width), pos[1].clamp(0.0, self.height)]
    }

    pub fn contains(&self, pos: [f32; 2]) -> bool {
        (0.0..=self.width).contains(&pos[0]) && (0.0..=self.height).contains(&pos[1])
    }

    /// Size rounded to whole pixels, at least 1x1
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width.round() as u32).max(1),
            (self.height.round() as u32).max(1),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Last known pointer position, or absent after the pointer left the page
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    position: Option<[f32; 2]>,
}

impl PointerState {
    pub fn moved(&mut self, x: f32, y: f32) {
        self.position = if x.is_finite() && y.is_finite() {
            Some([x, y])
        } else {
            None
        };
    }

    pub fn left(&mut self) {
        self.position = None;
    }

    pub fn position(&self) -> Option<[f32; 2]> {
        self.position
    }
}

/// Straight (non-premultiplied) color with channels in 0.0 - 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);
    pub const CYAN: Rgba = Rgba::new(0.0, 1.0, 1.0, 1.0);
    pub const YELLOW: Rgba = Rgba::new(1.0, 1.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn lerp(self, other: Rgba, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

/// Identity of one field instance, used to tell fields apart in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(Uuid);

impl FieldId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FieldId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The first group is plenty to tell instances apart in a log
        let s = self.0.simple().to_string();
        f.write_str(&s[..8])
    }
}
