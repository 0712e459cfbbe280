use crate::types::Rgba;

/// A color stop at `offset` (0.0 = center, 1.0 = outer radius)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

/// Circular gradient fill, transparent beyond `radius`
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: [f32; 2],
    pub radius: f32,
    /// Stops sorted by offset
    pub stops: Vec<GradientStop>,
}

impl RadialGradient {
    /// Soft glow: `color` at the center, half alpha halfway out, clear at the edge
    pub fn glow(center: [f32; 2], radius: f32, color: Rgba) -> Self {
        Self {
            center,
            radius,
            stops: vec![
                GradientStop { offset: 0.0, color },
                GradientStop {
                    offset: 0.5,
                    color: color.with_alpha(color.a * 0.5),
                },
                GradientStop {
                    offset: 1.0,
                    color: color.with_alpha(0.0),
                },
            ],
        }
    }

    /// Interpolated color at `distance` from the center
    pub fn color_at(&self, distance: f32) -> Rgba {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Rgba::TRANSPARENT;
        };
        if self.radius <= 0.0 || distance > self.radius {
            return Rgba::TRANSPARENT;
        }
        let t = distance / self.radius;
        if t <= first.offset {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                if span <= 0.0 {
                    return b.color;
                }
                return a.color.lerp(b.color, (t - a.offset) / span);
            }
        }
        last.color
    }
}

/// 2D drawing primitives the field renders through
pub trait Surface {
    /// Size in pixels
    fn size(&self) -> (u32, u32);

    /// Reallocate to a new size; contents are cleared
    fn resize(&mut self, width: u32, height: u32);

    /// Make every pixel transparent
    fn clear(&mut self);

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient);

    fn fill_disc(&mut self, center: [f32; 2], radius: f32, color: Rgba);

    fn stroke_line(&mut self, from: [f32; 2], to: [f32; 2], width: f32, color: Rgba);

    /// Stroke consecutive segments; `colors[i]` colors the segment ending at `points[i + 1]`
    fn stroke_polyline(&mut self, points: &[[f32; 2]], width: f32, colors: &[Rgba]) {
        for (i, pair) in points.windows(2).enumerate() {
            let Some(&color) = colors.get(i) else {
                break;
            };
            self.stroke_line(pair[0], pair[1], width, color);
        }
    }
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Gradient(RadialGradient),
    Disc {
        center: [f32; 2],
        radius: f32,
        color: Rgba,
    },
    Line {
        from: [f32; 2],
        to: [f32; 2],
        width: f32,
        color: Rgba,
    },
}

/// Surface that remembers the calls made since the last clear
///
/// Used by headless runs and tests to observe what a frame drew without
/// rasterizing anything.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
    /// Number of clears seen over the surface's lifetime
    pub frames: u64,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Calls made since the last clear (the clear itself included)
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn gradients(&self) -> impl Iterator<Item = &RadialGradient> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Gradient(g) => Some(g),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.clear();
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.frames += 1;
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient) {
        self.commands.push(DrawCommand::Gradient(gradient.clone()));
    }

    fn fill_disc(&mut self, center: [f32; 2], radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Disc {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: [f32; 2], to: [f32; 2], width: f32, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }
}
