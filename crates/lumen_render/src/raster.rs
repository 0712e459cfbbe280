use bytemuck::{Pod, Zeroable};
use lumen_core::{RadialGradient, Rgba, Surface};

/// 8-bit RGBA pixel, laid out to match `Rgba8UnormSrgb` texture data
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Rgba8 = Rgba8 { r: 0, g: 0, b: 0, a: 0 };

    fn to_color(self) -> Rgba {
        Rgba::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        )
    }
}

impl From<Rgba> for Rgba8 {
    fn from(c: Rgba) -> Self {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self {
            r: q(c.r),
            g: q(c.g),
            b: q(c.b),
            a: q(c.a),
        }
    }
}

/// CPU raster the field draws into; uploaded to a texture each frame
#[derive(Debug, Clone)]
pub struct Pixmap {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl Pixmap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba8::TRANSPARENT; (width as usize) * (height as usize)],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Raw RGBA bytes, row-major, top row first
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Fraction of pixels with any coverage
    pub fn coverage(&self) -> f64 {
        if self.pixels.is_empty() {
            return 0.0;
        }
        let lit = self.pixels.iter().filter(|p| p.a > 0).count();
        lit as f64 / self.pixels.len() as f64
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Source-over blend in straight alpha
    fn blend(&mut self, x: u32, y: u32, src: Rgba) {
        if src.a <= 0.0 {
            return;
        }
        let i = self.index(x, y);
        let dst = self.pixels[i].to_color();
        let out_a = src.a + dst.a * (1.0 - src.a);
        if out_a <= 0.0 {
            self.pixels[i] = Rgba8::TRANSPARENT;
            return;
        }
        let mix = |s: f32, d: f32| (s * src.a + d * dst.a * (1.0 - src.a)) / out_a;
        self.pixels[i] = Rgba8::from(Rgba::new(
            mix(src.r, dst.r),
            mix(src.g, dst.g),
            mix(src.b, dst.b),
            out_a,
        ));
    }

    /// Visit pixel centers inside the clipped box `[min, max]`
    fn for_each_in(&mut self, min: [f32; 2], max: [f32; 2], mut shade: impl FnMut([f32; 2]) -> Option<Rgba>) {
        if !(min[0].is_finite() && min[1].is_finite() && max[0].is_finite() && max[1].is_finite()) {
            return;
        }
        let x0 = min[0].floor().max(0.0) as u32;
        let y0 = min[1].floor().max(0.0) as u32;
        let x1 = (max[0].ceil().max(0.0) as u32).min(self.width);
        let y1 = (max[1].ceil().max(0.0) as u32).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let center = [x as f32 + 0.5, y as f32 + 0.5];
                if let Some(color) = shade(center) {
                    self.blend(x, y, color);
                }
            }
        }
    }
}

impl Surface for Pixmap {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        *self = Pixmap::new(width, height);
    }

    fn clear(&mut self) {
        self.pixels.fill(Rgba8::TRANSPARENT);
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient) {
        let [cx, cy] = gradient.center;
        let r = gradient.radius;
        if r <= 0.0 {
            return;
        }
        self.for_each_in([cx - r, cy - r], [cx + r, cy + r], |p| {
            let d = lumen_core::distance(p, gradient.center);
            let c = gradient.color_at(d);
            (c.a > 0.0).then_some(c)
        });
    }

    fn fill_disc(&mut self, center: [f32; 2], radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let [cx, cy] = center;
        self.for_each_in([cx - radius, cy - radius], [cx + radius, cy + radius], |p| {
            (lumen_core::distance(p, center) <= radius).then_some(color)
        });
    }

    fn stroke_line(&mut self, from: [f32; 2], to: [f32; 2], width: f32, color: Rgba) {
        let half = (width * 0.5).max(0.5);
        let min = [from[0].min(to[0]) - half, from[1].min(to[1]) - half];
        let max = [from[0].max(to[0]) + half, from[1].max(to[1]) + half];
        self.for_each_in(min, max, |p| (segment_distance(p, from, to) <= half).then_some(color));
    }
}

/// Distance from `p` to the segment `a`-`b`
fn segment_distance(p: [f32; 2], a: [f32; 2], b: [f32; 2]) -> f32 {
    let ab = [b[0] - a[0], b[1] - a[1]];
    let len2 = ab[0] * ab[0] + ab[1] * ab[1];
    if len2 <= f32::EPSILON {
        return lumen_core::distance(p, a);
    }
    let t = (((p[0] - a[0]) * ab[0] + (p[1] - a[1]) * ab[1]) / len2).clamp(0.0, 1.0);
    lumen_core::distance(p, [a[0] + ab[0] * t, a[1] + ab[1] * t])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_match_pixels() {
        let mut pm = Pixmap::new(3, 2);
        pm.fill_disc([0.5, 0.5], 0.6, Rgba::CYAN);
        assert_eq!(pm.as_bytes().len(), 3 * 2 * 4);
        assert_eq!(&pm.as_bytes()[..4], &[0, 255, 255, 255]);
    }

    #[test]
    fn test_glow_fades_outward() {
        let mut pm = Pixmap::new(32, 32);
        pm.fill_radial_gradient(&RadialGradient::glow([16.0, 16.0], 8.0, Rgba::CYAN.with_alpha(0.8)));

        let center = pm.pixel(15, 15).map_or(0, |p| p.a);
        let mid = pm.pixel(19, 15).map_or(0, |p| p.a);
        let outside = pm.pixel(26, 15).map_or(0, |p| p.a);
        assert!(center > mid, "{} <= {}", center, mid);
        assert!(mid > 0);
        assert_eq!(outside, 0);
        assert!(center <= 204);
    }

    #[test]
    fn test_line_is_clipped() {
        let mut pm = Pixmap::new(10, 10);
        pm.stroke_line([-50.0, 5.0], [50.0, 5.0], 1.0, Rgba::CYAN);
        let row: Vec<u8> = (0..10).map(|x| pm.pixel(x, 5).map_or(0, |p| p.a)).collect();
        assert!(row.iter().all(|&a| a == 255));
        assert_eq!(pm.pixel(5, 2).map(|p| p.a), Some(0));

        // Entirely off-canvas or garbage input draws nothing
        let mut off = Pixmap::new(10, 10);
        off.stroke_line([20.0, 20.0], [30.0, 30.0], 1.0, Rgba::CYAN);
        off.stroke_line([f32::NAN, 0.0], [3.0, 3.0], 1.0, Rgba::CYAN);
        assert_eq!(off.coverage(), 0.0);
    }

    #[test]
    fn test_blending_accumulates() {
        let mut pm = Pixmap::new(1, 1);
        let half = Rgba::YELLOW.with_alpha(0.5);
        pm.fill_disc([0.5, 0.5], 1.0, half);
        let once = pm.pixel(0, 0).map_or(0, |p| p.a);
        pm.fill_disc([0.5, 0.5], 1.0, half);
        let twice = pm.pixel(0, 0).map_or(0, |p| p.a);
        assert_eq!(once, 128);
        // 0.5 over ~0.5 lands on 0.75 give or take a quantization step
        assert!((191..=192).contains(&twice), "{}", twice);
    }

    #[test]
    fn test_clear_and_resize() {
        let mut pm = Pixmap::new(4, 4);
        pm.fill_disc([2.0, 2.0], 3.0, Rgba::CYAN);
        assert!(pm.coverage() > 0.0);
        pm.clear();
        assert_eq!(pm.coverage(), 0.0);
        pm.resize(8, 2);
        assert_eq!(pm.size(), (8, 2));
        assert_eq!(pm.pixels().len(), 16);
        assert_eq!(pm.pixel(8, 0), None);
    }
}
