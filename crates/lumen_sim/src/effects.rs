use std::collections::VecDeque;

use lumen_core::{
    Rgba, Surface, Viewport, EFFECT_LINE_WIDTH, EXPLOSION_DECAY, EXPLOSION_SPARKS,
    EXPLOSION_SPREAD, SPARK_RADIUS, TRAIL_DECAY, TRAIL_MAX_POINTS, WAVE_SAMPLE_STEP,
};
use rand::Rng;

/// Decorations layered on top of the particle field
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Explosion(Explosion),
    Trail(Trail),
    Wave(Wave),
}

impl Effect {
    pub fn update(&mut self) {
        match self {
            Self::Explosion(e) => e.update(),
            Self::Trail(t) => t.update(),
            Self::Wave(w) => w.update(),
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, viewport: Viewport) {
        match self {
            Self::Explosion(e) => e.draw(surface),
            Self::Trail(t) => t.draw(surface),
            Self::Wave(w) => w.draw(surface, viewport),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Explosion(_) => "explosion",
            Self::Trail(_) => "trail",
            Self::Wave(_) => "wave",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spark {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// 1.0 when spawned, removed at 0.0
    pub life: f32,
}

/// Burst of short-lived sparks flying out from a point
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Explosion {
    pub sparks: Vec<Spark>,
}

impl Explosion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a burst at `(x, y)`; earlier bursts keep flying
    pub fn trigger(&mut self, x: f32, y: f32, rng: &mut impl Rng) {
        let half = EXPLOSION_SPREAD * 0.5;
        self.sparks.extend((0..EXPLOSION_SPARKS).map(|_| Spark {
            x,
            y,
            vx: rng.gen_range(-half..half),
            vy: rng.gen_range(-half..half),
            life: 1.0,
        }));
    }

    pub fn is_active(&self) -> bool {
        !self.sparks.is_empty()
    }

    fn update(&mut self) {
        for s in self.sparks.iter_mut() {
            s.x += s.vx;
            s.y += s.vy;
            s.life -= EXPLOSION_DECAY;
        }
        self.sparks.retain(|s| s.life > 0.0);
    }

    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for s in &self.sparks {
            surface.fill_disc([s.x, s.y], SPARK_RADIUS, Rgba::YELLOW.with_alpha(s.life));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub x: f32,
    pub y: f32,
    pub life: f32,
}

/// Fading polyline following recent pointer positions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trail {
    pub points: VecDeque<TrailPoint>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_point(&mut self, x: f32, y: f32) {
        self.points.push_back(TrailPoint { x, y, life: 1.0 });
        while self.points.len() > TRAIL_MAX_POINTS {
            self.points.pop_front();
        }
    }

    fn update(&mut self) {
        for p in self.points.iter_mut() {
            p.life -= TRAIL_DECAY;
        }
        self.points.retain(|p| p.life > 0.0);
    }

    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        if self.points.len() < 2 {
            return;
        }
        let base = Rgba::CYAN.with_alpha(0.5);
        let coords: Vec<[f32; 2]> = self.points.iter().map(|p| [p.x, p.y]).collect();
        let colors: Vec<Rgba> = self
            .points
            .iter()
            .skip(1)
            .map(|p| base.with_alpha(base.a * p.life))
            .collect();
        surface.stroke_polyline(&coords, EFFECT_LINE_WIDTH, &colors);
    }
}

/// Horizontal sine wave scrolling across the middle of the viewport
#[derive(Debug, Clone, PartialEq)]
pub struct Wave {
    pub amplitude: f32,
    pub frequency: f32,
    pub speed: f32,
    pub time: f32,
}

impl Default for Wave {
    fn default() -> Self {
        Self {
            amplitude: 20.0,
            frequency: 0.02,
            speed: 0.05,
            time: 0.0,
        }
    }
}

impl Wave {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sampled polyline for a viewport
    pub fn points(&self, viewport: Viewport) -> Vec<[f32; 2]> {
        let mid = viewport.height / 2.0;
        let samples = (viewport.width / WAVE_SAMPLE_STEP).ceil() as usize;
        (0..samples)
            .map(|i| {
                let x = i as f32 * WAVE_SAMPLE_STEP;
                [x, mid + (x * self.frequency + self.time).sin() * self.amplitude]
            })
            .collect()
    }

    fn update(&mut self) {
        self.time += self.speed;
    }

    fn draw<S: Surface + ?Sized>(&self, surface: &mut S, viewport: Viewport) {
        let points = self.points(viewport);
        if points.len() < 2 {
            return;
        }
        let colors = vec![Rgba::CYAN.with_alpha(0.3); points.len() - 1];
        surface.stroke_polyline(&points, EFFECT_LINE_WIDTH, &colors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{DrawCommand, RecordingSurface};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_explosion_burns_out() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut effect = Effect::Explosion(Explosion::new());
        let Effect::Explosion(e) = &mut effect else {
            unreachable!()
        };
        e.trigger(100.0, 100.0, &mut rng);
        assert_eq!(e.sparks.len(), EXPLOSION_SPARKS);
        assert!(e.sparks.iter().all(|s| s.vx.abs() <= 5.0 && s.vy.abs() <= 5.0));

        // 1.0 / 0.02 = 50 frames, give float error some slack
        for _ in 0..52 {
            effect.update();
        }
        let Effect::Explosion(e) = &effect else {
            unreachable!()
        };
        assert!(!e.is_active());
    }

    #[test]
    fn test_explosion_draws_fading_sparks() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut e = Explosion::new();
        e.trigger(10.0, 10.0, &mut rng);
        e.update();
        let mut s = RecordingSurface::new(50, 50);
        s.clear();
        Effect::Explosion(e).draw(&mut s, Viewport::new(50.0, 50.0));
        let discs: Vec<_> = s
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Disc { radius, color, .. } => Some((*radius, color.a)),
                _ => None,
            })
            .collect();
        assert_eq!(discs.len(), EXPLOSION_SPARKS);
        assert!(discs.iter().all(|&(r, a)| r == SPARK_RADIUS && (a - 0.98).abs() < 1e-5));
    }

    #[test]
    fn test_trail_is_bounded_and_fades() {
        let mut t = Trail::new();
        for i in 0..(TRAIL_MAX_POINTS + 10) {
            t.add_point(i as f32, 0.0);
        }
        assert_eq!(t.points.len(), TRAIL_MAX_POINTS);
        assert_eq!(t.points.front().map(|p| p.x), Some(10.0));

        let mut s = RecordingSurface::new(100, 100);
        s.clear();
        t.draw(&mut s);
        assert_eq!(s.lines().count(), TRAIL_MAX_POINTS - 1);

        for _ in 0..60 {
            t.update();
        }
        assert!(t.points.is_empty());
    }

    #[test]
    fn test_short_trail_draws_nothing() {
        let mut t = Trail::new();
        t.add_point(1.0, 1.0);
        let mut s = RecordingSurface::new(10, 10);
        s.clear();
        t.draw(&mut s);
        assert_eq!(s.lines().count(), 0);
    }

    #[test]
    fn test_wave_advances_and_spans_viewport() {
        let mut effect = Effect::Wave(Wave::new());
        effect.update();
        effect.update();
        let Effect::Wave(w) = &effect else {
            unreachable!()
        };
        assert!((w.time - 0.1).abs() < 1e-6);

        let vp = Viewport::new(100.0, 60.0);
        let pts = w.points(vp);
        assert_eq!(pts.len(), 20);
        assert_eq!(pts[0][0], 0.0);
        assert!(pts.iter().all(|p| (p[1] - 30.0).abs() <= 20.0 + 1e-4));

        let mut s = RecordingSurface::new(100, 60);
        s.clear();
        effect.draw(&mut s, vp);
        assert_eq!(s.lines().count(), 19);
    }
}
