use lumen_core::{FieldConfig, Particle, Viewport, DAMPING, RESTITUTION};

use crate::forces::{pointer_attraction, wobble_kick};

/// Everything a particle step reads besides the particle itself
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepContext {
    pub pointer: Option<[f32; 2]>,
    pub viewport: Viewport,
    pub mouse_influence: f32,
    pub mouse_force: f32,
    pub wobble_strength: f32,
}

impl StepContext {
    pub fn new(config: &FieldConfig, viewport: Viewport, pointer: Option<[f32; 2]>) -> Self {
        Self {
            pointer,
            viewport,
            mouse_influence: config.mouse_influence,
            mouse_force: config.mouse_force,
            wobble_strength: config.wobble_strength,
        }
    }
}

/// Advance one particle by one frame
pub fn step(p: &mut Particle, ctx: &StepContext) {
    if let Some(pointer) = ctx.pointer {
        let dv = pointer_attraction(p.pos(), pointer, ctx.mouse_influence, ctx.mouse_force);
        p.vx += dv[0];
        p.vy += dv[1];
    }

    p.wobble = (p.wobble + p.wobble_speed) % std::f32::consts::TAU;
    let kick = wobble_kick(p.wobble, ctx.wobble_strength);
    p.vx += kick[0];
    p.vy += kick[1];

    p.x += p.vx;
    p.y += p.vy;

    bounce(&mut p.x, &mut p.vx, ctx.viewport.width);
    bounce(&mut p.y, &mut p.vy, ctx.viewport.height);

    p.vx *= DAMPING;
    p.vy *= DAMPING;

    // Must hold even if something upstream produced garbage
    if !p.x.is_finite() || !p.y.is_finite() {
        p.x = 0.0;
        p.y = 0.0;
    }
    if !p.vx.is_finite() || !p.vy.is_finite() {
        p.vx = 0.0;
        p.vy = 0.0;
    }
    [p.x, p.y] = ctx.viewport.clamp([p.x, p.y]);
}

/// Reflect off `[0, extent]` with energy loss, clamping back inside
fn bounce(pos: &mut f32, vel: &mut f32, extent: f32) {
    if *pos < 0.0 || *pos > extent {
        *vel *= -RESTITUTION;
        *pos = pos.clamp(0.0, extent);
    }
}

/// Advance every particle by one frame; order does not matter
pub fn step_all(particles: &mut [Particle], ctx: &StepContext) {
    for p in particles.iter_mut() {
        step(p, ctx);
    }
}

/// Scale positions from one viewport to another, keeping relative placement
pub fn reposition(particles: &mut [Particle], from: Viewport, to: Viewport) {
    let sx = if from.width > 0.0 { to.width / from.width } else { 0.0 };
    let sy = if from.height > 0.0 { to.height / from.height } else { 0.0 };
    for p in particles.iter_mut() {
        [p.x, p.y] = to.clamp([p.x * sx, p.y * sy]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::generate_field;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn calm(viewport: Viewport) -> StepContext {
        StepContext {
            pointer: None,
            viewport,
            mouse_influence: 100.0,
            mouse_force: 0.5,
            wobble_strength: 0.0,
        }
    }

    #[test]
    fn test_bounds_hold_under_chaos() {
        let config = FieldConfig {
            particle_count: 200,
            mouse_force: 5.0,
            wobble_strength: 2.0,
            ..FieldConfig::default()
        };
        let vp = Viewport::new(300.0, 150.0);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut particles = generate_field(&config, vp, &mut rng);
        let ctx = StepContext::new(&config, vp, Some([150.0, 75.0]));

        for frame in 0..500 {
            step_all(&mut particles, &ctx);
            for p in &particles {
                assert!(vp.contains(p.pos()), "frame {}: {:?}", frame, p.pos());
            }
        }
    }

    #[test]
    fn test_damping_only_speed_never_grows() {
        let config = FieldConfig {
            particle_count: 50,
            particle_speed: lumen_core::ValueRange::new(5.0, 40.0),
            ..FieldConfig::default()
        };
        let vp = Viewport::new(100.0, 100.0);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut particles = generate_field(&config, vp, &mut rng);
        let ctx = calm(vp);

        for _ in 0..300 {
            let before: Vec<f32> = particles.iter().map(Particle::speed).collect();
            step_all(&mut particles, &ctx);
            for (p, prev) in particles.iter().zip(before) {
                assert!(p.speed() <= prev + 1e-6, "{} > {}", p.speed(), prev);
            }
        }
    }

    #[test]
    fn test_bounce_loses_energy() {
        let vp = Viewport::new(100.0, 100.0);
        let mut p = Particle::at_rest([99.0, 50.0], 2.0, 0.5);
        p.vx = 5.0;
        step(&mut p, &calm(vp));
        assert_eq!(p.x, 100.0);
        // -5 * 0.8 restitution * 0.99 damping
        assert!((p.vx + 3.96).abs() < 1e-5);
    }

    #[test]
    fn test_pointer_pulls_particle() {
        let vp = Viewport::new(200.0, 200.0);
        let mut p = Particle::at_rest([50.0, 100.0], 2.0, 0.5);
        let ctx = StepContext {
            pointer: Some([100.0, 100.0]),
            ..calm(vp)
        };
        step(&mut p, &ctx);
        assert!(p.vx > 0.0);
        assert!(p.x > 50.0);
        assert_eq!(p.y, 100.0);
    }

    #[test]
    fn test_particle_on_pointer_stays_finite() {
        let vp = Viewport::new(200.0, 200.0);
        let mut p = Particle::at_rest([100.0, 100.0], 2.0, 0.5);
        let ctx = StepContext {
            pointer: Some([100.0, 100.0]),
            ..calm(vp)
        };
        step(&mut p, &ctx);
        assert!(p.x.is_finite() && p.vx.is_finite());
        assert_eq!(p.pos(), [100.0, 100.0]);
    }

    #[test]
    fn test_zero_viewport_pins_particles() {
        let vp = Viewport::new(0.0, 0.0);
        let mut p = Particle::at_rest([0.0, 0.0], 1.0, 1.0);
        p.vx = 3.0;
        p.vy = -2.0;
        step(&mut p, &calm(vp));
        assert_eq!(p.pos(), [0.0, 0.0]);
    }

    #[test]
    fn test_reposition_scales() {
        let mut ps = vec![Particle::at_rest([50.0, 25.0], 1.0, 1.0)];
        reposition(&mut ps, Viewport::new(100.0, 50.0), Viewport::new(200.0, 200.0));
        assert_eq!(ps[0].pos(), [100.0, 100.0]);
    }
}
