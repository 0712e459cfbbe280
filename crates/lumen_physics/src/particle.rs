use lumen_core::{FieldConfig, Particle, ValueRange, Viewport, WOBBLE_SPEED_MAX, WOBBLE_SPEED_MIN};
use rand::Rng;

/// Generate a fresh particle set scattered across the viewport
pub fn generate_field(config: &FieldConfig, viewport: Viewport, rng: &mut impl Rng) -> Vec<Particle> {
    (0..config.particle_count)
        .map(|_| {
            let pos = [
                rng.gen_range(0.0..=viewport.width),
                rng.gen_range(0.0..=viewport.height),
            ];
            spawn_particle(pos, config, rng)
        })
        .collect()
}

/// A particle at `pos` with randomized motion and look
pub fn spawn_particle(pos: [f32; 2], config: &FieldConfig, rng: &mut impl Rng) -> Particle {
    // Each axis gets its own speed sample, signed and halved by the (u - 0.5) term
    let vx = (rng.gen_range(0.0..1.0f32) - 0.5) * sample(&config.particle_speed, rng);
    let vy = (rng.gen_range(0.0..1.0f32) - 0.5) * sample(&config.particle_speed, rng);

    Particle {
        x: pos[0],
        y: pos[1],
        vx,
        vy,
        radius: sample(&config.particle_size, rng),
        opacity: sample(&config.particle_opacity, rng),
        wobble: rng.gen_range(0.0..std::f32::consts::TAU),
        wobble_speed: rng.gen_range(WOBBLE_SPEED_MIN..WOBBLE_SPEED_MAX),
    }
}

fn sample(range: &ValueRange, rng: &mut impl Rng) -> f32 {
    rng.gen_range(range.min..=range.max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_generate_respects_config() {
        let config = FieldConfig {
            particle_count: 250,
            ..FieldConfig::default()
        };
        let vp = Viewport::new(320.0, 200.0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let particles = generate_field(&config, vp, &mut rng);

        assert_eq!(particles.len(), 250);
        let half_max = config.particle_speed.max * 0.5;
        for p in &particles {
            assert!(vp.contains(p.pos()));
            assert!(p.vx.abs() <= half_max && p.vy.abs() <= half_max);
            assert!((1.0..=3.0).contains(&p.radius));
            assert!((0.1..=0.8).contains(&p.opacity));
            assert!((WOBBLE_SPEED_MIN..WOBBLE_SPEED_MAX).contains(&p.wobble_speed));
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let config = FieldConfig::default();
        let vp = Viewport::default();
        let a = generate_field(&config, vp, &mut ChaCha8Rng::seed_from_u64(1));
        let b = generate_field(&config, vp, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_degenerate_ranges() {
        let config = FieldConfig {
            particle_count: 3,
            particle_size: ValueRange::new(2.0, 2.0),
            particle_speed: ValueRange::new(0.0, 0.0),
            ..FieldConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let particles = generate_field(&config, Viewport::new(0.0, 0.0), &mut rng);
        for p in particles {
            assert_eq!(p.pos(), [0.0, 0.0]);
            assert_eq!(p.vel(), [0.0, 0.0]);
            assert_eq!(p.radius, 2.0);
        }
    }
}
