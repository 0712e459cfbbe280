use lumen_core::Particle;

/// Mean particle speed (pixels/frame)
pub fn mean_speed(particles: &[Particle]) -> f64 {
    if particles.is_empty() {
        return 0.0;
    }
    let total: f64 = particles.iter().map(|p| p.speed() as f64).sum();
    total / particles.len() as f64
}

/// Total kinetic energy, taking each particle's area as its mass
pub fn kinetic_energy(particles: &[Particle]) -> f64 {
    particles
        .iter()
        .map(|p| {
            let mass = (p.radius * p.radius) as f64;
            let v2 = (p.vx * p.vx + p.vy * p.vy) as f64;
            0.5 * mass * v2
        })
        .sum()
}

/// Center of mass of the field, `None` when empty
pub fn centroid(particles: &[Particle]) -> Option<[f32; 2]> {
    if particles.is_empty() {
        return None;
    }
    let n = particles.len() as f64;
    let (sx, sy) = particles
        .iter()
        .fold((0.0f64, 0.0f64), |(sx, sy), p| (sx + p.x as f64, sy + p.y as f64));
    Some([(sx / n) as f32, (sy / n) as f32])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_field() {
        assert_eq!(mean_speed(&[]), 0.0);
        assert_eq!(kinetic_energy(&[]), 0.0);
        assert_eq!(centroid(&[]), None);
    }

    #[test]
    fn test_values() {
        let mut a = Particle::at_rest([0.0, 0.0], 2.0, 1.0);
        a.vx = 3.0;
        a.vy = 4.0;
        let b = Particle::at_rest([10.0, 20.0], 1.0, 1.0);
        let ps = [a, b];

        assert!((mean_speed(&ps) - 2.5).abs() < 1e-9);
        // 0.5 * 4 * 25
        assert!((kinetic_energy(&ps) - 50.0).abs() < 1e-9);
        assert_eq!(centroid(&ps), Some([5.0, 10.0]));
    }
}
