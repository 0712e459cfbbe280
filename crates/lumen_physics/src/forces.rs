use lumen_core::MIN_DISTANCE;

/// Velocity change pulling a particle at `pos` toward `pointer`
///
/// The pull is linear in how deep the particle sits inside the influence
/// radius: zero at the rim, `force` at the pointer. Returns zero outside
/// the radius and when the particle sits on the pointer (no direction).
pub fn pointer_attraction(pos: [f32; 2], pointer: [f32; 2], influence: f32, force: f32) -> [f32; 2] {
    if influence <= 0.0 {
        return [0.0, 0.0];
    }

    let dx = pointer[0] - pos[0];
    let dy = pointer[1] - pos[1];
    let distance = (dx * dx + dy * dy).sqrt();

    if distance >= influence || distance < MIN_DISTANCE {
        return [0.0, 0.0];
    }

    let strength = (influence - distance) / influence * force;
    [dx / distance * strength, dy / distance * strength]
}

/// Sinusoidal drift for a wobble phase
pub fn wobble_kick(phase: f32, strength: f32) -> [f32; 2] {
    [phase.sin() * strength, phase.cos() * strength]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attraction_points_at_pointer() {
        let dv = pointer_attraction([0.0, 0.0], [30.0, 40.0], 100.0, 1.0);
        // distance 50 of 100 -> half strength along (0.6, 0.8)
        assert!((dv[0] - 0.3).abs() < 1e-6);
        assert!((dv[1] - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_attraction_falls_off_linearly() {
        let near = pointer_attraction([0.0, 0.0], [10.0, 0.0], 100.0, 0.5);
        let far = pointer_attraction([0.0, 0.0], [90.0, 0.0], 100.0, 0.5);
        assert!((near[0] - 0.45).abs() < 1e-6);
        assert!((far[0] - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_attraction_outside_radius() {
        assert_eq!(pointer_attraction([0.0, 0.0], [100.0, 0.0], 100.0, 1.0), [0.0, 0.0]);
        assert_eq!(pointer_attraction([0.0, 0.0], [500.0, 0.0], 100.0, 1.0), [0.0, 0.0]);
    }

    #[test]
    fn test_attraction_is_total() {
        // Particle exactly on the pointer
        let dv = pointer_attraction([5.0, 5.0], [5.0, 5.0], 100.0, 1.0);
        assert_eq!(dv, [0.0, 0.0]);
        // Zero influence radius
        let dv = pointer_attraction([0.0, 0.0], [0.0, 0.0], 0.0, 1.0);
        assert_eq!(dv, [0.0, 0.0]);
        assert!(dv[0].is_finite() && dv[1].is_finite());
    }

    #[test]
    fn test_wobble_kick() {
        let k = wobble_kick(0.0, 0.1);
        assert!(k[0].abs() < 1e-7);
        assert!((k[1] - 0.1).abs() < 1e-7);
        assert_eq!(wobble_kick(1.3, 0.0), [0.0, 0.0]);
    }
}
