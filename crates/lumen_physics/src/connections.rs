use lumen_core::Particle;

/// A connective line between two particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub from: [f32; 2],
    pub to: [f32; 2],
    pub alpha: f32,
}

/// Line opacity for a pair `distance` apart, `None` when they are too far
///
/// Fades linearly from `max_opacity` at distance 0 to nothing at the threshold.
pub fn connection_alpha(distance: f32, threshold: f32, max_opacity: f32) -> Option<f32> {
    if threshold <= 0.0 || !distance.is_finite() || distance >= threshold {
        return None;
    }
    Some((threshold - distance) / threshold * max_opacity)
}

/// Every unordered pair closer than `threshold`
///
/// Quadratic in the particle count; this is the frame-time ceiling of the field.
pub fn find_connections(particles: &[Particle], threshold: f32, max_opacity: f32) -> Vec<Connection> {
    let mut out = Vec::new();
    if threshold <= 0.0 {
        return out;
    }
    let threshold2 = threshold * threshold;

    for (i, a) in particles.iter().enumerate() {
        for (j, b) in particles.iter().enumerate().skip(i + 1) {
            let dx = b.x - a.x;
            let dy = b.y - a.y;
            let d2 = dx * dx + dy * dy;
            // Cheap reject before the sqrt
            if d2 >= threshold2 {
                continue;
            }
            if let Some(alpha) = connection_alpha(d2.sqrt(), threshold, max_opacity) {
                out.push(Connection {
                    a: i,
                    b: j,
                    from: a.pos(),
                    to: b.pos(),
                    alpha,
                });
            }
        }
    }

    out
}
