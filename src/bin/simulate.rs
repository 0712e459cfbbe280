//! Headless run of a particle field.
//! Usage: simulate [FRAMES] [OPTIONS_JSON]
//! e.g.   simulate 600 '{"particle_count": 150, "connection_distance": 120}'

use lumen_core::{FieldConfig, FieldOptions, Viewport};
use lumen_physics::stats;
use lumen_render::Pixmap;
use lumen_sim::{Effect, Explosion, FrameClock, ParticleField, Trail, Wave};

const FRAME_SECONDS: f64 = 1.0 / 60.0;

fn parse_args() -> Result<(u64, FieldOptions), String> {
    let mut args = std::env::args().skip(1);
    let frames = match args.next() {
        Some(s) => s.parse().map_err(|e| format!("bad frame count {:?}: {e}", s))?,
        None => 600,
    };
    let options = match args.next() {
        Some(json) => serde_json::from_str(&json).map_err(|e| format!("bad options: {e}"))?,
        None => FieldOptions::default(),
    };
    Ok((frames, options))
}

/// Pointer path: a slow circle around the middle of the viewport
fn pointer_at(frame: u64, viewport: Viewport) -> [f32; 2] {
    let t = frame as f32 * 0.02;
    [
        viewport.width * (0.5 + 0.3 * t.cos()),
        viewport.height * (0.5 + 0.3 * t.sin()),
    ]
}

fn main() {
    let (frames, options) = match parse_args() {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    let config = match FieldConfig::default().merged(&options) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    let viewport = Viewport::new(640.0, 360.0);
    let (w, h) = viewport.pixel_size();
    let mut field = match ParticleField::new(Some(Pixmap::new(w, h)), viewport, config, FrameClock::new()) {
        Ok(field) => field,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };
    field.add_effect(Effect::Trail(Trail::new()));
    field.add_effect(Effect::Explosion(Explosion::new()));
    field.add_effect(Effect::Wave(Wave::new()));

    eprintln!(
        "Simulating {} frames of {} particles in {}x{}...",
        frames,
        field.particles().len(),
        w,
        h
    );

    println!("{:>6} {:>8} {:>10} {:>7} {:>9}", "frame", "speed", "energy", "links", "coverage");
    for frame in 0..frames {
        let [px, py] = pointer_at(frame, viewport);
        // The pointer leaves the page for one second out of every five
        if (240..300).contains(&(frame % 300)) {
            field.pointer_left();
        } else {
            field.pointer_moved(px, py);
            field.add_trail_point(px, py);
        }
        if frame % 120 == 60 {
            field.trigger_explosion(px, py);
        }

        field.tick(frame as f64 * FRAME_SECONDS);

        if frame % 60 == 0 || frame + 1 == frames {
            let coverage = field.surface().map_or(0.0, Pixmap::coverage);
            println!(
                "{:>6} {:>8.3} {:>10.2} {:>7} {:>8.2}%",
                frame,
                stats::mean_speed(field.particles()),
                stats::kinetic_energy(field.particles()),
                field.stats().connections,
                coverage * 100.0
            );
        }
    }

    if let Some([cx, cy]) = stats::centroid(field.particles()) {
        println!("Centroid: ({:.1}, {:.1})", cx, cy);
    }
    field.destroy();
    eprintln!("Done.");
}
