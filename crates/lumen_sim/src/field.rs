use bevy::log::{debug, info, warn};
use lumen_core::{
    ConfigError, FieldConfig, FieldId, FieldOptions, Particle, PointerState, RadialGradient,
    ResizePolicy, Rgba, Surface, ValueRange, Viewport, CONNECTION_LINE_WIDTH,
};
use lumen_physics::connections::find_connections;
use lumen_physics::motion::{self, StepContext};
use lumen_physics::particle::generate_field;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::effects::Effect;
use crate::schedule::{FrameClock, FrameHandle, FrameScheduler};

/// Lifecycle of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldState {
    /// A frame is always pending while running
    Running,
    Paused,
    /// Terminal: particles and surface released
    Destroyed,
    /// Terminal: built without a surface, ignores everything
    Inert,
}

impl FieldState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Destroyed => "destroyed",
            Self::Inert => "inert",
        }
    }
}

/// Counters describing recent frames
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Frames rendered since construction
    pub frames: u64,
    /// Host timestamp of the latest frame (seconds)
    pub last_frame_at: Option<f64>,
    /// Seconds between the two latest frames
    pub frame_interval: Option<f64>,
    /// Connective lines drawn in the latest frame
    pub connections: usize,
}

impl FrameStats {
    pub fn fps(&self) -> Option<f64> {
        self.frame_interval.filter(|dt| *dt > 0.0).map(|dt| 1.0 / dt)
    }
}

/// Animated particle background bound to one drawing surface
///
/// While running, the field keeps exactly one frame request outstanding
/// with its scheduler; each fired request advances every particle, redraws
/// the surface and asks for the next frame.
pub struct ParticleField<S: Surface, H: FrameScheduler = FrameClock> {
    id: FieldId,
    state: FieldState,
    config: FieldConfig,
    viewport: Viewport,
    pointer: PointerState,
    particles: Vec<Particle>,
    effects: Vec<Effect>,
    surface: Option<S>,
    scheduler: H,
    pending: Option<FrameHandle>,
    rng: ChaCha8Rng,
    /// Incremented each time the particle set is rebuilt
    generation: u32,
    stats: FrameStats,
}

impl<S: Surface, H: FrameScheduler> ParticleField<S, H> {
    /// Build a field and start animating it
    ///
    /// Without a surface the field is permanently inert.
    pub fn new(
        surface: Option<S>,
        viewport: Viewport,
        config: FieldConfig,
        scheduler: H,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut field = Self {
            id: FieldId::new(),
            state: FieldState::Inert,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            viewport,
            pointer: PointerState::default(),
            particles: Vec::new(),
            effects: Vec::new(),
            surface,
            scheduler,
            pending: None,
            generation: 0,
            stats: FrameStats::default(),
        };

        if field.surface.is_none() {
            warn!("Field {}: no drawing surface, staying inert", field.id);
            return Ok(field);
        }
        if let Some(surface) = field.surface.as_mut() {
            let (w, h) = viewport.pixel_size();
            surface.resize(w, h);
        }

        field.rebuild();
        field.state = FieldState::Running;
        field.request_frame();
        info!(
            "Field {} started: {} particles in {}x{}",
            field.id,
            field.particles.len(),
            viewport.width,
            viewport.height
        );
        Ok(field)
    }

    /// Run a frame if the scheduler says one is due. Returns whether it ran.
    pub fn tick(&mut self, now: f64) -> bool {
        let Some(handle) = self.scheduler.take_due() else {
            return false;
        };
        if self.pending != Some(handle) {
            // Request from before a pause; the field has moved on
            return false;
        }
        self.pending = None;
        if self.state != FieldState::Running {
            return false;
        }

        self.update();
        self.render();
        self.stats.frames += 1;
        self.stats.frame_interval = self.stats.last_frame_at.map(|prev| now - prev);
        self.stats.last_frame_at = Some(now);

        self.request_frame();
        true
    }

    /// Advance particles and effects by one frame; paused fields stay still
    pub fn update(&mut self) {
        if self.state != FieldState::Running {
            return;
        }
        let ctx = StepContext::new(&self.config, self.viewport, self.pointer.position());
        motion::step_all(&mut self.particles, &ctx);
        for effect in self.effects.iter_mut() {
            effect.update();
        }
    }

    /// Redraw the whole field onto the surface
    pub fn render(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.clear();

        for p in &self.particles {
            let glow = RadialGradient::glow(p.pos(), p.radius * 2.0, Rgba::CYAN.with_alpha(p.opacity));
            surface.fill_radial_gradient(&glow);
        }

        let connections = find_connections(
            &self.particles,
            self.config.connection_distance,
            self.config.connection_opacity,
        );
        for c in &connections {
            surface.stroke_line(c.from, c.to, CONNECTION_LINE_WIDTH, Rgba::CYAN.with_alpha(c.alpha));
        }
        self.stats.connections = connections.len();

        for effect in &self.effects {
            effect.draw(surface, self.viewport);
        }
    }

    /// Stop animating; the pending frame is withdrawn
    pub fn pause(&mut self) {
        if self.state != FieldState::Running {
            return;
        }
        self.cancel_pending();
        self.state = FieldState::Paused;
        debug!("Field {} paused", self.id);
    }

    /// Continue animating after [`pause`](Self::pause)
    pub fn resume(&mut self) {
        if self.state != FieldState::Paused {
            return;
        }
        self.state = FieldState::Running;
        self.request_frame();
        debug!("Field {} resumed", self.id);
    }

    pub fn start(&mut self) {
        self.resume();
    }

    /// Stop for good, dropping particles, effects and the surface
    pub fn destroy(&mut self) {
        if !self.is_live() {
            return;
        }
        self.cancel_pending();
        self.particles.clear();
        self.effects.clear();
        self.surface = None;
        self.state = FieldState::Destroyed;
        info!("Field {} destroyed after {} frames", self.id, self.stats.frames);
    }

    /// Merge `options` into the config and rebuild the particle set
    ///
    /// Rejected options leave the field untouched.
    pub fn reconfigure(&mut self, options: &FieldOptions) -> Result<(), ConfigError> {
        if !self.is_live() {
            return Ok(());
        }
        let next = self.config.merged(options)?;
        if next.seed != self.config.seed {
            self.rng = ChaCha8Rng::seed_from_u64(next.seed);
        }
        self.config = next;
        self.rebuild();
        Ok(())
    }

    pub fn set_particle_count(&mut self, count: u32) -> Result<(), ConfigError> {
        self.reconfigure(&FieldOptions::particle_count(count))
    }

    /// Change the speed range used for particles built from now on
    pub fn set_speed(&mut self, speed: ValueRange) -> Result<(), ConfigError> {
        self.tune(&FieldOptions {
            particle_speed: Some(speed),
            ..Default::default()
        })
    }

    /// Change the pointer's pull radius without rebuilding
    pub fn set_mouse_influence(&mut self, radius: f32) -> Result<(), ConfigError> {
        self.tune(&FieldOptions {
            mouse_influence: Some(radius),
            ..Default::default()
        })
    }

    /// Follow a viewport size change
    pub fn resize(&mut self, viewport: Viewport) {
        if !self.is_live() {
            return;
        }
        let previous = self.viewport;
        self.viewport = viewport;
        if let Some(surface) = self.surface.as_mut() {
            let (w, h) = viewport.pixel_size();
            surface.resize(w, h);
        }
        match self.config.resize_policy {
            ResizePolicy::Regenerate => self.rebuild(),
            ResizePolicy::Reposition => motion::reposition(&mut self.particles, previous, viewport),
        }
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if self.is_live() {
            self.pointer.moved(x, y);
        }
    }

    pub fn pointer_left(&mut self) {
        self.pointer.left();
    }

    /// Install a decoration drawn on top of the particles
    pub fn add_effect(&mut self, effect: Effect) {
        if self.is_live() {
            debug!("Field {}: added {} effect", self.id, effect.name());
            self.effects.push(effect);
        }
    }

    /// Remove every installed effect with the given name, returning how many went
    pub fn remove_effects(&mut self, name: &str) -> usize {
        let before = self.effects.len();
        self.effects.retain(|e| e.name() != name);
        before - self.effects.len()
    }

    /// Burst sparks at a point; no-op without an explosion effect installed
    pub fn trigger_explosion(&mut self, x: f32, y: f32) {
        let rng = &mut self.rng;
        if let Some(explosion) = self.effects.iter_mut().find_map(|e| match e {
            Effect::Explosion(explosion) => Some(explosion),
            _ => None,
        }) {
            explosion.trigger(x, y, rng);
        }
    }

    /// Extend the pointer trail; no-op without a trail effect installed
    pub fn add_trail_point(&mut self, x: f32, y: f32) {
        if let Some(trail) = self.effects.iter_mut().find_map(|e| match e {
            Effect::Trail(trail) => Some(trail),
            _ => None,
        }) {
            trail.add_point(x, y);
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pointer(&self) -> Option<[f32; 2]> {
        self.pointer.position()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Direct access for hosts that place particles themselves
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn scheduler(&self) -> &H {
        &self.scheduler
    }

    /// Whether the field still reacts to input (running or paused)
    pub fn is_live(&self) -> bool {
        matches!(self.state, FieldState::Running | FieldState::Paused)
    }

    fn tune(&mut self, options: &FieldOptions) -> Result<(), ConfigError> {
        if self.is_live() {
            self.config = self.config.merged(options)?;
        }
        Ok(())
    }

    fn rebuild(&mut self) {
        self.particles = generate_field(&self.config, self.viewport, &mut self.rng);
        self.generation = self.generation.wrapping_add(1);
        debug!(
            "Field {}: rebuilt {} particles (generation {})",
            self.id,
            self.particles.len(),
            self.generation
        );
    }

    fn request_frame(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame());
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}
