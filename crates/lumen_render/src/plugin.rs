use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::window::{CursorLeft, CursorMoved, PrimaryWindow, WindowResized};
use lumen_core::{FieldConfig, Surface, Viewport};
use lumen_sim::{Effect, Explosion, FieldState, FrameClock, ParticleField, Trail, Wave};

use super::raster::Pixmap;
use super::ui;

/// The window's particle background
#[derive(Resource)]
pub struct BackgroundField(pub ParticleField<Pixmap>);

/// Texture the raster is uploaded into
#[derive(Resource)]
pub struct FieldTexture(pub Handle<Image>);

/// Marker for the sprite showing the field texture
#[derive(Component)]
pub struct FieldSprite;

/// Config the field is built from at startup
#[derive(Resource, Clone)]
struct FieldSettings(FieldConfig);

/// Particle count change per arrow key press
const COUNT_STEP: u32 = 10;

/// Hosts a particle field behind everything else in the primary window
#[derive(Default)]
pub struct FieldPlugin {
    pub config: FieldConfig,
}

impl Plugin for FieldPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(FieldSettings(self.config.clone()))
            .init_resource::<ui::HudThrottle>()
            .add_systems(Startup, (spawn_field, ui::spawn_hud))
            .add_systems(
                Update,
                (
                    track_pointer,
                    follow_resize,
                    field_controls,
                    advance_field
                        .after(track_pointer)
                        .after(follow_resize)
                        .after(field_controls),
                    upload_raster.after(advance_field),
                    ui::update_hud.after(advance_field),
                ),
            );
    }
}

fn field_image(viewport: Viewport) -> Image {
    let (width, height) = viewport.pixel_size();
    Image::new_fill(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &[0, 0, 0, 0],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    )
}

/// Build the field for the primary window and the sprite that shows it
fn spawn_field(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    settings: Res<FieldSettings>,
    window_q: Query<&Window, With<PrimaryWindow>>,
) {
    let viewport = window_q
        .get_single()
        .map(|w| Viewport::new(w.width(), w.height()))
        .unwrap_or_default();

    let (w, h) = viewport.pixel_size();
    let mut field = match ParticleField::new(
        Some(Pixmap::new(w, h)),
        viewport,
        settings.0.clone(),
        FrameClock::new(),
    ) {
        Ok(field) => field,
        Err(e) => {
            error!("Particle field not started: {}", e);
            return;
        }
    };
    field.add_effect(Effect::Trail(Trail::new()));
    field.add_effect(Effect::Explosion(Explosion::new()));

    let texture = images.add(field_image(viewport));
    commands.spawn(Camera2d);
    commands.spawn((
        Sprite {
            image: texture.clone(),
            custom_size: Some(Vec2::new(viewport.width, viewport.height)),
            ..default()
        },
        FieldSprite,
    ));
    commands.insert_resource(FieldTexture(texture));
    commands.insert_resource(BackgroundField(field));
}

/// Feed pointer movement, exits and clicks to the field
fn track_pointer(
    mut moved: EventReader<CursorMoved>,
    mut left: EventReader<CursorLeft>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    window_q: Query<&Window, With<PrimaryWindow>>,
    field: Option<ResMut<BackgroundField>>,
) {
    let Some(mut field) = field else {
        moved.clear();
        left.clear();
        return;
    };

    for event in moved.read() {
        field.0.pointer_moved(event.position.x, event.position.y);
        field.0.add_trail_point(event.position.x, event.position.y);
    }
    if left.read().count() > 0 {
        field.0.pointer_left();
    }

    if mouse_button.just_pressed(MouseButton::Left) {
        if let Some(pos) = window_q.get_single().ok().and_then(|w| w.cursor_position()) {
            field.0.trigger_explosion(pos.x, pos.y);
        }
    }
}

/// Resize the field whenever the primary window changes size
fn follow_resize(
    mut resized: EventReader<WindowResized>,
    window_q: Query<Entity, With<PrimaryWindow>>,
    field: Option<ResMut<BackgroundField>>,
) {
    let Some(mut field) = field else {
        resized.clear();
        return;
    };
    let Ok(primary) = window_q.get_single() else {
        return;
    };
    // Only the latest size matters
    if let Some(event) = resized.read().filter(|e| e.window == primary).last() {
        field.0.resize(Viewport::new(event.width, event.height));
        info!("Field resized to {}x{}", event.width, event.height);
    }
}

/// Keyboard controls: pause, particle count, wave overlay
fn field_controls(keyboard: Res<ButtonInput<KeyCode>>, field: Option<ResMut<BackgroundField>>) {
    let Some(mut field) = field else {
        return;
    };
    let field = &mut field.0;

    if keyboard.just_pressed(KeyCode::Space) {
        match field.state() {
            FieldState::Running => field.pause(),
            FieldState::Paused => field.resume(),
            _ => {}
        }
    }

    let count = field.config().particle_count;
    let requested = if keyboard.just_pressed(KeyCode::ArrowUp) {
        Some(count.saturating_add(COUNT_STEP))
    } else if keyboard.just_pressed(KeyCode::ArrowDown) {
        Some(count.saturating_sub(COUNT_STEP))
    } else {
        None
    };
    if let Some(n) = requested {
        if let Err(e) = field.set_particle_count(n) {
            warn!("Particle count unchanged: {}", e);
        }
    }

    if keyboard.just_pressed(KeyCode::KeyW) && field.remove_effects("wave") == 0 {
        field.add_effect(Effect::Wave(Wave::new()));
    }

    if keyboard.just_pressed(KeyCode::Delete) {
        field.destroy();
    }
}

/// Fire the field's pending animation frame
fn advance_field(time: Res<Time>, field: Option<ResMut<BackgroundField>>) {
    if let Some(mut field) = field {
        field.0.tick(time.elapsed_secs_f64());
    }
}

/// Copy the raster into the sprite texture after each rendered frame
fn upload_raster(
    field: Option<Res<BackgroundField>>,
    texture: Option<Res<FieldTexture>>,
    mut images: ResMut<Assets<Image>>,
    mut sprite_q: Query<&mut Sprite, With<FieldSprite>>,
    mut uploaded: Local<Option<u64>>,
) {
    let (Some(field), Some(texture)) = (field, texture) else {
        return;
    };

    let Some(pixmap) = field.0.surface() else {
        // Destroyed: hide what was left on screen
        for mut sprite in sprite_q.iter_mut() {
            sprite.custom_size = Some(Vec2::ZERO);
        }
        return;
    };

    let frames = field.0.stats().frames;
    if *uploaded == Some(frames) {
        return;
    }
    let Some(image) = images.get_mut(&texture.0) else {
        return;
    };

    let (width, height) = pixmap.size();
    if image.size() != UVec2::new(width, height) {
        image.resize(Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        });
    }
    image.data = pixmap.as_bytes().to_vec();

    let viewport = field.0.viewport();
    for mut sprite in sprite_q.iter_mut() {
        sprite.custom_size = Some(Vec2::new(viewport.width, viewport.height));
    }
    *uploaded = Some(frames);
}
