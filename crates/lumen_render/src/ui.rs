use bevy::prelude::*;
use lumen_physics::stats;

use super::plugin::BackgroundField;

/// Marker for the HUD text
#[derive(Component)]
pub struct HudText;

/// Spawn the HUD overlay
pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Text::new("Lumen"),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgba(0.0, 1.0, 1.0, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        HudText,
    ));
}

/// HUD frame counter for throttling
#[derive(Resource, Default)]
pub struct HudThrottle {
    pub frame: u32,
}

/// Update HUD text every 10th frame
pub fn update_hud(
    field: Option<Res<BackgroundField>>,
    mut throttle: ResMut<HudThrottle>,
    mut hud_query: Query<&mut Text, With<HudText>>,
) {
    throttle.frame = throttle.frame.wrapping_add(1);
    if throttle.frame % 10 != 0 {
        return;
    }
    let Ok(mut text) = hud_query.get_single_mut() else {
        return;
    };
    let Some(field) = field else {
        **text = "Lumen | field unavailable".to_string();
        return;
    };
    let field = &field.0;
    let frame_stats = field.stats();

    let fps = frame_stats
        .fps()
        .map_or_else(|| "--".to_string(), |fps| format!("{:.0}", fps));
    let pointer = field
        .pointer()
        .map_or_else(|| "away".to_string(), |[x, y]| format!("{:.0}, {:.0}", x, y));

    **text = format!(
        "LUMEN | {} | {} fps\n\
         Particles: {} (gen {}) | Links: {}\n\
         Mean speed: {:.2} px/frame | Pointer: {}\n\
         \n\
         [Space] Pause  [Up/Down] Count  [W] Wave\n\
         [Click] Burst  [Del] Destroy",
        field.state().name(),
        fps,
        field.particles().len(),
        field.generation(),
        frame_stats.connections,
        stats::mean_speed(field.particles()),
        pointer,
    );
}
