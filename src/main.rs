use bevy::prelude::*;
use lumen_core::FieldConfig;
use lumen_render::plugin::FieldPlugin;

fn main() {
    let config = FieldConfig::default();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Lumen".into(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.06)))
        .add_plugins(FieldPlugin { config })
        .run();
}
