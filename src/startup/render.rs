use bevy::{prelude::*, render::camera::ClearColorConfig};

#[derive(Component)]
pub struct MainCamera;

/// The overlay draws over the game, so the camera clears to transparent.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        MainCamera,
        Camera {
            clear_color: ClearColorConfig::Custom(Color::NONE),
            ..default()
        },
    ));
}
