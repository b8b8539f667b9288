use bevy::prelude::*;

use crate::systems::HudPlugin;

pub mod render;

pub struct StartupPlugin;
impl Plugin for StartupPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(HudPlugin)
            .add_systems(Startup, render::setup_camera);
    }
}
