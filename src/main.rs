use bevy::prelude::*;

mod data;
mod error;
mod startup;
mod systems;

use crate::{startup::StartupPlugin, systems::bridge::HostBridgePlugin};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: String::from("HUD Overlay"),
                transparent: true,
                decorations: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::NONE))
        .add_plugins((StartupPlugin, HostBridgePlugin))
        .run();
}
