use bevy::prelude::*;

use crate::data::{
    callbacks::HostCallback, commands::HudCommand, config::HudConfig, notify::NotifyTemplates,
    session::HudSession,
};

pub mod bridge;
pub mod clipboard;
pub mod colors;
pub mod countdown;
pub mod interaction;
pub mod router;
pub mod ui;

use clipboard::HudClipboard;
use countdown::CountdownPlugin;
use interaction::InteractionPlugin;
use router::RouterPlugin;
use ui::{
    action_menu::ActionMenuPlugin, context_menu::ContextMenuPlugin, dialogue::DialoguePlugin,
    draw_text::DrawTextPlugin, layer::LayerPlugin, notify::NotifyPlugin,
    progress_bar::ProgressBarPlugin, progress_circle::ProgressCirclePlugin,
};

/// Per-frame order of the overlay: commands are routed first, then user input
/// is turned into events the widgets react to, then timers advance and expire,
/// and finally visuals are synced to state.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum HudSystem {
    Route,
    Input,
    React,
    Tick,
    Expire,
    Present,
}

pub struct HudPlugin;
impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<HudConfig>() {
            app.insert_resource(HudConfig::load());
        }
        if !app.world().contains_resource::<HudClipboard>() {
            app.insert_resource(HudClipboard::system());
        }

        app.init_resource::<HudSession>()
            .init_resource::<NotifyTemplates>()
            .add_event::<HudCommand>()
            .add_event::<HostCallback>()
            .configure_sets(
                Update,
                (
                    HudSystem::Route,
                    HudSystem::Input,
                    HudSystem::React,
                    HudSystem::Tick,
                    HudSystem::Expire,
                    HudSystem::Present,
                )
                    .chain(),
            )
            .add_plugins((
                LayerPlugin,
                CountdownPlugin,
                InteractionPlugin,
                RouterPlugin,
                NotifyPlugin,
                ProgressBarPlugin,
                ProgressCirclePlugin,
                DrawTextPlugin,
                ActionMenuPlugin,
                ContextMenuPlugin,
                DialoguePlugin,
            ));
    }
}
