//! Single entry point for host commands.
//!
//! Commands are handled strictly in arrival order. Each one either shows a
//! widget (replacing any live instance of that kind), acts on the live
//! instance (a no-op when there is none), or passes straight through.
use bevy::prelude::*;

use super::{
    clipboard::HudClipboard,
    ui::{
        action_menu, context_menu, dialogue, draw_text,
        layer::HudContext,
        notify,
        progress_bar::{self, BarCountdowns},
        progress_circle,
    },
    HudSystem,
};
use crate::data::{commands::HudCommand, menu::ContextMenuSpec, notify::NotifyTemplates};

#[cfg(test)]
mod flow_tests;

pub struct RouterPlugin;
impl Plugin for RouterPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            route_commands
                .in_set(HudSystem::Route)
                .run_if(on_event::<HudCommand>),
        );
    }
}

fn route_commands(
    mut inbound: EventReader<HudCommand>,
    mut hud: HudContext,
    templates: Res<NotifyTemplates>,
    mut clipboard: ResMut<HudClipboard>,
    mut bars: BarCountdowns,
) {
    for command in inbound.read() {
        debug!("host command `{}`", command.name());
        match command {
            HudCommand::Notify(spec) => {
                notify::show(&mut hud, &templates, spec);
            }
            HudCommand::ShowCircle(spec) => {
                progress_circle::show(&mut hud, spec);
            }
            HudCommand::ShowProgressbar(spec) => {
                progress_bar::show(&mut hud, &mut bars, spec);
            }
            HudCommand::HideProgressbar => progress_bar::hide(&mut hud, &mut bars),
            HudCommand::ShowDrawtext(spec) => {
                draw_text::show(&mut hud, spec);
            }
            HudCommand::HideDrawtext => draw_text::hide(&mut hud),
            HudCommand::CreateActionMenu { menu } => {
                action_menu::open(&mut hud, menu.clone());
            }
            HudCommand::CloseActionMenu => action_menu::close(&mut hud),
            HudCommand::CreateDialogue { dialogue } => {
                dialogue::open(&mut hud, dialogue.clone());
            }
            HudCommand::CreateContextMenu { menu } => match menu {
                Some(spec @ ContextMenuSpec {
                    header: Some(_),
                    content: Some(_),
                }) => {
                    context_menu::open(&mut hud, spec.clone());
                }
                _ => warn!("create_context_menu needs both a header and content"),
            },
            HudCommand::CloseContextMenu => context_menu::close(&mut hud),
            HudCommand::CopyToClipboard { content } => {
                if let Err(error) = clipboard.copy(content) {
                    warn!("copy_to_clipboard failed: {error}");
                }
            }
            HudCommand::Unknown => debug!("ignoring unknown host command"),
        }
    }
}
