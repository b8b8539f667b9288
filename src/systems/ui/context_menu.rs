use bevy::{color::Alpha, prelude::*};
use serde_json::Value;

use super::{
    common::{icon, image, label, BODY_FONT_SIZE, HEADER_FONT_SIZE},
    layer::HudContext,
};
use crate::{
    data::{
        callbacks::{CallbackEndpoint, HostCallback},
        menu::{ContextMenuSpec, ContextOption},
        session::HudKind,
    },
    systems::{
        interaction::{ButtonTint, ExitRequested, HudButton, HudClick},
        HudSystem,
    },
};

const DISABLED_ALPHA: f32 = 0.4;

pub struct ContextMenuPlugin;
impl Plugin for ContextMenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            ContextMenu::react
                .in_set(HudSystem::React)
                .run_if(any_with_component::<ContextMenu>),
        );
    }
}

#[derive(Component, Debug, Clone)]
pub struct ContextMenu {
    options: Vec<ContextOption>,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct ContextRow {
    pub index: usize,
    pub disabled: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ContextSelection {
    Chosen {
        action: Option<Value>,
        should_close: bool,
    },
    Inert,
}

impl ContextMenu {
    pub fn new(options: Vec<ContextOption>) -> Self {
        Self { options }
    }

    /// Disabled or unknown rows do nothing.
    pub fn select(&self, index: usize) -> ContextSelection {
        match self.options.get(index) {
            Some(option) if !option.disabled => ContextSelection::Chosen {
                action: option.action.clone(),
                should_close: option.should_close,
            },
            _ => ContextSelection::Inert,
        }
    }

    fn react(
        mut clicks: EventReader<HudClick>,
        mut exits: EventReader<ExitRequested>,
        mut hud: HudContext,
        menus: Query<&ContextMenu>,
    ) {
        let clicks: Vec<HudClick> = clicks.read().copied().collect();
        let exited = exits.read().any(|exit| exit.0 == HudKind::ContextMenu);

        let Some(entity) = hud.session.get(HudKind::ContextMenu) else {
            return;
        };
        let Ok(menu) = menus.get(entity) else {
            return;
        };

        for click in clicks {
            let HudClick::ContextOption(index) = click else {
                continue;
            };
            if let ContextSelection::Chosen {
                action,
                should_close,
            } = menu.select(index)
            {
                if let Some(action) = action {
                    hud.notify_host(HostCallback::new(
                        CallbackEndpoint::ContextMenuTrigger,
                        action,
                    ));
                }
                if should_close {
                    close(&mut hud);
                    return;
                }
            }
        }

        if exited {
            close(&mut hud);
        }
    }
}

/// Replaces any open context menu. Missing header parts are skipped.
pub fn open(hud: &mut HudContext, spec: ContextMenuSpec) -> Entity {
    let options = spec.content.unwrap_or_default();
    if options.is_empty() {
        warn!("context menu opened without content");
    }

    let palette = &hud.config.palette;
    let (text, accent, background, secondary) = (
        palette.text,
        palette.accent,
        palette.background,
        palette.secondary_background,
    );
    let radius = Val::Px(hud.config.border_radius);

    let menu = hud.spawn_on_root((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Vh(20.0),
            right: Val::Vw(2.0),
            width: Val::Px(286.0),
            flex_direction: FlexDirection::Column,
            padding: UiRect::all(Val::Px(8.0)),
            row_gap: Val::Px(4.0),
            ..default()
        },
        BackgroundColor(background),
        BorderRadius::all(radius),
    ));

    if let Some(header) = spec.header {
        let heading = hud
            .commands
            .spawn((
                Node {
                    flex_direction: FlexDirection::Column,
                    margin: UiRect::bottom(Val::Px(6.0)),
                    ..default()
                },
                ChildOf(menu),
            ))
            .id();
        if let Some(source) = header.image.filter(|source| !source.is_empty()) {
            hud.commands
                .spawn((image(source, 270.0, 90.0), ChildOf(heading)));
        }
        if let Some(title) = header.title.filter(|title| !title.is_empty()) {
            hud.commands
                .spawn((label(title, HEADER_FONT_SIZE, text), ChildOf(heading)));
        }
        if let Some(subtitle) = header.subtitle.filter(|subtitle| !subtitle.is_empty()) {
            hud.commands.spawn((
                label(subtitle, BODY_FONT_SIZE, text.with_alpha(0.7)),
                ChildOf(heading),
            ));
        }
    }

    let tint = ButtonTint {
        idle: secondary,
        hovered: background,
    };
    for (index, option) in options.iter().enumerate() {
        let row_node = Node {
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            column_gap: Val::Px(8.0),
            padding: UiRect::axes(Val::Px(10.0), Val::Px(6.0)),
            ..default()
        };
        let row_marker = ContextRow {
            index,
            disabled: option.disabled,
        };
        let row = if option.disabled {
            hud.commands
                .spawn((
                    row_marker,
                    row_node,
                    BackgroundColor(secondary.with_alpha(DISABLED_ALPHA)),
                    BorderRadius::all(radius),
                    ChildOf(menu),
                ))
                .id()
        } else {
            hud.commands
                .spawn((
                    row_marker,
                    HudButton(HudClick::ContextOption(index)),
                    tint,
                    row_node,
                    BackgroundColor(tint.idle),
                    BorderRadius::all(radius),
                    ChildOf(menu),
                ))
                .id()
        };

        let row_text = if option.disabled {
            text.with_alpha(DISABLED_ALPHA)
        } else {
            text
        };
        if let Some(glyph) = option.icon.as_ref().filter(|glyph| !glyph.is_empty()) {
            hud.commands
                .spawn((icon(glyph.clone(), accent), ChildOf(row)));
        }
        hud.commands
            .spawn((label(&option.label, BODY_FONT_SIZE, row_text), ChildOf(row)));
    }

    hud.commands
        .entity(menu)
        .insert(ContextMenu::new(options));
    hud.install(HudKind::ContextMenu, menu);
    menu
}

/// Tells the host right away and lets the menu fade out.
pub fn close(hud: &mut HudContext) {
    let Some(menu) = hud.session.vacate(HudKind::ContextMenu) else {
        debug!("no context menu open");
        return;
    };
    hud.commands.entity(menu).remove::<ContextMenu>();
    let fade = hud.config.fades.context_menu();
    hud.fade_out(menu, fade, None);
    hud.notify_host(HostCallback::empty(CallbackEndpoint::CloseContextMenu));
}
