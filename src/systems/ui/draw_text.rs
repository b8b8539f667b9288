use bevy::prelude::*;

use super::{
    common::{icon, label, spawn_fill_track, BODY_FONT_SIZE, HEADER_FONT_SIZE, ICON_SIZE},
    layer::HudContext,
};
use crate::{
    data::{
        callbacks::{CallbackEndpoint, HostCallback},
        commands::{DrawTextGlyph, DrawTextSpec},
        session::HudKind,
    },
    systems::{
        colors::{colour_or, parse_px},
        countdown::{Countdown, CountdownFinished, CountdownOutcome},
        HudSystem,
    },
};

pub struct DrawTextPlugin;
impl Plugin for DrawTextPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            DrawText::expire
                .in_set(HudSystem::Expire)
                .run_if(on_event::<CountdownFinished>),
        );
    }
}

#[derive(Component)]
pub struct DrawTextContainer;

/// The hint card currently shown in the draw-text container.
#[derive(Component)]
pub struct DrawText;

/// Upper-cased key the player is prompted to press.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct KeyPrompt(pub String);

impl DrawText {
    fn expire(
        mut finished: EventReader<CountdownFinished>,
        mut hud: HudContext,
        hints: Query<(), With<DrawText>>,
    ) {
        for event in finished.read() {
            if event.outcome != CountdownOutcome::Completed || !hints.contains(event.entity) {
                continue;
            }
            // A replaced hint is already gone; only the live one may expire.
            if hud.session.vacate_if(HudKind::DrawText, event.entity) {
                hud.notify_host(HostCallback::empty(CallbackEndpoint::HideDrawText));
                let fade = hud.config.fades.draw_text();
                hud.fade_out(event.entity, fade, None);
            }
        }
    }
}

pub fn show(hud: &mut HudContext, spec: &DrawTextSpec) -> Entity {
    let container = container(hud);
    let style = &spec.style;
    let palette = &hud.config.palette;
    let text_colour = colour_or(style.text_colour.as_ref(), palette.text);
    let accent = palette.accent;
    let background = colour_or(style.background.as_ref(), palette.background);
    let border = colour_or(style.border_colour.as_ref(), palette.border);
    let fill = colour_or(style.bar_fill.as_ref(), palette.accent);
    let track = colour_or(style.bar_background.as_ref(), palette.secondary_background);
    let radius = style
        .border_radius
        .as_deref()
        .and_then(parse_px)
        .unwrap_or(hud.config.border_radius);

    let card = hud
        .commands
        .spawn((
            DrawText,
            Node {
                flex_direction: FlexDirection::Column,
                max_width: Val::Px(320.0),
                padding: UiRect::all(Val::Px(10.0)),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(background),
            BorderColor(border),
            BorderRadius::all(Val::Px(radius)),
            ChildOf(container),
        ))
        .id();

    let row = hud
        .commands
        .spawn((
            Node {
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::Center,
                column_gap: Val::Px(10.0),
                ..default()
            },
            ChildOf(card),
        ))
        .id();

    match spec.glyph() {
        DrawTextGlyph::Icon(glyph) => {
            hud.commands.spawn((icon(glyph, accent), ChildOf(row)));
        }
        DrawTextGlyph::Key(key) => {
            let keycap = hud
                .commands
                .spawn((
                    Node {
                        min_width: Val::Px(ICON_SIZE + 10.0),
                        padding: UiRect::axes(Val::Px(6.0), Val::Px(2.0)),
                        justify_content: JustifyContent::Center,
                        border: UiRect::all(Val::Px(1.0)),
                        ..default()
                    },
                    BorderColor(accent),
                    BorderRadius::all(Val::Px(radius)),
                    ChildOf(row),
                ))
                .id();
            hud.commands.spawn((
                KeyPrompt(key.clone()),
                label(key, HEADER_FONT_SIZE, accent),
                ChildOf(keycap),
            ));
        }
        DrawTextGlyph::None => {}
    }

    let copy = hud
        .commands
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                ..default()
            },
            ChildOf(row),
        ))
        .id();
    hud.commands
        .spawn((label(&spec.header, HEADER_FONT_SIZE, text_colour), ChildOf(copy)));
    hud.commands
        .spawn((label(&spec.message, BODY_FONT_SIZE, text_colour), ChildOf(copy)));

    if spec.duration > 0.0 {
        hud.commands
            .entity(card)
            .insert(Countdown::from_millis(spec.duration, false));
        spawn_fill_track(&mut hud.commands, card, card, fill, track, radius);
    }

    hud.install(HudKind::DrawText, card);
    card
}

/// Fades the hint out. The host asked for this, so it is not told about it.
pub fn hide(hud: &mut HudContext) {
    match hud.session.vacate(HudKind::DrawText) {
        Some(card) => {
            let fade = hud.config.fades.draw_text();
            hud.fade_out(card, fade, None);
        }
        None => debug!("no draw text shown"),
    }
}

fn container(hud: &mut HudContext) -> Entity {
    if let Some(container) = hud.session.container(HudKind::DrawText) {
        return container;
    }

    let node = hud.config.layout.draw_text.node();
    let container = hud.spawn_on_root((DrawTextContainer, node));
    hud.session.set_container(HudKind::DrawText, container);
    container
}
