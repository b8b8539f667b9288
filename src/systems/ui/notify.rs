use bevy::prelude::*;

use super::{
    common::{icon, label, spawn_fill_track, BODY_FONT_SIZE, HEADER_FONT_SIZE},
    layer::{FadeOut, HudContext},
};
use crate::{
    data::{
        config::HudConfig,
        notify::{NotifyKind, NotifySpec, NotifyTemplates},
        session::HudKind,
    },
    systems::{
        colors::{colour_or, parse_px},
        countdown::{Countdown, CountdownFinished, CountdownOutcome},
        HudSystem,
    },
};

pub struct NotifyPlugin;
impl Plugin for NotifyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            Notification::expire
                .in_set(HudSystem::Expire)
                .run_if(on_event::<CountdownFinished>),
        );
    }
}

#[derive(Component)]
pub struct NotificationContainer;

#[derive(Component, Debug, Clone, Copy)]
pub struct Notification {
    pub kind: NotifyKind,
}

impl Notification {
    fn expire(
        mut commands: Commands,
        mut finished: EventReader<CountdownFinished>,
        notifications: Query<(), With<Notification>>,
        config: Res<HudConfig>,
    ) {
        for event in finished.read() {
            if event.outcome == CountdownOutcome::Completed && notifications.contains(event.entity)
            {
                commands
                    .entity(event.entity)
                    .try_insert(FadeOut::new(config.fades.notification(), None));
            }
        }
    }
}

/// Appends a card to the notification stack, creating the stack on first use.
pub fn show(hud: &mut HudContext, templates: &NotifyTemplates, spec: &NotifySpec) -> Entity {
    let container = container(hud);
    let (kind, template) = templates.lookup(&spec.kind);
    let style = &spec.style;
    let palette = &hud.config.palette;

    let glyph = style
        .custom_icon
        .clone()
        .filter(|custom| !custom.is_empty())
        .unwrap_or_else(|| template.icon.to_string());
    let text_colour = colour_or(style.text_colour.as_ref(), palette.text);
    let radius = style
        .border_radius
        .as_deref()
        .and_then(parse_px)
        .unwrap_or(hud.config.border_radius);

    let card = hud
        .commands
        .spawn((
            Notification { kind },
            Node {
                flex_direction: FlexDirection::Column,
                min_width: Val::Px(260.0),
                max_width: Val::Px(340.0),
                padding: UiRect::all(Val::Px(10.0)),
                margin: UiRect::bottom(Val::Px(8.0)),
                border: UiRect::left(Val::Px(4.0)),
                ..default()
            },
            BackgroundColor(colour_or(style.background.as_ref(), palette.background)),
            BorderColor(colour_or(style.border_colour.as_ref(), template.colour)),
            BorderRadius::all(Val::Px(radius)),
            ChildOf(container),
        ))
        .id();

    let first_line = hud
        .commands
        .spawn((
            Node {
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::Center,
                column_gap: Val::Px(8.0),
                ..default()
            },
            ChildOf(card),
        ))
        .id();
    hud.commands
        .spawn((icon(glyph, template.colour), ChildOf(first_line)));

    match spec.header() {
        Some(header) => {
            hud.commands.spawn((
                label(header, HEADER_FONT_SIZE, text_colour),
                ChildOf(first_line),
            ));
            hud.commands.spawn((
                label(&spec.message, BODY_FONT_SIZE, text_colour),
                ChildOf(card),
            ));
        }
        None => {
            hud.commands.spawn((
                label(&spec.message, BODY_FONT_SIZE, text_colour),
                ChildOf(first_line),
            ));
        }
    }

    if spec.duration > 0.0 {
        let fill = colour_or(style.bar_fill.as_ref(), template.colour);
        let track = colour_or(style.bar_background.as_ref(), palette.secondary_background);
        hud.commands
            .entity(card)
            .insert(Countdown::from_millis(spec.duration, false));
        spawn_fill_track(&mut hud.commands, card, card, fill, track, radius);
    }

    debug!("notification `{:?}` for {}ms", kind, spec.duration);
    card
}

fn container(hud: &mut HudContext) -> Entity {
    if let Some(container) = hud.session.container(HudKind::Notify) {
        return container;
    }

    let anchor = hud.config.layout.notifications;
    let container = hud.spawn_on_root((
        NotificationContainer,
        Node {
            align_items: AlignItems::FlexEnd,
            ..anchor.node()
        },
    ));
    hud.session.set_container(HudKind::Notify, container);
    container
}
