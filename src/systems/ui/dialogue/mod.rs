//! Branching conversations.
//!
//! A dialogue shows a header, the current node's response paragraphs and its
//! options over a vignette. Choosing an option moves through the conversation
//! tree, ends it, or reports a broken link and stays put.
use bevy::{color::Alpha, prelude::*};

use super::{
    common::{icon, image, label, BODY_FONT_SIZE, HEADER_FONT_SIZE},
    layer::HudContext,
};
use crate::{
    data::{
        callbacks::{CallbackEndpoint, HostCallback},
        config::HudConfig,
        dialogue::DialogueSpec,
        session::HudKind,
    },
    systems::{
        colors::VIGNETTE_ALPHA,
        interaction::{ButtonTint, ExitRequested, HudButton, HudClick},
        HudSystem,
    },
};

pub mod markup;
pub mod tree;

use markup::{parse_markup, RichSpan};
use tree::{validate_conversation, DialogueTree, Transition};

pub struct DialoguePlugin;
impl Plugin for DialoguePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            Dialogue::react
                .in_set(HudSystem::React)
                .run_if(any_with_component::<Dialogue>),
        );
    }
}

#[derive(Component, Debug, Clone)]
pub struct Dialogue {
    tree: DialogueTree,
    body: Entity,
}

#[derive(Component)]
pub struct DialogueVignette;

#[derive(Component)]
pub struct DialogueBody;

#[derive(Component, Debug, Clone, Copy)]
pub struct DialogueOptionRow {
    pub index: usize,
}

/// Emphasis carried by a response span. The bundled font has a single face,
/// so this is kept for hosts that ship bold and italic faces.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emphasis {
    pub bold: bool,
    pub italic: bool,
}

impl Dialogue {
    pub fn tree(&self) -> &DialogueTree {
        &self.tree
    }

    fn react(
        mut clicks: EventReader<HudClick>,
        mut exits: EventReader<ExitRequested>,
        mut hud: HudContext,
        mut dialogues: Query<&mut Dialogue>,
    ) {
        let clicks: Vec<HudClick> = clicks.read().copied().collect();
        let exited = exits.read().any(|exit| exit.0 == HudKind::Dialogue);

        let Some(entity) = hud.session.get(HudKind::Dialogue) else {
            return;
        };
        let Ok(mut dialogue) = dialogues.get_mut(entity) else {
            return;
        };

        for click in clicks {
            let HudClick::DialogueOption(index) = click else {
                continue;
            };
            let node = dialogue.tree().current_id().clone();
            let step = dialogue.tree.select(index);

            let mut ended = false;
            match step.transition {
                Transition::Moved(_) => {
                    render_body(&mut hud.commands, dialogue.body, &dialogue.tree, &hud.config);
                }
                Transition::Ended => ended = true,
                Transition::DeadEnd => {
                    error!("dialogue option {index} on node {node} has no next node and does not end the conversation");
                }
                Transition::Unresolved(next_id) => {
                    error!("dialogue node {next_id} not found (option {index} on node {node})");
                }
                Transition::NoSuchOption => {
                    warn!("dialogue node {node} has no option {index}");
                }
            }

            if let Some(payload) = step.side_effect {
                hud.notify_host(HostCallback::trigger(CallbackEndpoint::DialogueTrigger, payload));
            }
            if ended {
                close(&mut hud);
                return;
            }
        }

        if exited {
            close(&mut hud);
        }
    }
}

/// Replaces any open dialogue. An empty conversation is rejected.
pub fn open(hud: &mut HudContext, spec: DialogueSpec) -> Option<Entity> {
    for issue in validate_conversation(&spec) {
        warn!("dialogue: {issue}");
    }
    let Some(tree) = DialogueTree::new(spec.conversation) else {
        warn!("create_dialogue ignored: the conversation is empty");
        return None;
    };

    let header = spec.header;
    let palette = &hud.config.palette;
    let (text, accent, background) = (palette.text, palette.accent, palette.background);
    let vignette = palette.vignette.with_alpha(VIGNETTE_ALPHA);
    let radius = Val::Px(hud.config.border_radius);

    let root = hud.spawn_on_root(Node {
        position_type: PositionType::Absolute,
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        ..default()
    });
    hud.commands.spawn((
        DialogueVignette,
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(vignette),
        ChildOf(root),
    ));

    let panel = hud
        .commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Vw(25.0),
                bottom: Val::Vh(6.0),
                width: Val::Vw(50.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(14.0)),
                row_gap: Val::Px(10.0),
                ..default()
            },
            BackgroundColor(background),
            BorderRadius::all(radius),
            ChildOf(root),
        ))
        .id();

    let heading = hud
        .commands
        .spawn((
            Node {
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::Center,
                column_gap: Val::Px(8.0),
                ..default()
            },
            ChildOf(panel),
        ))
        .id();
    if let Some(source) = header.image.filter(|source| !source.is_empty()) {
        hud.commands
            .spawn((image(source, 48.0, 48.0), ChildOf(heading)));
    }
    if let Some(glyph) = header.icon.filter(|glyph| !glyph.is_empty()) {
        hud.commands.spawn((icon(glyph, accent), ChildOf(heading)));
    }
    if let Some(message) = header.message {
        for line in message.lines() {
            hud.commands
                .spawn((label(line, HEADER_FONT_SIZE, text), ChildOf(heading)));
        }
    }

    let body = hud
        .commands
        .spawn((
            DialogueBody,
            Node {
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                ..default()
            },
            ChildOf(panel),
        ))
        .id();
    render_body(&mut hud.commands, body, &tree, &hud.config);

    hud.commands.entity(root).insert(Dialogue { tree, body });
    hud.install(HudKind::Dialogue, root);
    Some(root)
}

/// Removes the dialogue, its vignette included.
pub fn close(hud: &mut HudContext) {
    let Some(root) = hud.session.vacate(HudKind::Dialogue) else {
        debug!("no dialogue open");
        return;
    };
    hud.commands.entity(root).try_despawn();
    hud.notify_host(HostCallback::empty(CallbackEndpoint::CloseDialogue));
}

fn render_body(commands: &mut Commands, body: Entity, tree: &DialogueTree, config: &HudConfig) {
    commands.entity(body).despawn_related::<Children>();
    let palette = &config.palette;
    let node = tree.current();

    for line in node.response.lines() {
        let paragraph = commands
            .spawn((label("", BODY_FONT_SIZE, palette.text), ChildOf(body)))
            .id();
        for span in parse_markup(line) {
            spawn_span(commands, paragraph, span, palette.text);
        }
    }

    let tint = ButtonTint {
        idle: palette.secondary_background,
        hovered: palette.accent.with_alpha(0.35),
    };
    for (index, option) in node.options.iter().enumerate() {
        let row = commands
            .spawn((
                DialogueOptionRow { index },
                HudButton(HudClick::DialogueOption(index)),
                tint,
                Node {
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(8.0),
                    padding: UiRect::axes(Val::Px(10.0), Val::Px(6.0)),
                    ..default()
                },
                BackgroundColor(tint.idle),
                BorderRadius::all(Val::Px(config.border_radius)),
                ChildOf(body),
            ))
            .id();
        if let Some(glyph) = option.icon.as_ref().filter(|glyph| !glyph.is_empty()) {
            commands.spawn((icon(glyph.clone(), palette.accent), ChildOf(row)));
        }
        commands.spawn((label(&option.message, BODY_FONT_SIZE, palette.text), ChildOf(row)));
    }
}

fn spawn_span(commands: &mut Commands, paragraph: Entity, span: RichSpan, default_colour: Color) {
    commands.spawn((
        TextSpan::new(span.text),
        TextFont {
            font_size: BODY_FONT_SIZE,
            ..default()
        },
        TextColor(span.colour.unwrap_or(default_colour)),
        Emphasis {
            bold: span.bold,
            italic: span.italic,
        },
        ChildOf(paragraph),
    ));
}
