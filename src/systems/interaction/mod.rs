//! Pointer and keyboard input for the overlay.
//!
//! Buttons carry the `HudClick` they stand for; pressing one emits it. The exit
//! key (Escape or Backspace) is dispatched once per press to whichever
//! interactive component was opened most recently.
use bevy::prelude::*;

use super::HudSystem;
use crate::data::session::{HudKind, HudSession};

pub struct InteractionPlugin;
impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<HudClick>()
            .add_event::<ExitRequested>()
            .add_systems(
                Update,
                (emit_clicks, tint_buttons, dispatch_exit_key).in_set(HudSystem::Input),
            );
    }
}

/// A click on one of the overlay's selectable targets, by index into the
/// currently rendered entries.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum HudClick {
    ActionMenuEntry(usize),
    ActionMenuCenter,
    ContextOption(usize),
    DialogueOption(usize),
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExitRequested(pub HudKind);

pub const EXIT_KEYS: [KeyCode; 2] = [KeyCode::Escape, KeyCode::Backspace];

#[derive(Component, Clone, Copy, Debug)]
#[require(Button)]
pub struct HudButton(pub HudClick);

/// Background colours a button cycles through on hover.
#[derive(Component, Clone, Copy, Debug)]
pub struct ButtonTint {
    pub idle: Color,
    pub hovered: Color,
}

fn emit_clicks(
    buttons: Query<(&Interaction, &HudButton), Changed<Interaction>>,
    mut clicks: EventWriter<HudClick>,
) {
    for (interaction, button) in buttons.iter() {
        if *interaction == Interaction::Pressed {
            clicks.write(button.0);
        }
    }
}

fn tint_buttons(
    mut buttons: Query<(&Interaction, &ButtonTint, &mut BackgroundColor), Changed<Interaction>>,
) {
    for (interaction, tint, mut background) in buttons.iter_mut() {
        background.0 = match interaction {
            Interaction::Hovered | Interaction::Pressed => tint.hovered,
            Interaction::None => tint.idle,
        };
    }
}

pub fn dispatch_exit_key(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    session: Res<HudSession>,
    mut exits: EventWriter<ExitRequested>,
) {
    if !keyboard_input.any_just_released(EXIT_KEYS) {
        return;
    }
    match session.focused() {
        Some(kind) => {
            exits.write(ExitRequested(kind));
        }
        None => debug!("exit key released with no interactive component open"),
    }
}
