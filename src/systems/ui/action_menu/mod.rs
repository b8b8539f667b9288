//! Dual-column action picker with nested submenus.
//!
//! Entries alternate right/left by index around a centre button that steps
//! back out of a submenu, or closes the menu at the root level.
use bevy::prelude::*;

use super::{
    common::{icon, label, BODY_FONT_SIZE},
    layer::HudContext,
};
use crate::{
    data::{
        callbacks::{CallbackEndpoint, HostCallback, TriggerPayload},
        config::HudConfig,
        menu::MenuAction,
        session::HudKind,
    },
    systems::{
        colors::colour_or,
        interaction::{ButtonTint, ExitRequested, HudButton, HudClick},
        HudSystem,
    },
};

pub mod stack;

use stack::MenuStack;

const BACK_ICON: &str = "fa fa-rotate-left";
const CLOSE_ICON: &str = "fa fa-times";
const CROWDED_COLUMN: usize = 2;
const CROWDED_OFFSET_PERCENT: f32 = 10.0;

pub struct ActionMenuPlugin;
impl Plugin for ActionMenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            ActionMenu::react
                .in_set(HudSystem::React)
                .run_if(any_with_component::<ActionMenu>),
        );
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuColumn {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntrySlot {
    pub index: usize,
    pub column: MenuColumn,
    /// Horizontal nudge towards the centre, in percent of the entry width.
    pub offset_percent: f32,
}

/// Even indices go right, odd indices go left. A column with more than two
/// entries pulls its first and last entry towards the centre.
pub fn layout_entries(count: usize) -> Vec<EntrySlot> {
    let column_of = |index: usize| {
        if index % 2 == 0 {
            MenuColumn::Right
        } else {
            MenuColumn::Left
        }
    };

    let mut slots = Vec::with_capacity(count);
    for column in [MenuColumn::Left, MenuColumn::Right] {
        let members: Vec<usize> = (0..count).filter(|index| column_of(*index) == column).collect();
        let crowded = members.len() > CROWDED_COLUMN;
        let nudge = match column {
            MenuColumn::Left => CROWDED_OFFSET_PERCENT,
            MenuColumn::Right => -CROWDED_OFFSET_PERCENT,
        };

        for (position, index) in members.iter().enumerate() {
            let at_edge = position == 0 || position + 1 == members.len();
            slots.push(EntrySlot {
                index: *index,
                column,
                offset_percent: if crowded && at_edge { nudge } else { 0.0 },
            });
        }
    }
    slots.sort_by_key(|slot| slot.index);
    slots
}

#[derive(Clone, Debug, PartialEq)]
pub enum MenuSelection {
    Descended,
    Triggered {
        payload: TriggerPayload,
        closes_menu: bool,
    },
    Missing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CenterControl {
    Back,
    Close,
}

#[derive(Component, Debug, Clone)]
pub struct ActionMenu {
    stack: MenuStack,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct ActionEntry {
    pub index: usize,
    pub column: MenuColumn,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct CenterButton(pub CenterControl);

impl ActionMenu {
    pub fn open(actions: Vec<MenuAction>) -> Self {
        Self {
            stack: MenuStack::new(actions),
        }
    }

    pub fn stack(&self) -> &MenuStack {
        &self.stack
    }

    /// A branch descends into its submenu. Anything else is a trigger, which
    /// also closes the menu when picked from the root level.
    pub fn select(&mut self, index: usize) -> MenuSelection {
        let (submenu, payload) = match self.stack.top().and_then(|level| level.get(index)) {
            Some(action) => (action.submenu.clone(), action.trigger_payload()),
            None => return MenuSelection::Missing,
        };

        match submenu {
            Some(level) => {
                self.stack.push(level);
                MenuSelection::Descended
            }
            None => MenuSelection::Triggered {
                payload,
                closes_menu: self.stack.depth() == 1,
            },
        }
    }

    pub fn center_control(&self) -> CenterControl {
        if self.stack.depth() > 1 {
            CenterControl::Back
        } else {
            CenterControl::Close
        }
    }

    pub fn press_center(&mut self) -> CenterControl {
        let control = self.center_control();
        if control == CenterControl::Back {
            self.stack.pop();
        }
        control
    }

    pub fn close(&mut self) {
        self.stack.clear();
    }

    fn react(
        mut clicks: EventReader<HudClick>,
        mut exits: EventReader<ExitRequested>,
        mut hud: HudContext,
        mut menus: Query<&mut ActionMenu>,
    ) {
        let clicks: Vec<HudClick> = clicks.read().copied().collect();
        let exited = exits.read().any(|exit| exit.0 == HudKind::ActionMenu);

        let Some(entity) = hud.session.get(HudKind::ActionMenu) else {
            return;
        };
        let Ok(mut menu) = menus.get_mut(entity) else {
            return;
        };

        for click in clicks {
            let rerender = match click {
                HudClick::ActionMenuEntry(index) => match menu.select(index) {
                    MenuSelection::Descended => true,
                    MenuSelection::Triggered {
                        payload,
                        closes_menu,
                    } => {
                        hud.notify_host(HostCallback::trigger(
                            CallbackEndpoint::ActionMenuTrigger,
                            payload,
                        ));
                        if closes_menu {
                            menu.close();
                            close(&mut hud);
                            return;
                        }
                        false
                    }
                    MenuSelection::Missing => {
                        warn!("action menu entry {index} is not on the current level");
                        false
                    }
                },
                HudClick::ActionMenuCenter => match menu.press_center() {
                    CenterControl::Back => true,
                    CenterControl::Close => {
                        menu.close();
                        close(&mut hud);
                        return;
                    }
                },
                _ => false,
            };

            if rerender {
                render(&mut hud.commands, entity, &menu, &hud.config);
            }
        }

        if exited {
            menu.close();
            close(&mut hud);
        }
    }
}

/// Replaces any open action menu.
pub fn open(hud: &mut HudContext, actions: Vec<MenuAction>) -> Entity {
    if actions.is_empty() {
        warn!("action menu opened without entries");
    }

    let menu = ActionMenu::open(actions);
    let entity = hud.spawn_on_root(Node {
        position_type: PositionType::Absolute,
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        flex_direction: FlexDirection::Row,
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        column_gap: Val::Px(24.0),
        ..default()
    });
    render(&mut hud.commands, entity, &menu, &hud.config);
    hud.commands.entity(entity).insert(menu);
    hud.install(HudKind::ActionMenu, entity);
    entity
}

pub fn close(hud: &mut HudContext) {
    let Some(entity) = hud.session.vacate(HudKind::ActionMenu) else {
        debug!("no action menu open");
        return;
    };
    hud.commands.entity(entity).try_despawn();
    hud.notify_host(HostCallback::empty(CallbackEndpoint::CloseActionMenu));
}

fn render(commands: &mut Commands, entity: Entity, menu: &ActionMenu, config: &HudConfig) {
    commands.entity(entity).despawn_related::<Children>();
    let Some(level) = menu.stack().top() else {
        return;
    };

    let palette = &config.palette;
    let radius = Val::Px(config.border_radius);
    let tint = ButtonTint {
        idle: palette.background,
        hovered: palette.secondary_background,
    };

    let column_node = || Node {
        flex_direction: FlexDirection::Column,
        row_gap: Val::Px(10.0),
        ..default()
    };
    let left = commands.spawn((column_node(), ChildOf(entity))).id();

    let control = menu.center_control();
    let center_icon = match control {
        CenterControl::Back => BACK_ICON,
        CenterControl::Close => CLOSE_ICON,
    };
    let center = commands
        .spawn((
            HudButton(HudClick::ActionMenuCenter),
            CenterButton(control),
            tint,
            Node {
                width: Val::Px(64.0),
                height: Val::Px(64.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(tint.idle),
            BorderRadius::MAX,
            ChildOf(entity),
        ))
        .id();
    commands.spawn((icon(center_icon, palette.accent), ChildOf(center)));

    let right = commands.spawn((column_node(), ChildOf(entity))).id();

    for slot in layout_entries(level.len()) {
        let action = &level[slot.index];
        let colour = colour_or(action.colour.as_ref(), palette.accent);
        let parent = match slot.column {
            MenuColumn::Left => left,
            MenuColumn::Right => right,
        };

        let entry = commands
            .spawn((
                HudButton(HudClick::ActionMenuEntry(slot.index)),
                ActionEntry {
                    index: slot.index,
                    column: slot.column,
                },
                tint,
                Node {
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(8.0),
                    padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                    left: Val::Percent(slot.offset_percent),
                    ..default()
                },
                BackgroundColor(tint.idle),
                BorderRadius::all(radius),
                ChildOf(parent),
            ))
            .id();

        let glyph = commands
            .spawn(icon(action.icon.clone(), colour))
            .id();
        let text = commands
            .spawn(label(&action.label, BODY_FONT_SIZE, palette.text))
            .id();
        let ordered = match slot.column {
            MenuColumn::Right => [glyph, text],
            MenuColumn::Left => [text, glyph],
        };
        commands.entity(entry).add_children(&ordered);
    }
}
