use bevy::prelude::*;
use enum_map::{Enum, EnumMap};

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HudKind {
    Notify,
    ProgressCircle,
    ProgressBar,
    DrawText,
    ActionMenu,
    ContextMenu,
    Dialogue,
}

impl HudKind {
    /// Kinds that own the exit key while they are live.
    pub const fn takes_exit_key(self) -> bool {
        matches!(
            self,
            Self::ProgressBar | Self::ActionMenu | Self::ContextMenu | Self::Dialogue
        )
    }
}

/// One live instance per component kind, plus the persistent containers some
/// kinds render into. Replaces the overlay's global singletons.
#[derive(Resource, Debug, Default)]
pub struct HudSession {
    root: Option<Entity>,
    slots: EnumMap<HudKind, Option<Entity>>,
    containers: EnumMap<HudKind, Option<Entity>>,
    focus: Vec<HudKind>,
}

impl HudSession {
    pub fn root(&self) -> Option<Entity> {
        self.root
    }

    pub fn set_root(&mut self, root: Entity) {
        self.root = Some(root);
    }

    pub fn get(&self, kind: HudKind) -> Option<Entity> {
        self.slots[kind]
    }

    pub fn is_live(&self, kind: HudKind) -> bool {
        self.slots[kind].is_some()
    }

    /// Stores `entity` as the live instance and returns the one it replaces.
    pub fn occupy(&mut self, kind: HudKind, entity: Entity) -> Option<Entity> {
        let previous = self.slots[kind].replace(entity);
        if kind.takes_exit_key() {
            self.focus.retain(|focused| *focused != kind);
            self.focus.push(kind);
        }
        previous
    }

    pub fn vacate(&mut self, kind: HudKind) -> Option<Entity> {
        self.focus.retain(|focused| *focused != kind);
        self.slots[kind].take()
    }

    /// Vacates only if the slot still holds `entity`.
    pub fn vacate_if(&mut self, kind: HudKind, entity: Entity) -> bool {
        if self.slots[kind] == Some(entity) {
            self.vacate(kind);
            true
        } else {
            false
        }
    }

    pub fn container(&self, kind: HudKind) -> Option<Entity> {
        self.containers[kind]
    }

    pub fn set_container(&mut self, kind: HudKind, entity: Entity) {
        self.containers[kind] = Some(entity);
    }

    /// The most recently opened component that still owns the exit key.
    pub fn focused(&self) -> Option<HudKind> {
        self.focus.last().copied()
    }
}
