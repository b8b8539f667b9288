use bevy::prelude::*;
use serde::Deserialize;

use super::{
    dialogue::DialogueSpec,
    menu::{ContextMenuSpec, MenuAction},
    notify::{NotifySpec, StyleOverrides},
};
use crate::error::HudError;

/// Inbound command envelope: `{ "action": <name>, ...payload }`.
#[derive(Event, Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum HudCommand {
    Notify(NotifySpec),
    ShowCircle(CircleSpec),
    ShowProgressbar(ProgressBarSpec),
    HideProgressbar,
    ShowDrawtext(DrawTextSpec),
    HideDrawtext,
    CreateActionMenu {
        #[serde(default)]
        menu: Vec<MenuAction>,
    },
    CloseActionMenu,
    CreateDialogue {
        dialogue: DialogueSpec,
    },
    CreateContextMenu {
        #[serde(default)]
        menu: Option<ContextMenuSpec>,
    },
    CloseContextMenu,
    CopyToClipboard {
        #[serde(default)]
        content: String,
    },
    #[serde(other)]
    Unknown,
}

impl HudCommand {
    pub fn decode(raw: &str) -> Result<Self, HudError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Notify(_) => "notify",
            Self::ShowCircle(_) => "show_circle",
            Self::ShowProgressbar(_) => "show_progressbar",
            Self::HideProgressbar => "hide_progressbar",
            Self::ShowDrawtext(_) => "show_drawtext",
            Self::HideDrawtext => "hide_drawtext",
            Self::CreateActionMenu { .. } => "create_action_menu",
            Self::CloseActionMenu => "close_action_menu",
            Self::CreateDialogue { .. } => "create_dialogue",
            Self::CreateContextMenu { .. } => "create_context_menu",
            Self::CloseContextMenu => "close_context_menu",
            Self::CopyToClipboard { .. } => "copy_to_clipboard",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CircleSpec {
    #[serde(default)]
    pub message: String,
    /// Seconds.
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProgressBarSpec {
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub icon: String,
    /// Milliseconds.
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DrawTextSpec {
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub keypress: Option<String>,
    /// Milliseconds; `<= 0` keeps the hint until `hide_drawtext`.
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub style: StyleOverrides,
}

impl DrawTextSpec {
    /// The icon wins over the keypress glyph when both are given.
    pub fn glyph(&self) -> DrawTextGlyph {
        if let Some(icon) = self.icon.as_deref().filter(|icon| !icon.is_empty()) {
            DrawTextGlyph::Icon(icon.to_string())
        } else if let Some(key) = self.keypress.as_deref().filter(|key| !key.is_empty()) {
            DrawTextGlyph::Key(key.to_uppercase())
        } else {
            DrawTextGlyph::None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawTextGlyph {
    Icon(String),
    Key(String),
    None,
}
