use bevy::prelude::*;
use enum_map::{enum_map, Enum, EnumMap};
use serde::Deserialize;

pub const DEFAULT_NOTIFY_DURATION_MS: f64 = 5000.0;

fn default_kind() -> String {
    String::from("info")
}

fn default_message() -> String {
    String::from("No message provided")
}

fn default_duration() -> f64 {
    DEFAULT_NOTIFY_DURATION_MS
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NotifySpec {
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default = "default_message")]
    pub message: String,
    /// Milliseconds; `<= 0` keeps the card until the overlay is torn down.
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default)]
    pub style: StyleOverrides,
}

impl NotifySpec {
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref().filter(|header| !header.is_empty())
    }
}

/// CSS-like overrides sent by the host. Values that do not parse fall back to
/// the configured palette.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleOverrides {
    pub background: Option<String>,
    pub text_colour: Option<String>,
    pub border_colour: Option<String>,
    pub border_radius: Option<String>,
    pub bar_fill: Option<String>,
    pub bar_background: Option<String>,
    pub custom_icon: Option<String>,
}

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotifyKind {
    Success,
    Error,
    Info,
    Warning,
    Primary,
    Secondary,
    Light,
    Dark,
    Critical,
    Neutral,
}

impl NotifyKind {
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "success" => Self::Success,
            "error" => Self::Error,
            "info" => Self::Info,
            "warning" => Self::Warning,
            "primary" => Self::Primary,
            "secondary" => Self::Secondary,
            "light" => Self::Light,
            "dark" => Self::Dark,
            "critical" => Self::Critical,
            "neutral" => Self::Neutral,
            _ => return None,
        };
        Some(kind)
    }

    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or(Self::Info)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotifyTemplate {
    pub icon: &'static str,
    pub colour: Color,
}

impl NotifyTemplate {
    fn new(icon: &'static str, red: u8, green: u8, blue: u8) -> Self {
        Self {
            icon,
            colour: Color::srgb_u8(red, green, blue),
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct NotifyTemplates(pub EnumMap<NotifyKind, NotifyTemplate>);

impl Default for NotifyTemplates {
    fn default() -> Self {
        Self(enum_map! {
            NotifyKind::Success => NotifyTemplate::new("fa-solid fa-check-circle", 0x28, 0xa7, 0x45),
            NotifyKind::Error => NotifyTemplate::new("fa-solid fa-times-circle", 0xdc, 0x35, 0x45),
            NotifyKind::Info => NotifyTemplate::new("fa-solid fa-info-circle", 0x17, 0xa2, 0xb8),
            NotifyKind::Warning => NotifyTemplate::new("fa-solid fa-exclamation-circle", 0xff, 0xc1, 0x07),
            NotifyKind::Primary => NotifyTemplate::new("fa-solid fa-star", 0x00, 0x7b, 0xff),
            NotifyKind::Secondary => NotifyTemplate::new("fa-solid fa-layer-group", 0x6c, 0x75, 0x7d),
            NotifyKind::Light => NotifyTemplate::new("fa-solid fa-sun", 0xf8, 0xf9, 0xfa),
            NotifyKind::Dark => NotifyTemplate::new("fa-solid fa-moon", 0x34, 0x3a, 0x40),
            NotifyKind::Critical => NotifyTemplate::new("fa-solid fa-skull-crossbones", 0xd9, 0x53, 0x4f),
            NotifyKind::Neutral => NotifyTemplate::new("fa-solid fa-minus-circle", 0xbd, 0xc3, 0xc7),
        })
    }
}

impl NotifyTemplates {
    pub fn lookup(&self, name: &str) -> (NotifyKind, &NotifyTemplate) {
        let kind = NotifyKind::resolve(name);
        (kind, &self.0[kind])
    }
}
