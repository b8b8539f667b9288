use bevy::prelude::*;
use serde::{Deserialize, Deserializer};

pub const ACCENT_COLOR: Color =
    Color::Srgba(Srgba::new(77.0 / 255.0, 203.0 / 255.0, 194.0 / 255.0, 1.0));
pub const BACKGROUND_COLOR: Color =
    Color::Srgba(Srgba::new(31.0 / 255.0, 30.0 / 255.0, 30.0 / 255.0, 0.9));
pub const SECONDARY_BACKGROUND_COLOR: Color =
    Color::Srgba(Srgba::new(43.0 / 255.0, 42.0 / 255.0, 42.0 / 255.0, 0.8));
pub const TEXT_COLOR: Color = Color::Srgba(Srgba::new(0.95, 0.95, 0.95, 1.0));
pub const BORDER_COLOR: Color = Color::Srgba(Srgba::new(0.0, 0.0, 0.0, 0.5));
pub const VIGNETTE_COLOR: Color = Color::Srgba(Srgba::new(0.0, 0.0, 0.0, 1.0));
pub const CIRCLE_TRACK_COLOR: Color =
    Color::Srgba(Srgba::new(31.0 / 255.0, 30.0 / 255.0, 30.0 / 255.0, 1.0));

pub const VIGNETTE_ALPHA: f32 = 0.45;
pub const DIM_SEGMENT_ALPHA: f32 = 0.15;

/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(..)`, `rgba(..)` and
/// `transparent`. Anything else, including CSS variables, is rejected.
pub fn parse_css_colour(raw: &str) -> Option<Color> {
    let value = raw.trim();
    if value.eq_ignore_ascii_case("transparent") {
        return Some(Color::NONE);
    }
    if let Some(hex) = value.strip_prefix('#') {
        return Srgba::hex(hex).ok().map(Color::Srgba);
    }

    let lowered = value.to_ascii_lowercase();
    let body = lowered
        .strip_prefix("rgba(")
        .or_else(|| lowered.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let channel = |part: &str| part.parse::<f32>().ok().map(|v| (v / 255.0).clamp(0.0, 1.0));

    match parts.as_slice() {
        [r, g, b] => Some(Color::srgb(channel(r)?, channel(g)?, channel(b)?)),
        [r, g, b, a] => {
            let alpha = a.parse::<f32>().ok()?.clamp(0.0, 1.0);
            Some(Color::srgba(channel(r)?, channel(g)?, channel(b)?, alpha))
        }
        _ => None,
    }
}

pub fn parse_px(raw: &str) -> Option<f32> {
    let value = raw.trim();
    value
        .strip_suffix("px")
        .unwrap_or(value)
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|px| px.is_finite() && *px >= 0.0)
}

pub fn colour_or(raw: Option<&String>, fallback: Color) -> Color {
    raw.and_then(|value| parse_css_colour(value)).unwrap_or(fallback)
}

pub fn deserialize_colour<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_css_colour(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid colour `{raw}`")))
}
