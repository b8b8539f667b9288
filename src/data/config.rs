use std::{env, fs, path::Path, time::Duration};

use bevy::prelude::*;
use serde::Deserialize;

use crate::{
    error::HudError,
    systems::colors::{
        deserialize_colour, ACCENT_COLOR, BACKGROUND_COLOR, BORDER_COLOR, CIRCLE_TRACK_COLOR,
        SECONDARY_BACKGROUND_COLOR, TEXT_COLOR, VIGNETTE_COLOR,
    },
};

pub const CONFIG_ENV: &str = "HUD_CONFIG";
const EMBEDDED_CONFIG: &str = include_str!("./content/hud_config.json");

#[derive(Resource, Debug, Clone, Deserialize)]
pub struct HudConfig {
    pub resource_name: String,
    pub palette: HudPalette,
    pub fades: FadeDurations,
    pub layout: HudLayout,
    pub progress_circle: CircleConfig,
    pub border_radius: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HudPalette {
    #[serde(deserialize_with = "deserialize_colour")]
    pub accent: Color,
    #[serde(deserialize_with = "deserialize_colour")]
    pub background: Color,
    #[serde(deserialize_with = "deserialize_colour")]
    pub secondary_background: Color,
    #[serde(deserialize_with = "deserialize_colour")]
    pub text: Color,
    #[serde(deserialize_with = "deserialize_colour")]
    pub border: Color,
    #[serde(deserialize_with = "deserialize_colour")]
    pub vignette: Color,
    #[serde(deserialize_with = "deserialize_colour")]
    pub circle_track: Color,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FadeDurations {
    pub notification_ms: u64,
    pub progress_bar_ms: u64,
    pub progress_circle_ms: u64,
    pub draw_text_ms: u64,
    pub context_menu_ms: u64,
}

impl FadeDurations {
    pub fn notification(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }

    pub fn progress_bar(&self) -> Duration {
        Duration::from_millis(self.progress_bar_ms)
    }

    pub fn progress_circle(&self) -> Duration {
        Duration::from_millis(self.progress_circle_ms)
    }

    pub fn draw_text(&self) -> Duration {
        Duration::from_millis(self.draw_text_ms)
    }

    pub fn context_menu(&self) -> Duration {
        Duration::from_millis(self.context_menu_ms)
    }
}

/// Anchor in viewport units: `top` in vh, `left`/`right` in vw.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScreenAnchor {
    pub top: f32,
    #[serde(default)]
    pub left: Option<f32>,
    #[serde(default)]
    pub right: Option<f32>,
}

impl ScreenAnchor {
    pub fn node(&self) -> Node {
        Node {
            position_type: PositionType::Absolute,
            top: Val::Vh(self.top),
            left: self.left.map_or(Val::Auto, Val::Vw),
            right: self.right.map_or(Val::Auto, Val::Vw),
            flex_direction: FlexDirection::Column,
            ..default()
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HudLayout {
    pub notifications: ScreenAnchor,
    pub progress_bar: ScreenAnchor,
    pub draw_text: ScreenAnchor,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CircleConfig {
    pub size: f32,
    pub radius: f32,
    pub segments: usize,
    pub segment_size: f32,
}

impl HudConfig {
    pub fn parse(content: &str) -> Result<Self, HudError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, HudError> {
        let content = fs::read_to_string(path).map_err(|source| HudError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn load() -> Self {
        if let Ok(path) = env::var(CONFIG_ENV) {
            match Self::from_file(Path::new(&path)) {
                Ok(config) => return config,
                Err(error) => {
                    warn!("failed to load hud config from `{path}`: {error}; using embedded config")
                }
            }
        }

        match Self::parse(EMBEDDED_CONFIG) {
            Ok(config) => config,
            Err(error) => {
                warn!("failed to parse embedded hud config: {error}; using safe defaults");
                Self::fallback()
            }
        }
    }

    pub fn fallback() -> Self {
        Self {
            resource_name: String::from("hud_overlay"),
            palette: HudPalette {
                accent: ACCENT_COLOR,
                background: BACKGROUND_COLOR,
                secondary_background: SECONDARY_BACKGROUND_COLOR,
                text: TEXT_COLOR,
                border: BORDER_COLOR,
                vignette: VIGNETTE_COLOR,
                circle_track: CIRCLE_TRACK_COLOR,
            },
            fades: FadeDurations {
                notification_ms: 400,
                progress_bar_ms: 500,
                progress_circle_ms: 600,
                draw_text_ms: 500,
                context_menu_ms: 200,
            },
            layout: HudLayout {
                notifications: ScreenAnchor {
                    top: 40.0,
                    left: None,
                    right: Some(1.0),
                },
                progress_bar: ScreenAnchor {
                    top: 85.0,
                    left: Some(37.0),
                    right: None,
                },
                draw_text: ScreenAnchor {
                    top: 40.0,
                    left: Some(1.0),
                    right: None,
                },
            },
            progress_circle: CircleConfig {
                size: 120.0,
                radius: 40.0,
                segments: 48,
                segment_size: 8.0,
            },
            border_radius: 4.0,
        }
    }
}
