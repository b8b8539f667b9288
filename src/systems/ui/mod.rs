//! HUD widgets.
//!
//! Every widget renders under the single full-screen root spawned by `layer`
//! and keeps its live instance in `HudSession`. Shared node builders live in
//! `common`.
pub mod action_menu;
pub mod common;
pub mod context_menu;
pub mod dialogue;
pub mod draw_text;
pub mod layer;
pub mod notify;
pub mod progress_bar;
pub mod progress_circle;
