use bevy::prelude::*;

use crate::error::HudError;

/// Destination for `copy_to_clipboard`.
pub trait ClipboardSink: Send + Sync {
    fn set_text(&mut self, text: &str) -> Result<(), HudError>;
}

/// The operating system clipboard. A handle is opened per write, as the
/// platform clipboard may not outlive the process that owns its contents.
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), HudError> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

#[derive(Resource)]
pub struct HudClipboard(Box<dyn ClipboardSink>);

impl HudClipboard {
    pub fn new(sink: impl ClipboardSink + 'static) -> Self {
        Self(Box::new(sink))
    }

    pub fn system() -> Self {
        Self::new(SystemClipboard)
    }

    pub fn copy(&mut self, text: &str) -> Result<(), HudError> {
        self.0.set_text(text)
    }
}
