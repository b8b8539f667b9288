use bevy::prelude::*;
use serde_json::{json, Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallbackEndpoint {
    ActionMenuTrigger,
    CloseActionMenu,
    ContextMenuTrigger,
    CloseContextMenu,
    CloseDialogue,
    DialogueTrigger,
    HideDrawText,
    ProgressBarEnd,
    CircleEnd,
}

impl CallbackEndpoint {
    pub const fn name(self) -> &'static str {
        match self {
            Self::ActionMenuTrigger => "action_menu_trigger_event",
            Self::CloseActionMenu => "close_action_menu",
            Self::ContextMenuTrigger => "context_menu_trigger_event",
            Self::CloseContextMenu => "close_context_menu",
            Self::CloseDialogue => "close_dialogue",
            Self::DialogueTrigger => "trigger_event",
            Self::HideDrawText => "hide_drawtext",
            Self::ProgressBarEnd => "progressbar_end",
            Self::CircleEnd => "circle_end",
        }
    }
}

impl std::fmt::Display for CallbackEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Side effect requested by a menu entry or dialogue option.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriggerPayload {
    pub action_type: Option<String>,
    pub action: Option<Value>,
    pub params: Option<Value>,
}

impl TriggerPayload {
    pub fn into_body(self) -> Value {
        let mut body = Map::new();
        if let Some(action_type) = self.action_type {
            body.insert(String::from("action_type"), Value::String(action_type));
        }
        if let Some(action) = self.action {
            body.insert(String::from("action"), action);
        }
        if let Some(params) = self.params {
            body.insert(String::from("params"), params);
        }
        Value::Object(body)
    }
}

/// Outbound notification for the host. Fire-and-forget.
#[derive(Event, Clone, Debug, PartialEq)]
pub struct HostCallback {
    pub endpoint: CallbackEndpoint,
    pub body: Value,
}

impl HostCallback {
    pub fn new(endpoint: CallbackEndpoint, body: Value) -> Self {
        Self { endpoint, body }
    }

    pub fn empty(endpoint: CallbackEndpoint) -> Self {
        Self::new(endpoint, Value::Object(Map::new()))
    }

    pub fn trigger(endpoint: CallbackEndpoint, payload: TriggerPayload) -> Self {
        Self::new(endpoint, payload.into_body())
    }

    pub fn progressbar_end(success: bool) -> Self {
        Self::new(CallbackEndpoint::ProgressBarEnd, json!({ "success": success }))
    }

    pub fn url(&self, resource: &str) -> String {
        format!("https://{resource}/{}", self.endpoint.name())
    }

    pub fn to_wire(&self, resource: &str) -> String {
        json!({
            "url": self.url(resource),
            "endpoint": self.endpoint.name(),
            "body": self.body,
        })
        .to_string()
    }
}
