use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::callbacks::TriggerPayload;

/// Conversation node identifier. Ids compare strictly: `1` and `"1"` differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Number(i64),
    Text(String),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => write!(f, "\"{id}\""),
        }
    }
}

/// A single string or an ordered sequence of strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextBlock {
    One(String),
    Many(Vec<String>),
}

impl Default for TextBlock {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl TextBlock {
    pub fn lines(&self) -> &[String] {
        match self {
            Self::One(line) => std::slice::from_ref(line),
            Self::Many(lines) => lines,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DialogueSpec {
    #[serde(default)]
    pub header: DialogueHeader,
    #[serde(default)]
    pub conversation: Vec<ConversationNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DialogueHeader {
    #[serde(default)]
    pub message: Option<TextBlock>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConversationNode {
    pub id: NodeId,
    #[serde(default)]
    pub response: TextBlock,
    #[serde(default)]
    pub options: Vec<DialogueOption>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DialogueOption {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub next_id: Option<NodeId>,
    #[serde(default)]
    pub should_end: bool,
    #[serde(default)]
    pub action_type: Option<String>,
    #[serde(default)]
    pub action: Option<Value>,
    #[serde(default)]
    pub params: Option<Value>,
}

impl DialogueOption {
    /// Present only when both `action_type` and `action` are set. An empty
    /// string, `false` or `null` counts as unset.
    pub fn side_effect(&self) -> Option<TriggerPayload> {
        let action_type = self.action_type.as_deref().filter(|value| !value.is_empty())?;
        let action = self.action.as_ref().filter(|value| is_set(value))?;
        Some(TriggerPayload {
            action_type: Some(action_type.to_string()),
            action: Some(action.clone()),
            params: Some(
                self.params
                    .clone()
                    .unwrap_or_else(|| Value::Object(Map::new())),
            ),
        })
    }
}

fn is_set(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(text) => !text.is_empty(),
        _ => true,
    }
}
