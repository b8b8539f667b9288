use serde::Deserialize;
use serde_json::Value;

use super::callbacks::TriggerPayload;

/// One entry of an action menu level. Branch entries carry a `submenu`,
/// terminal entries carry `action_type`/`action`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MenuAction {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub colour: Option<String>,
    #[serde(default)]
    pub action_type: Option<String>,
    /// Forwarded verbatim; usually an event name, but any JSON is accepted.
    #[serde(default)]
    pub action: Option<Value>,
    #[serde(default)]
    pub params: Option<Value>,
    #[serde(default)]
    pub submenu: Option<Vec<MenuAction>>,
}

impl MenuAction {
    pub fn trigger_payload(&self) -> TriggerPayload {
        TriggerPayload {
            action_type: self.action_type.clone(),
            action: self.action.clone(),
            params: self.params.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContextMenuSpec {
    #[serde(default)]
    pub header: Option<ContextHeader>,
    #[serde(default)]
    pub content: Option<Vec<ContextOption>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContextHeader {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContextOption {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub icon: Option<String>,
    /// Forwarded verbatim to the host when the row is selected.
    #[serde(default)]
    pub action: Option<Value>,
    #[serde(default)]
    pub should_close: bool,
    #[serde(default)]
    pub disabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_menu_parses_branches_and_terminals() {
        let menu: Vec<MenuAction> = serde_json::from_value(json!([
            {
                "label": "Main Menu",
                "icon": "fa-solid fa-bars",
                "submenu": [
                    { "label": "Action 1", "icon": "fa-solid fa-cog", "action_type": "client_event", "action": "some_event", "params": {} }
                ]
            },
            { "label": "Quick Action", "icon": "fa-solid fa-bolt", "action_type": "client_event", "action": "quick_event" }
        ]))
        .expect("menu parses");

        assert!(menu[0].submenu.is_some());
        assert!(menu[1].submenu.is_none());
        assert_eq!(menu[1].trigger_payload().action, Some(json!("quick_event")));
    }

    #[test]
    fn entries_accept_structured_actions_and_missing_labels() {
        let menu: Vec<MenuAction> = serde_json::from_value(json!([
            { "icon": "fa-solid fa-box", "action_type": "client_event", "action": { "name": "open", "slot": 3 } }
        ]))
        .expect("menu parses");

        assert_eq!(menu[0].label, "");
        assert_eq!(
            menu[0].trigger_payload().into_body(),
            json!({ "action_type": "client_event", "action": { "name": "open", "slot": 3 } })
        );
    }

    #[test]
    fn context_option_flags_default_to_false() {
        let option: ContextOption =
            serde_json::from_value(json!({ "label": "Open Profile" })).expect("option parses");

        assert!(!option.should_close);
        assert!(!option.disabled);
        assert!(option.action.is_none());
    }
}
