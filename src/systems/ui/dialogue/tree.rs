use std::{collections::HashSet, fmt};

use crate::data::{
    callbacks::TriggerPayload,
    dialogue::{ConversationNode, DialogueSpec, NodeId},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueIssue {
    EmptyConversation,
    DuplicateNodeId { id: NodeId },
    UnresolvedNext { node: NodeId, option: usize, next_id: NodeId },
    DeadEndOption { node: NodeId, option: usize },
}

impl fmt::Display for DialogueIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyConversation => write!(f, "conversation has no nodes"),
            Self::DuplicateNodeId { id } => write!(f, "node id {id} appears more than once"),
            Self::UnresolvedNext {
                node,
                option,
                next_id,
            } => write!(f, "node {node} option {option} points at missing node {next_id}"),
            Self::DeadEndOption { node, option } => {
                write!(f, "node {node} option {option} neither ends nor moves on")
            }
        }
    }
}

pub fn validate_conversation(spec: &DialogueSpec) -> Vec<DialogueIssue> {
    let mut issues = Vec::new();
    if spec.conversation.is_empty() {
        issues.push(DialogueIssue::EmptyConversation);
        return issues;
    }

    let mut ids = HashSet::new();
    for node in &spec.conversation {
        if !ids.insert(&node.id) {
            issues.push(DialogueIssue::DuplicateNodeId {
                id: node.id.clone(),
            });
        }
    }

    for node in &spec.conversation {
        for (option_index, option) in node.options.iter().enumerate() {
            if option.should_end {
                continue;
            }
            match &option.next_id {
                Some(next_id) if !ids.contains(next_id) => {
                    issues.push(DialogueIssue::UnresolvedNext {
                        node: node.id.clone(),
                        option: option_index,
                        next_id: next_id.clone(),
                    });
                }
                Some(_) => {}
                None => issues.push(DialogueIssue::DeadEndOption {
                    node: node.id.clone(),
                    option: option_index,
                }),
            }
        }
    }

    issues
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Moved(NodeId),
    Ended,
    /// `next_id` is null and the option does not end the conversation.
    DeadEnd,
    Unresolved(NodeId),
    NoSuchOption,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DialogueStep {
    pub transition: Transition,
    pub side_effect: Option<TriggerPayload>,
}

/// Conversation state machine. The state is the displayed node; it starts at
/// the first node and only changes on a resolvable `next_id`.
#[derive(Debug, Clone)]
pub struct DialogueTree {
    nodes: Vec<ConversationNode>,
    current: usize,
}

impl DialogueTree {
    pub fn new(nodes: Vec<ConversationNode>) -> Option<Self> {
        if nodes.is_empty() {
            return None;
        }
        Some(Self { nodes, current: 0 })
    }

    pub fn current(&self) -> &ConversationNode {
        &self.nodes[self.current]
    }

    pub fn current_id(&self) -> &NodeId {
        &self.current().id
    }

    /// First node carrying `id`.
    fn position(&self, id: &NodeId) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == *id)
    }

    pub fn select(&mut self, option_index: usize) -> DialogueStep {
        let Some(option) = self.current().options.get(option_index) else {
            return DialogueStep {
                transition: Transition::NoSuchOption,
                side_effect: None,
            };
        };
        let side_effect = option.side_effect();
        let should_end = option.should_end;
        let next_id = option.next_id.clone();

        let target = next_id
            .as_ref()
            .and_then(|next_id| self.position(next_id));
        let transition = match (target, next_id) {
            (Some(position), Some(next_id)) => {
                self.current = position;
                Transition::Moved(next_id)
            }
            _ if should_end => Transition::Ended,
            (_, None) => Transition::DeadEnd,
            (_, Some(next_id)) => Transition::Unresolved(next_id),
        };

        DialogueStep {
            transition,
            side_effect,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn quarry() -> DialogueSpec {
        serde_json::from_value(json!({
            "header": { "message": "Quarry Employee", "icon": "fa-solid fa-hard-hat" },
            "conversation": [
                {
                    "id": 1,
                    "response": ["Hello, welcome to the quarry.", "How can I assist you today?"],
                    "options": [
                        { "message": "What do you do here?", "next_id": 2, "should_end": false },
                        {
                            "message": "Goodbye!",
                            "next_id": null,
                            "should_end": true,
                            "action_type": "client",
                            "action": "test_event",
                            "params": {}
                        }
                    ]
                },
                {
                    "id": 2,
                    "response": "We break rocks.",
                    "options": [
                        { "message": "Back", "next_id": 1 },
                        { "message": "Bye", "next_id": 99, "should_end": true }
                    ]
                }
            ]
        }))
        .expect("dialogue parses")
    }

    #[test]
    fn valid_chain_reaches_the_end() {
        let spec = quarry();
        assert!(validate_conversation(&spec).is_empty());

        let mut tree = DialogueTree::new(spec.conversation).expect("non-empty");
        assert_eq!(tree.current_id(), &NodeId::Number(1));

        let step = tree.select(0);
        assert_eq!(step.transition, Transition::Moved(NodeId::Number(2)));
        assert_eq!(step.side_effect, None);
        assert_eq!(tree.current().response.lines(), ["We break rocks.".to_string()]);

        assert_eq!(tree.select(0).transition, Transition::Moved(NodeId::Number(1)));

        let step = tree.select(1);
        assert_eq!(step.transition, Transition::Ended);
        assert_eq!(
            step.side_effect.and_then(|payload| payload.action),
            Some(json!("test_event"))
        );
    }

    #[test]
    fn should_end_applies_when_next_id_is_missing() {
        let mut tree = DialogueTree::new(quarry().conversation).expect("non-empty");
        tree.select(0);
        assert_eq!(tree.select(1).transition, Transition::Ended);
    }

    #[test]
    fn resolvable_next_id_wins_over_should_end() {
        let spec: DialogueSpec = serde_json::from_value(json!({
            "conversation": [
                { "id": 1, "options": [{ "next_id": 2, "should_end": true }] },
                { "id": 2, "response": "Still here.", "options": [] }
            ]
        }))
        .expect("dialogue parses");
        assert!(validate_conversation(&spec).is_empty());

        let mut tree = DialogueTree::new(spec.conversation).expect("non-empty");
        assert_eq!(tree.select(0).transition, Transition::Moved(NodeId::Number(2)));
        assert_eq!(tree.current_id(), &NodeId::Number(2));
    }

    #[test]
    fn unresolved_reference_keeps_the_current_node() {
        let spec: DialogueSpec = serde_json::from_value(json!({
            "conversation": [{ "id": 1, "options": [{ "next_id": 2, "should_end": false }] }]
        }))
        .expect("dialogue parses");

        assert_eq!(
            validate_conversation(&spec),
            vec![DialogueIssue::UnresolvedNext {
                node: NodeId::Number(1),
                option: 0,
                next_id: NodeId::Number(2),
            }]
        );

        let mut tree = DialogueTree::new(spec.conversation).expect("non-empty");
        assert_eq!(tree.select(0).transition, Transition::Unresolved(NodeId::Number(2)));
        assert_eq!(tree.current_id(), &NodeId::Number(1));
    }

    #[test]
    fn ids_compare_strictly() {
        let spec: DialogueSpec = serde_json::from_value(json!({
            "conversation": [
                { "id": 1, "options": [{ "next_id": "2" }] },
                { "id": 2, "options": [] }
            ]
        }))
        .expect("dialogue parses");

        let mut tree = DialogueTree::new(spec.conversation).expect("non-empty");
        assert_eq!(
            tree.select(0).transition,
            Transition::Unresolved(NodeId::Text(String::from("2")))
        );
    }

    #[test]
    fn dead_end_is_flagged_and_inert() {
        let spec: DialogueSpec = serde_json::from_value(json!({
            "conversation": [{ "id": "start", "options": [{ "message": "..." }] }]
        }))
        .expect("dialogue parses");

        assert_eq!(
            validate_conversation(&spec),
            vec![DialogueIssue::DeadEndOption {
                node: NodeId::Text(String::from("start")),
                option: 0,
            }]
        );
        let mut tree = DialogueTree::new(spec.conversation).expect("non-empty");
        assert_eq!(tree.select(0).transition, Transition::DeadEnd);
        assert_eq!(tree.select(3).transition, Transition::NoSuchOption);
    }

    #[test]
    fn duplicates_and_empty_conversations() {
        let spec: DialogueSpec = serde_json::from_value(json!({
            "conversation": [{ "id": 1 }, { "id": 1 }]
        }))
        .expect("dialogue parses");
        assert_eq!(
            validate_conversation(&spec),
            vec![DialogueIssue::DuplicateNodeId { id: NodeId::Number(1) }]
        );

        let empty: DialogueSpec =
            serde_json::from_value(json!({ "conversation": [] })).expect("dialogue parses");
        assert_eq!(validate_conversation(&empty), vec![DialogueIssue::EmptyConversation]);
        assert!(DialogueTree::new(empty.conversation).is_none());
    }
}
