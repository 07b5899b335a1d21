use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Board metadata as returned by `/boards/{id}` and `/members/me/boards`.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardSummary {
    pub id: String,
    pub name: String,
}

/// One list of a board.
#[derive(Debug, Clone, Deserialize)]
pub struct ListSummary {
    pub id: String,
    pub name: String,
}

/// One card of a list.
#[derive(Debug, Clone, Deserialize)]
pub struct CardSummary {
    pub id: String,
    pub name: String,
}

/// One entry of a list's action history. Actions are immutable events; the
/// embedded card and list references describe what the action touched and
/// can be missing or empty depending on the action type.
#[derive(Debug, Clone, Deserialize)]
pub struct Action {
    pub id: String,
    #[serde(rename = "type")]
    pub action_type: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub data: ActionData,
}

impl Action {
    /// Id of the card this action belongs to, if it carries one. Trello
    /// leaves the reference out, or empty, for board and list level events.
    pub fn card_id(&self) -> Option<&str> {
        self.data
            .card
            .as_ref()
            .map(|card| card.id.as_str())
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionData {
    #[serde(default)]
    pub card: Option<CardRef>,
    #[serde(default)]
    pub list: Option<ListRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardRef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListRef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_comment_action() {
        let raw = r#"{
            "id": "5f1a",
            "type": "commentCard",
            "date": "2024-03-01T12:30:00.123Z",
            "data": {
                "card": { "id": "c77", "name": "Ship it" },
                "list": { "id": "l3", "name": "Doing" }
            }
        }"#;
        let action: Action = serde_json::from_str(raw).unwrap();
        assert_eq!(action.action_type, "commentCard");
        assert_eq!(action.card_id(), Some("c77"));
        assert_eq!(action.data.list.as_ref().unwrap().name, "Doing");
    }

    #[test]
    fn board_level_actions_carry_no_card() {
        let raw = r#"{
            "id": "5f1b",
            "type": "updateBoard",
            "date": "2024-03-01T13:00:00.000Z",
            "data": {}
        }"#;
        let action: Action = serde_json::from_str(raw).unwrap();
        assert_eq!(action.card_id(), None);
    }

    #[test]
    fn empty_embedded_card_ids_count_as_absent() {
        let raw = r#"{
            "id": "5f1c",
            "type": "updateList",
            "date": "2024-03-02T08:15:00.000Z",
            "data": { "card": { "id": "", "name": "" } }
        }"#;
        let action: Action = serde_json::from_str(raw).unwrap();
        assert_eq!(action.card_id(), None);
    }

    #[test]
    fn parses_a_card_list() {
        let raw = r#"[
            { "id": "c1", "name": "Fix login flow" },
            { "id": "c2", "name": "Write release notes" }
        ]"#;
        let cards: Vec<CardSummary> = serde_json::from_str(raw).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].name, "Write release notes");
    }
}
