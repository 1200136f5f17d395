//! Action vocabulary understood by the entry store.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracker_domain::{EditField, EntryKind};
use uuid::Uuid;

use crate::CoreError;

/// A discrete user intent. Each dispatch runs one action to completion.
///
/// On the wire an action is `{"type": <tag>, "payload": <value>}`; unit
/// actions may omit the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Action {
    SetDraftKind(EntryKind),
    SetDraftDescription(String),
    SetDraftAmount(f64),
    AddEntry,
    DeleteEntry(Uuid),
    OpenEditMode {
        id: Uuid,
        description: String,
        amount: f64,
    },
    UpdateEditSession(EditField),
    CommitEdit {
        description: String,
        amount: f64,
    },
    CloseEditMode,
}

impl Action {
    pub const TAGS: [&'static str; 9] = [
        "setDraftKind",
        "setDraftDescription",
        "setDraftAmount",
        "addEntry",
        "deleteEntry",
        "openEditMode",
        "updateEditSession",
        "commitEdit",
        "closeEditMode",
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Action::SetDraftKind(_) => "setDraftKind",
            Action::SetDraftDescription(_) => "setDraftDescription",
            Action::SetDraftAmount(_) => "setDraftAmount",
            Action::AddEntry => "addEntry",
            Action::DeleteEntry(_) => "deleteEntry",
            Action::OpenEditMode { .. } => "openEditMode",
            Action::UpdateEditSession(_) => "updateEditSession",
            Action::CommitEdit { .. } => "commitEdit",
            Action::CloseEditMode => "closeEditMode",
        }
    }

    /// Decodes a tagged wire action. Unrecognized tags are rejected before any
    /// payload is inspected.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        let tag = value
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| CoreError::InvalidPayload("missing string field `type`".into()))?;
        if !Self::TAGS.contains(&tag.as_str()) {
            return Err(CoreError::UnknownAction(tag));
        }
        serde_json::from_value(value).map_err(|err| CoreError::InvalidPayload(err.to_string()))
    }

    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|err| CoreError::InvalidPayload(err.to_string()))?;
        Self::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_unit_and_payload_actions() {
        assert_eq!(
            Action::from_value(json!({ "type": "addEntry" })).unwrap(),
            Action::AddEntry
        );
        assert_eq!(
            Action::from_value(json!({ "type": "setDraftKind", "payload": "exp" })).unwrap(),
            Action::SetDraftKind(EntryKind::Expense)
        );
        assert_eq!(
            Action::from_json(
                r#"{"type":"updateEditSession","payload":{"field":"description","value":"rent"}}"#
            )
            .unwrap(),
            Action::UpdateEditSession(EditField::Description("rent".into()))
        );
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = Action::from_value(json!({ "type": "transfer", "payload": 3 })).unwrap_err();
        assert!(matches!(err, CoreError::UnknownAction(tag) if tag == "transfer"));
    }

    #[test]
    fn malformed_payload_is_invalid() {
        let err = Action::from_value(json!({ "type": "setDraftAmount", "payload": "ten" }))
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidPayload(_)));
        let err = Action::from_json("{not json").unwrap_err();
        assert!(matches!(err, CoreError::InvalidPayload(_)));
    }

    #[test]
    fn every_variant_tag_is_listed() {
        let actions = [
            Action::SetDraftKind(EntryKind::Income),
            Action::SetDraftDescription(String::new()),
            Action::SetDraftAmount(0.0),
            Action::AddEntry,
            Action::DeleteEntry(Uuid::nil()),
            Action::OpenEditMode {
                id: Uuid::nil(),
                description: String::new(),
                amount: 0.0,
            },
            Action::UpdateEditSession(EditField::Amount(1.0)),
            Action::CommitEdit {
                description: String::new(),
                amount: 0.0,
            },
            Action::CloseEditMode,
        ];
        for action in actions {
            assert!(Action::TAGS.contains(&action.tag()));
            let value = serde_json::to_value(&action).unwrap();
            assert_eq!(value["type"], action.tag());
        }
    }
}
