//! Store state: committed entries, the pending new-entry form and the
//! optional in-progress edit.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::EntryKind, entry::Entry};

/// In-progress new-entry form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Draft {
    pub kind: EntryKind,
    pub description: String,
    pub amount: f64,
}

impl Draft {
    pub fn with_kind(kind: EntryKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Clears the text and amount fields, keeping the selected kind.
    pub fn reset(&mut self) {
        self.description.clear();
        self.amount = 0.0;
    }
}

/// Pending changes for exactly one existing entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditSession {
    pub entry_id: Uuid,
    pub description: String,
    pub amount: f64,
}

impl EditSession {
    pub fn new(entry_id: Uuid, description: impl Into<String>, amount: f64) -> Self {
        Self {
            entry_id,
            description: description.into(),
            amount,
        }
    }

    pub fn apply(&mut self, field: EditField) {
        match field {
            EditField::Description(text) => self.description = text,
            EditField::Amount(value) => self.amount = value,
        }
    }
}

/// One editable field of an [`EditSession`] together with its new value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum EditField {
    Description(String),
    Amount(f64),
}

/// Complete snapshot held by the entry store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub entries: Vec<Entry>,
    pub draft: Draft,
    pub edit_session: Option<EditSession>,
}

impl StoreState {
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    pub fn is_editing(&self) -> bool {
        self.edit_session.is_some()
    }

    pub fn entry(&self, id: Uuid) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.entry(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_reset_keeps_kind() {
        let mut draft = Draft {
            kind: EntryKind::Expense,
            description: "coffee".into(),
            amount: 4.5,
        };
        draft.reset();
        assert_eq!(draft, Draft::with_kind(EntryKind::Expense));
    }

    #[test]
    fn edit_field_deserializes_from_tagged_object() {
        let field: EditField =
            serde_json::from_str(r#"{"field":"amount","value":12.5}"#).unwrap();
        assert_eq!(field, EditField::Amount(12.5));
    }
}
