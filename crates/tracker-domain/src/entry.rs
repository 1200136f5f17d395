//! Domain model for a single committed income or expense record.

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: Uuid,
    #[serde(alias = "type")]
    pub kind: EntryKind,
    #[serde(alias = "desc")]
    pub description: String,
    #[serde(deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(alias = "time", default)]
    pub created_at: String,
}

impl Entry {
    pub fn new(
        kind: EntryKind,
        description: impl Into<String>,
        amount: f64,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            description: description.into(),
            amount,
            created_at: created_at.into(),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == EntryKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == EntryKind::Expense
    }
}

/// Accepts a JSON number or a numeric string. A blank string reads as zero.
fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
    }

    match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(value) => Ok(value),
        RawAmount::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                Ok(0.0)
            } else {
                text.parse::<f64>().map_err(D::Error::custom)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys() {
        let entry = Entry::new(EntryKind::Income, "salary", 1000.0, "01/02/24, 09:30 AM");
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["kind"], "inc");
        assert_eq!(value["description"], "salary");
        assert_eq!(value["createdAt"], "01/02/24, 09:30 AM");
    }

    #[test]
    fn accepts_legacy_browser_keys() {
        let raw = r#"{
            "id": "7f0c2a2e-5c1e-4d43-9d3e-3f0a8f4f8a11",
            "type": "exp",
            "desc": "rent",
            "amount": 500,
            "time": "03/04/24, 10:15 PM"
        }"#;
        let entry: Entry = serde_json::from_str(raw).unwrap();
        assert!(entry.is_expense());
        assert_eq!(entry.description, "rent");
        assert_eq!(entry.amount, 500.0);
        assert_eq!(entry.created_at, "03/04/24, 10:15 PM");
    }

    #[test]
    fn numeric_string_amounts_are_read_as_numbers() {
        let raw = r#"{
            "id": "7f0c2a2e-5c1e-4d43-9d3e-3f0a8f4f8a11",
            "type": "inc",
            "desc": "bonus",
            "amount": " 250.5 ",
            "time": "03/04/24, 10:15 PM"
        }"#;
        let entry: Entry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.amount, 250.5);

        let blank = raw.replace("\" 250.5 \"", "\"\"");
        let entry: Entry = serde_json::from_str(&blank).unwrap();
        assert_eq!(entry.amount, 0.0);

        let word = raw.replace("\" 250.5 \"", "\"lots\"");
        assert!(serde_json::from_str::<Entry>(&word).is_err());
    }
}
