//! Shared enums for budgeting primitives.

use std::fmt;

use serde::{Deserialize, Serialize};
/// Distinguishes money coming in from money going out.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EntryKind {
    #[default]
    #[serde(rename = "inc", alias = "income", alias = "Income")]
    Income,
    #[serde(rename = "exp", alias = "expense", alias = "Expense")]
    Expense,
}

impl EntryKind {
    /// Short wire tag used in persisted payloads.
    pub fn tag(self) -> &'static str {
        match self {
            EntryKind::Income => "inc",
            EntryKind::Expense => "exp",
        }
    }

    /// Parses either the short tag or the long name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inc" | "income" => Some(EntryKind::Income),
            "exp" | "expense" => Some(EntryKind::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryKind::Income => "Income",
            EntryKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::EntryKind;

    #[test]
    fn kind_serializes_as_short_tag() {
        assert_eq!(
            serde_json::to_string(&EntryKind::Expense).unwrap(),
            "\"exp\""
        );
        let parsed: EntryKind = serde_json::from_str("\"income\"").unwrap();
        assert_eq!(parsed, EntryKind::Income);
    }

    #[test]
    fn parse_accepts_long_and_short_names() {
        assert_eq!(EntryKind::parse("EXP"), Some(EntryKind::Expense));
        assert_eq!(EntryKind::parse(" income "), Some(EntryKind::Income));
        assert_eq!(EntryKind::parse("transfer"), None);
    }
}
