//! Derived totals. Recomputed from the entry list on every read.

use std::fmt;

use tracker_domain::Entry;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary<'a> {
    pub income_entries: Vec<&'a Entry>,
    pub expense_entries: Vec<&'a Entry>,
    pub income_total: f64,
    pub expense_total: f64,
    pub available_funds: f64,
    /// `None` when there is no income to compare against.
    pub expense_ratio_percent: Option<f64>,
}

impl<'a> Summary<'a> {
    pub fn from_entries(entries: &'a [Entry]) -> Self {
        let (income_entries, expense_entries): (Vec<&Entry>, Vec<&Entry>) =
            entries.iter().partition(|entry| entry.is_income());
        let income_total = total(&income_entries);
        let expense_total = total(&expense_entries);
        let expense_ratio_percent = if income_total == 0.0 {
            None
        } else {
            // half-up, the way a browser's Math.round behaves
            Some((expense_total / income_total * 100.0 + 0.5).floor())
        };
        Self {
            income_entries,
            expense_entries,
            income_total,
            expense_total,
            available_funds: income_total - expense_total,
            expense_ratio_percent,
        }
    }

    pub fn ratio(&self) -> ExpenseRatio {
        ExpenseRatio(self.expense_ratio_percent)
    }
}

fn total(entries: &[&Entry]) -> f64 {
    entries.iter().map(|entry| entry.amount).sum()
}

/// Display adapter rendering an undefined ratio as `NaN%`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpenseRatio(pub Option<f64>);

impl fmt::Display for ExpenseRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value}%"),
            None => f.write_str("NaN%"),
        }
    }
}

#[cfg(test)]
mod tests {
    use tracker_domain::EntryKind;

    use super::*;

    #[test]
    fn ratio_rounds_half_up() {
        let entries = vec![
            Entry::new(EntryKind::Income, "pay", 200.0, ""),
            Entry::new(EntryKind::Expense, "snack", 1.0, ""),
        ];
        let summary = Summary::from_entries(&entries);
        assert_eq!(summary.expense_ratio_percent, Some(1.0));
        assert_eq!(summary.ratio().to_string(), "1%");
    }

    #[test]
    fn undefined_ratio_displays_nan() {
        assert_eq!(ExpenseRatio(None).to_string(), "NaN%");
    }

    #[test]
    fn empty_list_has_zero_totals() {
        let summary = Summary::from_entries(&[]);
        assert_eq!(summary.income_total, 0.0);
        assert_eq!(summary.expense_total, 0.0);
        assert_eq!(summary.available_funds, 0.0);
        assert!(summary.income_entries.is_empty());
        assert!(summary.expense_ratio_percent.is_none());
    }
}
