use chrono::{
    format::{Item, StrftimeItems},
    DateTime, Local, TimeZone, Utc,
};

/// `MM/DD/YY, HH:MM AM` in the local timezone.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%m/%d/%y, %I:%M %p";

/// Clock abstracts access to the current timestamp so the reducer stays deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Renders `now()` in the local timezone using a strftime pattern.
    fn stamp(&self, format: &str) -> String {
        self.now()
            .with_timezone(&Local)
            .format(checked_format(format))
            .to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .map(FixedClock)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Returns `format` when chrono can render it, otherwise the default pattern.
pub fn checked_format(format: &str) -> &str {
    if is_valid_format(format) {
        format
    } else {
        tracing::warn!(format, "invalid timestamp format, using default");
        DEFAULT_TIMESTAMP_FORMAT
    }
}

pub fn is_valid_format(format: &str) -> bool {
    !format.is_empty() && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_patterns_fall_back_to_default() {
        assert!(is_valid_format(DEFAULT_TIMESTAMP_FORMAT));
        assert!(!is_valid_format("%Q%"));
        assert_eq!(checked_format(""), DEFAULT_TIMESTAMP_FORMAT);
    }

    #[test]
    fn fixed_clock_stamps_with_pattern() {
        let clock = FixedClock::at(2024, 3, 9, 12, 0).expect("valid instant");
        assert_eq!(clock.stamp("%Y-%m"), "2024-03");
    }
}
