//! Usage accounting periods

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Calendar month a metered action is counted against, `YYYY-MM`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageMonth(String);

impl UsageMonth {
    /// Month containing `at` (UTC)
    pub fn containing(at: DateTime<Utc>) -> Self {
        Self(format!("{:04}-{:02}", at.year(), at.month()))
    }

    /// Current month by the wall clock
    pub fn current() -> Self {
        Self::containing(Utc::now())
    }

    /// Parse a `YYYY-MM` string
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::Month(s.to_string());

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        year.parse::<u16>().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UsageMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_month_is_zero_padded() {
        let at = Utc.with_ymd_and_hms(2025, 3, 9, 12, 0, 0).unwrap();
        assert_eq!(UsageMonth::containing(at).as_str(), "2025-03");
    }

    #[test]
    fn test_month_rollover_boundary() {
        let last = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        let first = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(UsageMonth::containing(last).as_str(), "2025-12");
        assert_eq!(UsageMonth::containing(first).as_str(), "2026-01");
    }

    #[test]
    fn test_parse() {
        assert!(UsageMonth::parse("2025-11").is_ok());
        assert!(UsageMonth::parse("2025-13").is_err());
        assert!(UsageMonth::parse("2025-1").is_err());
        assert!(UsageMonth::parse("202511").is_err());
    }
}
