//! # Invoice Numbering Policy
//!
//! Invoice numbers look like `SSS/MM/YY`: a sequence that restarts every
//! calendar month, followed by the two-digit month and year.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Deriving the next number                                               │
//! │                                                                         │
//! │  invoice date 2024-03-09 ──► scope "/03/24"                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store: last number LIKE '%/03/24' ORDER BY id DESC LIMIT 1             │
//! │       │                                                                 │
//! │       ├── none          ──► "001/03/24"                                 │
//! │       ├── "014/03/24"   ──► "015/03/24"                                 │
//! │       └── "999/03/24"   ──► "1000/03/24"  (widens, no cap)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store lookup lives in `ledger-db`; this module only knows how to
//! format a scope and step a sequence.

use chrono::{Datelike, NaiveDate};

use crate::error::{CoreError, CoreResult};

/// Minimum number of digits in the sequence segment.
pub const SEQUENCE_WIDTH: usize = 3;

/// The `(month, year)` a sequence counts within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberingScope {
    month: u32,
    year: i32,
}

impl NumberingScope {
    /// Scope of the calendar month containing `date`.
    pub fn for_date(date: NaiveDate) -> Self {
        NumberingScope {
            month: date.month(),
            year: date.year(),
        }
    }

    /// `/MM/YY` tail shared by every number in this scope.
    pub fn suffix(&self) -> String {
        format!("/{:02}/{:02}", self.month, self.year.rem_euclid(100))
    }

    /// SQL `LIKE` pattern matching numbers in this scope.
    pub fn like_pattern(&self) -> String {
        format!("%{}", self.suffix())
    }

    /// Formats `sequence` in this scope.
    pub fn format(&self, sequence: u32) -> String {
        format!(
            "{:0width$}{}",
            sequence,
            self.suffix(),
            width = SEQUENCE_WIDTH
        )
    }

    /// Next number given the most recently created number in this scope.
    pub fn next_number(&self, last: Option<&str>) -> CoreResult<String> {
        let next = match last {
            Some(number) => parse_sequence(number)?
                .checked_add(1)
                .ok_or_else(|| CoreError::SequenceExhausted {
                    scope: self.suffix(),
                })?,
            None => 1,
        };
        Ok(self.format(next))
    }
}

/// Parses the leading sequence segment (everything before the first `/`).
pub fn parse_sequence(number: &str) -> CoreResult<u32> {
    let head = number.split('/').next().unwrap_or_default();
    head.trim()
        .parse::<u32>()
        .map_err(|_| CoreError::MalformedInvoiceNumber(number.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(y: i32, m: u32) -> NumberingScope {
        NumberingScope::for_date(NaiveDate::from_ymd_opt(y, m, 15).unwrap())
    }

    #[test]
    fn test_first_number_in_scope() {
        assert_eq!(scope(2024, 3).next_number(None).unwrap(), "001/03/24");
    }

    #[test]
    fn test_increments_last_number() {
        let s = scope(2024, 3);
        assert_eq!(s.next_number(Some("001/03/24")).unwrap(), "002/03/24");
        assert_eq!(s.next_number(Some("014/03/24")).unwrap(), "015/03/24");
    }

    #[test]
    fn test_sequence_widens_past_999() {
        let s = scope(2024, 12);
        assert_eq!(s.next_number(Some("999/12/24")).unwrap(), "1000/12/24");
        assert_eq!(s.next_number(Some("1000/12/24")).unwrap(), "1001/12/24");
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(scope(2005, 1).suffix(), "/01/05");
        assert_eq!(scope(2100, 11).suffix(), "/11/00");
    }

    #[test]
    fn test_like_pattern() {
        assert_eq!(scope(2024, 3).like_pattern(), "%/03/24");
    }

    #[test]
    fn test_malformed_last_number() {
        let err = scope(2024, 3).next_number(Some("abc/03/24")).unwrap_err();
        assert!(matches!(err, CoreError::MalformedInvoiceNumber(_)));
    }

    #[test]
    fn test_sequence_exhausted() {
        let last = format!("{}/03/24", u32::MAX);
        let err = scope(2024, 3).next_number(Some(&last)).unwrap_err();
        assert!(matches!(err, CoreError::SequenceExhausted { .. }));
    }

    #[test]
    fn test_parse_sequence() {
        assert_eq!(parse_sequence("007/01/25").unwrap(), 7);
        assert_eq!(parse_sequence("1234/01/25").unwrap(), 1234);
        assert!(parse_sequence("").is_err());
    }
}
