//! Shared field validators.
//!
//! Services collect violations from these checks into one aggregated
//! validation error; nothing here touches storage.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// Date format accepted for `filing_date` and `due_date` fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Valid deadline types (O(1) lookup).
pub static VALID_DEADLINE_TYPES: LazyLock<HashSet<&str>> =
    LazyLock::new(|| ["statutory", "client", "internal"].into_iter().collect());

/// Standard email address shape: local part, one `@`, dotted domain.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex")
});

/// Whether an optional form field carries actual text (not blank).
#[must_use]
pub fn has_text(field: Option<&str>) -> bool {
    field.is_some_and(|s| !s.trim().is_empty())
}

/// Whether a string parses as a `YYYY-MM-DD` calendar date.
#[must_use]
pub fn is_valid_date(date: &str) -> bool {
    NaiveDate::parse_from_str(date, DATE_FORMAT).is_ok()
}

/// Parse a `YYYY-MM-DD` date, if well-formed.
#[must_use]
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
}

/// Whether a country/jurisdiction code is exactly two letters (ISO-2, per
/// the WIPO standard).
#[must_use]
pub fn is_iso2_code(code: &str) -> bool {
    code.chars().count() == 2 && code.chars().all(char::is_alphabetic)
}

/// Whether an email address matches the standard shape.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Whether a deadline type is one of the known values.
#[must_use]
pub fn is_valid_deadline_type(deadline_type: &str) -> bool {
    VALID_DEADLINE_TYPES.contains(deadline_type)
}
