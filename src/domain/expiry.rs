use crate::error::ValidationError;
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static SLASH_EXPIRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d\s?/\s?\d").expect("static slash expiry pattern"));

static COMPACT_EXPIRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{2})(\d{2,4})").expect("static compact expiry pattern"));

/// A parsed expiry. Either half may be missing; range checks happen later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Expiry {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// Parses free-form expiry text such as `04/25`, `4 / 2025` or `0425`.
///
/// Unrecognized text leaves both halves unset.
pub fn parse_expiry(text: &str) -> Expiry {
    if text.trim().is_empty() {
        return Expiry::default();
    }

    let (month, year) = if SLASH_EXPIRY.is_match(text) {
        let compact: String = text.chars().filter(|c| *c != ' ').collect();
        let mut parts = compact.split('/');
        (
            parts.next().map(str::to_string),
            parts.next().map(str::to_string),
        )
    } else if let Some(captures) = COMPACT_EXPIRY.captures(text) {
        (
            captures.get(1).map(|m| m.as_str().to_string()),
            captures.get(2).map(|m| m.as_str().to_string()),
        )
    } else {
        (None, None)
    };

    Expiry {
        month: month.map(|m| leading_int(&m)),
        year: year.map(|y| {
            let y = if y.chars().count() == 2 { format!("20{y}") } else { y };
            i32::try_from(leading_int(&y)).unwrap_or(i32::MAX)
        }),
    }
}

// Reads the whole leading run of ASCII digits, saturating on overflow; no
// digits reads as 0.
fn leading_int(s: &str) -> u32 {
    s.chars()
        .take_while(char::is_ascii_digit)
        .fold(0u32, |acc, c| {
            acc.saturating_mul(10)
                .saturating_add(u32::from(c as u8 - b'0'))
        })
}

/// Checks an expiry against `reference`.
///
/// Nothing is checked unless both month and year are present.
pub fn validate_expiry(
    month: Option<u32>,
    year: Option<i32>,
    reference: NaiveDate,
) -> Result<(), ValidationError> {
    let (Some(month), Some(year)) = (month, year) else {
        return Ok(());
    };

    if !(1..=12).contains(&month) {
        return Err(ValidationError::ExpiryInvalid);
    }

    if year < reference.year() || (year == reference.year() && month < reference.month()) {
        return Err(ValidationError::CardExpired);
    }

    Ok(())
}
