//! Row statistics and header classification.
//!
//! A [`RowProfile`] summarizes one record as a handful of ratios over its
//! fields: how many look like alphabetic labels, numbers, timestamps,
//! `key=value` telemetry, or nothing at all, plus whether any value repeats.
//! [`detect_header`] combines the profile of the first record with a
//! contrast check against the second to decide whether the first record is
//! a header row.
//!
//! The intuition: header rows are dominated by short alphabetic labels, are
//! non-repetitive, and rarely look like timestamps or raw numbers. A single
//! plausible-looking row is not proof on its own, so when a second record is
//! available it must look more like data than the first before the first is
//! accepted as a header.

use itertools::Itertools;

const ALPHA_WORD_MIN: f64 = 0.60;
const KEY_VALUE_MAX: f64 = 0.20;
const NUMERIC_LIKE_MAX: f64 = 0.40;
const DATETIME_LIKE_MAX: f64 = 0.40;
const EMPTY_MAX: f64 = 0.34;

const CONTRAST_ALPHA_WORD_MAX: f64 = 0.50;
const CONTRAST_NUMERIC_LIKE_MIN: f64 = 0.30;
const CONTRAST_DATETIME_LIKE_MIN: f64 = 0.20;
const CONTRAST_KEY_VALUE_MIN: f64 = 0.20;

/// Per-record field statistics. Each ratio is the fraction of fields
/// satisfying the corresponding predicate; all lie in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RowProfile {
    pub alpha_word_ratio: f64,
    pub numeric_like_ratio: f64,
    pub datetime_like_ratio: f64,
    pub key_value_ratio: f64,
    pub empty_ratio: f64,
    pub has_duplicate: bool,
}

impl RowProfile {
    /// Computes the profile of a single record. Fields are trimmed before
    /// every predicate is evaluated. An empty record profiles to all zeroes.
    pub fn measure(fields: &[String]) -> Self {
        if fields.is_empty() {
            return Self::default();
        }
        let total = fields.len() as f64;
        let trimmed: Vec<&str> = fields.iter().map(|f| f.trim()).collect();

        let count = |predicate: fn(&str) -> bool| {
            trimmed.iter().copied().filter(|f| predicate(f)).count() as f64 / total
        };

        let has_duplicate = trimmed
            .iter()
            .filter(|f| !f.is_empty())
            .map(|f| f.to_lowercase())
            .duplicates()
            .next()
            .is_some();

        Self {
            alpha_word_ratio: count(is_alpha_word),
            numeric_like_ratio: count(is_numeric_like),
            datetime_like_ratio: count(is_datetime_like),
            key_value_ratio: count(is_key_value),
            empty_ratio: count(str::is_empty),
            has_duplicate,
        }
    }

    /// Whether this record's statistics are consistent with a header row:
    /// mostly alphabetic labels, few numbers or timestamps, no `key=value`
    /// fields to speak of, few blanks, and no repeated values.
    pub fn is_headerish(&self) -> bool {
        self.alpha_word_ratio >= ALPHA_WORD_MIN
            && self.key_value_ratio < KEY_VALUE_MAX
            && self.numeric_like_ratio < NUMERIC_LIKE_MAX
            && self.datetime_like_ratio < DATETIME_LIKE_MAX
            && self.empty_ratio <= EMPTY_MAX
            && !self.has_duplicate
    }

    /// Whether this record looks sufficiently like *data* to justify calling
    /// the record before it a header.
    pub fn contrasts_with_header(&self) -> bool {
        self.alpha_word_ratio <= CONTRAST_ALPHA_WORD_MAX
            || self.numeric_like_ratio >= CONTRAST_NUMERIC_LIKE_MIN
            || self.datetime_like_ratio >= CONTRAST_DATETIME_LIKE_MIN
            || self.key_value_ratio >= CONTRAST_KEY_VALUE_MIN
    }
}

/// Decides whether `first` is a header row, optionally contrasting it
/// against the record that follows it.
///
/// Without a second record the statistical test on `first` alone decides.
/// With one, `first` is only accepted when the second record fails to look
/// header-like itself, guarding against one-column-of-labels data files.
pub fn detect_header(first: &[String], next: Option<&[String]>) -> bool {
    if !RowProfile::measure(first).is_headerish() {
        return false;
    }
    match next {
        Some(row) => RowProfile::measure(row).contrasts_with_header(),
        None => true,
    }
}

/// Non-empty and composed only of ASCII letters, spaces, and underscores.
fn is_alpha_word(field: &str) -> bool {
    !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == ' ' || c == '_')
}

/// Digits with numeric punctuation (`+ - % . ,`), at most three separator
/// characters (`.` or `,`) in total.
fn is_numeric_like(field: &str) -> bool {
    if field.is_empty() {
        return false;
    }
    let mut separators = 0usize;
    for c in field.chars() {
        match c {
            '0'..='9' | '+' | '-' | '%' => {}
            '.' | ',' => separators += 1,
            _ => return false,
        }
    }
    separators <= 3
}

/// Timestamp alphabet (`digits - / : space T Z`) with at least one digit.
fn is_datetime_like(field: &str) -> bool {
    let mut saw_digit = false;
    for c in field.chars() {
        match c {
            '0'..='9' => saw_digit = true,
            '-' | '/' | ':' | ' ' | 'T' | 'Z' => {}
            _ => return false,
        }
    }
    saw_digit
}

/// Exactly one `=`, both sides non-empty after trimming, and a key made of
/// word characters only.
fn is_key_value(field: &str) -> bool {
    let mut parts = field.splitn(2, '=');
    let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
        return false;
    };
    if value.contains('=') {
        return false;
    }
    let key = key.trim();
    let value = value.trim();
    !key.is_empty()
        && !value.is_empty()
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
