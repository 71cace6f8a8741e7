//! Form input model and field validation policy.
//!
//! # Responsibility
//! - Carry raw form values keyed by stable input names.
//! - Turn raw values into typed fields, or report the first unmet
//!   requirement as one `ValidationFailure`.
//!
//! # Invariants
//! - Text is trimmed and internal whitespace collapsed; blank means missing.
//! - Counts and prices never accept `NaN`-like input; prices are integer
//!   cents with at most two fraction digits.
//! - Dates are checked for presence only.

use crate::model::record::FormDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static PRICE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)(?:\.(\d{1,2}))?$").expect("valid price regex"));

/// Raw form values keyed by input name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormInput {
    fields: BTreeMap<String, String>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = Self::new();
        for (name, value) in iter {
            form.set(name, value);
        }
        form
    }
}

/// Why a field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Absent or blank after trimming.
    Missing,
    /// Present but not a whole number.
    NotANumber,
    /// A count or price that must be greater than zero.
    NotPositive,
    /// Negative where zero is the lower bound.
    Negative,
    /// Not a decimal amount with at most two fraction digits.
    InvalidPrice,
    /// Value outside a closed set of options.
    UnknownOption(String),
    /// Record-level rule spanning several fields.
    Rule(&'static str),
}

impl Display for FailureReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "is missing"),
            Self::NotANumber => write!(f, "must be a whole number"),
            Self::NotPositive => write!(f, "must be greater than zero"),
            Self::Negative => write!(f, "must not be negative"),
            Self::InvalidPrice => write!(f, "must be an amount like 12 or 12.50"),
            Self::UnknownOption(value) => write!(f, "has unsupported value `{value}`"),
            Self::Rule(message) => write!(f, "{message}"),
        }
    }
}

/// First unmet requirement found while reading a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    pub field: &'static str,
    pub reason: FailureReason,
}

impl ValidationFailure {
    pub fn new(field: &'static str, reason: FailureReason) -> Self {
        Self { field, reason }
    }

    pub fn missing(field: &'static str) -> Self {
        Self::new(field, FailureReason::Missing)
    }
}

impl Display for ValidationFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Please fill in all required fields: `{}` {}",
            self.field, self.reason
        )
    }
}

impl Error for ValidationFailure {}

/// Reads a required text field.
pub fn required_text(form: &FormInput, field: &'static str) -> Result<String, ValidationFailure> {
    optional_text(form, field).ok_or_else(|| ValidationFailure::missing(field))
}

/// Reads an optional text field; blank collapses to `None`.
pub fn optional_text(form: &FormInput, field: &'static str) -> Option<String> {
    let raw = form.get(field)?;
    let normalized = WHITESPACE_RE.replace_all(raw.trim(), " ");
    if normalized.is_empty() {
        None
    } else {
        Some(normalized.into_owned())
    }
}

/// Reads a whole-number count that must be greater than zero.
pub fn positive_count(form: &FormInput, field: &'static str) -> Result<u32, ValidationFailure> {
    match parse_count(form, field)? {
        0 => Err(ValidationFailure::new(field, FailureReason::NotPositive)),
        value => Ok(value),
    }
}

/// Reads a whole-number count where zero is allowed.
pub fn non_negative_count(
    form: &FormInput,
    field: &'static str,
) -> Result<u32, ValidationFailure> {
    parse_count(form, field)
}

fn parse_count(form: &FormInput, field: &'static str) -> Result<u32, ValidationFailure> {
    let raw = required_text(form, field)?;
    let value = raw
        .parse::<i64>()
        .map_err(|_| ValidationFailure::new(field, FailureReason::NotANumber))?;
    if value < 0 {
        return Err(ValidationFailure::new(field, FailureReason::Negative));
    }
    u32::try_from(value).map_err(|_| ValidationFailure::new(field, FailureReason::NotANumber))
}

/// Reads a strictly positive price as integer cents.
pub fn price_cents(form: &FormInput, field: &'static str) -> Result<u64, ValidationFailure> {
    let raw = required_text(form, field)?;
    let invalid = || ValidationFailure::new(field, FailureReason::InvalidPrice);
    let captures = PRICE_RE.captures(raw.as_str()).ok_or_else(invalid)?;

    let whole = captures
        .get(1)
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .ok_or_else(invalid)?;
    let fraction = match captures.get(2) {
        Some(m) if m.as_str().len() == 1 => m.as_str().parse::<u64>().map(|v| v * 10),
        Some(m) => m.as_str().parse::<u64>(),
        None => Ok(0),
    }
    .map_err(|_| invalid())?;

    let cents = whole
        .checked_mul(100)
        .and_then(|value| value.checked_add(fraction))
        .ok_or_else(invalid)?;
    if cents == 0 {
        return Err(ValidationFailure::new(field, FailureReason::NotPositive));
    }
    Ok(cents)
}

/// Reads a required date; presence is the only check.
pub fn required_date(form: &FormInput, field: &'static str) -> Result<FormDate, ValidationFailure> {
    optional_date(form, field).ok_or_else(|| ValidationFailure::missing(field))
}

pub fn optional_date(form: &FormInput, field: &'static str) -> Option<FormDate> {
    let raw = form.get(field)?.trim();
    if raw.is_empty() {
        None
    } else {
        Some(FormDate::new(raw))
    }
}

/// Reads a required value from a closed set using `parse`.
pub fn one_of<T>(
    form: &FormInput,
    field: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, ValidationFailure> {
    let raw = required_text(form, field)?;
    match parse(raw.as_str()) {
        Some(value) => Ok(value),
        None => Err(ValidationFailure::new(
            field,
            FailureReason::UnknownOption(raw),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        non_negative_count, optional_text, positive_count, price_cents, required_date,
        required_text, FailureReason, FormInput,
    };

    fn form(name: &str, value: &str) -> FormInput {
        FormInput::new().with(name, value)
    }

    #[test]
    fn required_text_trims_and_collapses_whitespace() {
        let value = required_text(&form("name", "  Mama   Njeri \t Eggs "), "name")
            .expect("text should be accepted");
        assert_eq!(value, "Mama Njeri Eggs");
    }

    #[test]
    fn blank_text_counts_as_missing() {
        let err = required_text(&form("name", "   "), "name").expect_err("blank must fail");
        assert_eq!(err.reason, FailureReason::Missing);
        assert_eq!(optional_text(&form("notes", "\n"), "notes"), None);
    }

    #[test]
    fn counts_reject_non_numbers_zero_and_negatives() {
        let err = positive_count(&form("trays", "abc"), "trays").unwrap_err();
        assert_eq!(err.reason, FailureReason::NotANumber);

        let err = positive_count(&form("trays", "0"), "trays").unwrap_err();
        assert_eq!(err.reason, FailureReason::NotPositive);

        let err = non_negative_count(&form("pieces", "-2"), "pieces").unwrap_err();
        assert_eq!(err.reason, FailureReason::Negative);

        assert_eq!(non_negative_count(&form("pieces", "0"), "pieces"), Ok(0));
        assert_eq!(positive_count(&form("trays", " 12 "), "trays"), Ok(12));
    }

    #[test]
    fn prices_become_cents() {
        assert_eq!(price_cents(&form("p", "350"), "p"), Ok(35_000));
        assert_eq!(price_cents(&form("p", "12.5"), "p"), Ok(1_250));
        assert_eq!(price_cents(&form("p", "0.05"), "p"), Ok(5));

        let err = price_cents(&form("p", "12.505"), "p").unwrap_err();
        assert_eq!(err.reason, FailureReason::InvalidPrice);

        let err = price_cents(&form("p", "0.00"), "p").unwrap_err();
        assert_eq!(err.reason, FailureReason::NotPositive);
    }

    #[test]
    fn dates_are_checked_for_presence_only() {
        let date = required_date(&form("d", "someday"), "d").expect("any text is accepted");
        assert_eq!(date.as_str(), "someday");

        let err = required_date(&form("d", ""), "d").unwrap_err();
        assert_eq!(err.reason, FailureReason::Missing);
    }

    #[test]
    fn failure_message_names_the_field() {
        let err = required_text(&FormInput::new(), "customer_name").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Please fill in all required fields"));
        assert!(message.contains("customer_name"));
    }
}
