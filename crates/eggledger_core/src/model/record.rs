//! Shared record envelope and the contract every domain record implements.
//!
//! # Responsibility
//! - Wrap domain payloads with store-assigned identity and creation time.
//! - Define `DomainRecord`, the seam between the generic store/module
//!   machinery and the concrete customer/inventory/sale shapes.
//!
//! # Invariants
//! - `id` is assigned once by the store and never reused.
//! - A stored record is immutable; the only lifecycle exit is deletion.

use crate::render::DetailField;
use crate::stats::Summarize;
use crate::validate::{FormInput, ValidationFailure};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque identifier assigned to a record at creation time.
pub type RecordId = Uuid;

/// Admin area a record (and its store) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    Customers,
    Inventory,
    Sales,
}

impl ModuleKind {
    /// Stable string id used in log lines and host commands.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Inventory => "inventory",
            Self::Sales => "sales",
        }
    }

    /// Parses a module id; accepts the singular form as well.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "customers" | "customer" => Some(Self::Customers),
            "inventory" => Some(Self::Inventory),
            "sales" | "sale" => Some(Self::Sales),
            _ => None,
        }
    }

    pub fn all() -> [Self; 3] {
        [Self::Customers, Self::Inventory, Self::Sales]
    }
}

impl Display for ModuleKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A domain payload together with its store-assigned identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredRecord<T> {
    id: RecordId,
    created_at: DateTime<Utc>,
    #[serde(flatten)]
    data: T,
}

impl<T> StoredRecord<T> {
    pub(crate) fn new(id: RecordId, created_at: DateTime<Utc>, data: T) -> Self {
        Self {
            id,
            created_at,
            data,
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn data(&self) -> &T {
        &self.data
    }
}

/// Raw date value as typed into a form.
///
/// Presence is the only validation applied on input; calendar
/// interpretation happens lazily when a period aggregate needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormDate(String);

impl FormDate {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn from_calendar(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Reads the value as a calendar date.
    ///
    /// Accepts `YYYY-MM-DD` (date inputs) and RFC 3339 timestamps. Anything
    /// else yields `None` and falls outside every period.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let raw = self.0.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|value| value.date_naive())
            })
    }

    /// Day/month/year display form; falls back to the raw text.
    pub fn display(&self) -> String {
        match self.calendar_date() {
            Some(date) => date.format("%d/%m/%Y").to_string(),
            None => self.0.clone(),
        }
    }
}

/// Contract implemented by each admin area's record type.
pub trait DomainRecord: Summarize + Clone + Serialize {
    /// Module that owns records of this type.
    const MODULE: ModuleKind;
    /// Singular human label, e.g. `Customer`.
    const LABEL: &'static str;

    /// Builds a record from raw form input, or names the first unmet
    /// requirement.
    fn from_form(form: &FormInput) -> Result<Self, ValidationFailure>;

    /// Values pre-filled when the create form opens.
    fn form_defaults(_today: NaiveDate) -> FormInput {
        FormInput::new()
    }

    /// Text fragments matched by the search box.
    fn search_text(&self) -> Vec<&str>;

    /// Table cells, in column order.
    fn row_cells(&self) -> Vec<String>;

    /// Labeled values for the read-only detail view.
    fn detail_fields(&self) -> Vec<DetailField>;

    /// Confirmation shown after a successful create.
    fn created_message(&self) -> String {
        format!("{} added successfully!", Self::LABEL)
    }
}

#[cfg(test)]
mod tests {
    use super::{FormDate, ModuleKind};
    use chrono::NaiveDate;

    #[test]
    fn form_date_reads_date_inputs_and_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2026, 10, 3).expect("valid date");
        assert_eq!(FormDate::new("2026-10-03").calendar_date(), Some(expected));
        assert_eq!(
            FormDate::new("2026-10-03T08:15:00Z").calendar_date(),
            Some(expected)
        );
        assert_eq!(FormDate::new("next tuesday").calendar_date(), None);
    }

    #[test]
    fn form_date_display_uses_day_first_order() {
        assert_eq!(FormDate::new("2026-10-03").display(), "03/10/2026");
        assert_eq!(FormDate::new("soon").display(), "soon");
    }

    #[test]
    fn module_kind_parses_plural_and_singular() {
        assert_eq!(ModuleKind::parse("sales"), Some(ModuleKind::Sales));
        assert_eq!(ModuleKind::parse(" customer "), Some(ModuleKind::Customers));
        assert_eq!(ModuleKind::parse("orders"), None);
    }
}
