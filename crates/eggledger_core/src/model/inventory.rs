//! Inventory intake record.
//!
//! One delivery from a supplier. The stats board counts deliveries per
//! tray type and sums delivered pieces overall and for the current month.

use crate::model::record::{DomainRecord, FormDate, ModuleKind};
use crate::render::DetailField;
use crate::stats::Summarize;
use crate::validate::{
    one_of, positive_count, required_date, required_text, FormInput, ValidationFailure,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const FIELD_SUPPLIER_NAME: &str = "supplier_name";
pub const FIELD_TRAY_TYPE: &str = "tray_type";
pub const FIELD_TRAYS: &str = "trays";
pub const FIELD_PIECES: &str = "pieces";
pub const FIELD_DELIVERY_DATE: &str = "delivery_date";

/// Whether a delivery arrived in complete trays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrayType {
    Full,
    Partial,
}

const TRAY_TYPES: &[TrayType] = &[TrayType::Full, TrayType::Partial];

impl TrayType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Partial => "partial",
        }
    }

    /// Parses the stable lowercase id; other spellings are rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "full" => Some(Self::Full),
            "partial" => Some(Self::Partial),
            _ => None,
        }
    }
}

impl Display for TrayType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One supplier delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub supplier_name: String,
    pub tray_type: TrayType,
    pub trays: u32,
    /// Delivered eggs, in pieces.
    pub pieces: u32,
    pub delivery_date: FormDate,
}

impl DomainRecord for InventoryEntry {
    const MODULE: ModuleKind = ModuleKind::Inventory;
    const LABEL: &'static str = "Inventory";

    fn from_form(form: &FormInput) -> Result<Self, ValidationFailure> {
        Ok(Self {
            supplier_name: required_text(form, FIELD_SUPPLIER_NAME)?,
            tray_type: one_of(form, FIELD_TRAY_TYPE, TrayType::parse)?,
            trays: positive_count(form, FIELD_TRAYS)?,
            pieces: positive_count(form, FIELD_PIECES)?,
            delivery_date: required_date(form, FIELD_DELIVERY_DATE)?,
        })
    }

    fn form_defaults(today: NaiveDate) -> FormInput {
        FormInput::new().with(
            FIELD_DELIVERY_DATE,
            FormDate::from_calendar(today).as_str(),
        )
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.supplier_name.as_str(), self.tray_type.as_str()]
    }

    fn row_cells(&self) -> Vec<String> {
        vec![
            self.supplier_name.clone(),
            format!("{} ({} trays)", self.tray_type, self.trays),
            self.pieces.to_string(),
            self.delivery_date.display(),
        ]
    }

    fn detail_fields(&self) -> Vec<DetailField> {
        vec![
            DetailField::new("Supplier Name", self.supplier_name.clone()),
            DetailField::new("Tray Type", self.tray_type.to_string()),
            DetailField::new("Trays", self.trays.to_string()),
            DetailField::new("Quantity (pieces)", self.pieces.to_string()),
            DetailField::new("Delivery Date", self.delivery_date.display()),
        ]
    }
}

impl Summarize for InventoryEntry {
    type Category = TrayType;

    fn categories() -> &'static [TrayType] {
        TRAY_TYPES
    }

    fn quantity(&self) -> u64 {
        u64::from(self.pieces)
    }

    fn category(&self) -> Option<TrayType> {
        Some(self.tray_type)
    }

    fn period_date(&self, _created_on: NaiveDate) -> Option<NaiveDate> {
        self.delivery_date.calendar_date()
    }
}

#[cfg(test)]
mod tests {
    use super::{InventoryEntry, TrayType};
    use crate::model::record::DomainRecord;
    use crate::validate::{FailureReason, FormInput};
    use chrono::NaiveDate;

    fn complete_form() -> FormInput {
        FormInput::new()
            .with("supplier_name", "Kamau Poultry")
            .with("tray_type", "full")
            .with("trays", "4")
            .with("pieces", "120")
            .with("delivery_date", "2026-10-02")
    }

    #[test]
    fn builds_entry_from_complete_form() {
        let entry = InventoryEntry::from_form(&complete_form()).expect("form is complete");
        assert_eq!(entry.tray_type, TrayType::Full);
        assert_eq!(entry.pieces, 120);
    }

    #[test]
    fn rejects_unknown_tray_type() {
        let form = complete_form().with("tray_type", "Full");
        let err = InventoryEntry::from_form(&form).expect_err("capitalized tray type");
        assert_eq!(err.field, "tray_type");
        assert_eq!(err.reason, FailureReason::UnknownOption("Full".to_string()));
    }

    #[test]
    fn defaults_delivery_date_to_today() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date");
        let defaults = InventoryEntry::form_defaults(today);
        assert_eq!(defaults.get("delivery_date"), Some("2026-10-18"));
    }
}
