//! Sale record and money helpers.

use crate::model::record::{DomainRecord, FormDate, ModuleKind};
use crate::render::DetailField;
use crate::stats::Summarize;
use crate::validate::{
    non_negative_count, optional_date, optional_text, price_cents, required_date, required_text,
    FailureReason, FormInput, ValidationFailure,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const FIELD_SALE_CUSTOMER: &str = "sale_customer";
pub const FIELD_SALE_FULL_TRAYS: &str = "sale_full_trays";
pub const FIELD_SALE_PIECES: &str = "sale_pieces";
pub const FIELD_PRICE_PER_TRAY: &str = "price_per_tray";
pub const FIELD_PRICE_PER_PIECE: &str = "price_per_piece";
pub const FIELD_SALE_DATE: &str = "sale_date";
pub const FIELD_SALE_DELIVERY_DATE: &str = "delivery_date";
pub const FIELD_SALE_NOTES: &str = "sale_notes";

/// Eggs in one full tray.
pub const EGGS_PER_TRAY: u64 = 30;
/// Currency label used in amounts shown to the user.
pub const CURRENCY_LABEL: &str = "KSh";

/// How a sale was made up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleKind {
    /// Full trays only.
    Trays,
    /// Loose pieces only.
    Pieces,
    Mixed,
}

const SALE_KINDS: &[SaleKind] = &[SaleKind::Trays, SaleKind::Pieces, SaleKind::Mixed];

impl Display for SaleKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Trays => "trays",
            Self::Pieces => "pieces",
            Self::Mixed => "mixed",
        })
    }
}

/// One sale to a customer. Prices are integer cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub customer_name: String,
    pub full_trays: u32,
    pub pieces: u32,
    pub price_per_tray_cents: u64,
    pub price_per_piece_cents: u64,
    pub sale_date: FormDate,
    pub delivery_date: Option<FormDate>,
    pub notes: Option<String>,
}

impl Sale {
    /// `full_trays * price_per_tray + pieces * price_per_piece`, in cents.
    pub fn total_amount_cents(&self) -> u64 {
        let trays = u64::from(self.full_trays).saturating_mul(self.price_per_tray_cents);
        let pieces = u64::from(self.pieces).saturating_mul(self.price_per_piece_cents);
        trays.saturating_add(pieces)
    }

    pub fn kind(&self) -> SaleKind {
        match (self.full_trays > 0, self.pieces > 0) {
            (true, false) => SaleKind::Trays,
            (false, true) => SaleKind::Pieces,
            _ => SaleKind::Mixed,
        }
    }
}

/// Formats cents as `KSh 1234.50`.
pub fn format_amount(cents: u64) -> String {
    format!("{CURRENCY_LABEL} {}.{:02}", cents / 100, cents % 100)
}

impl DomainRecord for Sale {
    const MODULE: ModuleKind = ModuleKind::Sales;
    const LABEL: &'static str = "Sale";

    fn from_form(form: &FormInput) -> Result<Self, ValidationFailure> {
        let customer_name = required_text(form, FIELD_SALE_CUSTOMER)?;
        let full_trays = non_negative_count(form, FIELD_SALE_FULL_TRAYS)?;
        let pieces = non_negative_count(form, FIELD_SALE_PIECES)?;
        let price_per_tray_cents = price_cents(form, FIELD_PRICE_PER_TRAY)?;
        let price_per_piece_cents = price_cents(form, FIELD_PRICE_PER_PIECE)?;
        let sale_date = required_date(form, FIELD_SALE_DATE)?;

        if full_trays == 0 && pieces == 0 {
            return Err(ValidationFailure::new(
                FIELD_SALE_FULL_TRAYS,
                FailureReason::Rule("or pieces must be greater than zero"),
            ));
        }

        Ok(Self {
            customer_name,
            full_trays,
            pieces,
            price_per_tray_cents,
            price_per_piece_cents,
            sale_date,
            delivery_date: optional_date(form, FIELD_SALE_DELIVERY_DATE),
            notes: optional_text(form, FIELD_SALE_NOTES),
        })
    }

    fn form_defaults(today: NaiveDate) -> FormInput {
        FormInput::new().with(FIELD_SALE_DATE, FormDate::from_calendar(today).as_str())
    }

    fn search_text(&self) -> Vec<&str> {
        let mut text = vec![self.customer_name.as_str()];
        if let Some(notes) = &self.notes {
            text.push(notes.as_str());
        }
        text
    }

    fn row_cells(&self) -> Vec<String> {
        vec![
            self.customer_name.clone(),
            self.full_trays.to_string(),
            self.pieces.to_string(),
            format_amount(self.total_amount_cents()),
            self.sale_date.display(),
        ]
    }

    fn detail_fields(&self) -> Vec<DetailField> {
        let mut fields = vec![
            DetailField::new("Customer", self.customer_name.clone()),
            DetailField::new("Full Trays", self.full_trays.to_string()),
            DetailField::new("Pieces", self.pieces.to_string()),
            DetailField::new("Price per Tray", format_amount(self.price_per_tray_cents)),
            DetailField::new("Price per Piece", format_amount(self.price_per_piece_cents)),
            DetailField::new("Total Amount", format_amount(self.total_amount_cents())),
            DetailField::new("Sale Date", self.sale_date.display()),
        ];
        if let Some(delivery_date) = &self.delivery_date {
            fields.push(DetailField::new("Delivery Date", delivery_date.display()));
        }
        if let Some(notes) = &self.notes {
            fields.push(DetailField::new("Notes", notes.clone()));
        }
        fields
    }

    fn created_message(&self) -> String {
        format!(
            "Sale added successfully! Customer: {} Full Trays: {} Pieces: {} Total Amount: {} Sale Date: {}",
            self.customer_name,
            self.full_trays,
            self.pieces,
            format_amount(self.total_amount_cents()),
            self.sale_date.as_str()
        )
    }
}

/// Quantity is eggs sold; the period is the sale date.
impl Summarize for Sale {
    type Category = SaleKind;

    fn categories() -> &'static [SaleKind] {
        SALE_KINDS
    }

    fn quantity(&self) -> u64 {
        u64::from(self.full_trays)
            .saturating_mul(EGGS_PER_TRAY)
            .saturating_add(u64::from(self.pieces))
    }

    fn category(&self) -> Option<SaleKind> {
        Some(self.kind())
    }

    fn period_date(&self, _created_on: NaiveDate) -> Option<NaiveDate> {
        self.sale_date.calendar_date()
    }
}

#[cfg(test)]
mod tests {
    use super::{format_amount, Sale, SaleKind};
    use crate::model::record::DomainRecord;
    use crate::stats::Summarize;
    use crate::validate::FormInput;

    fn sale_form(full_trays: &str, pieces: &str) -> FormInput {
        FormInput::new()
            .with("sale_customer", "Hotel Riverside")
            .with("sale_full_trays", full_trays)
            .with("sale_pieces", pieces)
            .with("price_per_tray", "350")
            .with("price_per_piece", "12.50")
            .with("sale_date", "2026-10-10")
    }

    #[test]
    fn computes_total_amount_and_eggs_sold() {
        let sale = Sale::from_form(&sale_form("2", "6")).expect("valid sale");
        assert_eq!(sale.total_amount_cents(), 2 * 35_000 + 6 * 1_250);
        assert_eq!(sale.quantity(), 66);
        assert_eq!(sale.kind(), SaleKind::Mixed);
        assert!(sale.created_message().contains("KSh 775.00"));
    }

    #[test]
    fn rejects_sale_with_nothing_sold() {
        let err = Sale::from_form(&sale_form("0", "0")).expect_err("empty sale");
        assert_eq!(err.field, "sale_full_trays");
    }

    #[test]
    fn optional_fields_stay_empty_when_blank() {
        let form = sale_form("1", "0")
            .with("delivery_date", " ")
            .with("sale_notes", "");
        let sale = Sale::from_form(&form).expect("valid sale");
        assert_eq!(sale.delivery_date, None);
        assert_eq!(sale.notes, None);
        assert_eq!(sale.kind(), SaleKind::Trays);
    }

    #[test]
    fn formats_amounts_with_two_decimals() {
        assert_eq!(format_amount(5), "KSh 0.05");
        assert_eq!(format_amount(123_450), "KSh 1234.50");
    }
}
