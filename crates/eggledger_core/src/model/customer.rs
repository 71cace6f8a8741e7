//! Customer record.

use crate::model::record::{DomainRecord, ModuleKind};
use crate::render::DetailField;
use crate::stats::{NoCategory, Summarize};
use crate::validate::{required_text, FormInput, ValidationFailure};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const FIELD_CUSTOMER_NAME: &str = "customer_name";
pub const FIELD_CUSTOMER_PHONE: &str = "customer_phone";

/// A buyer the business sells to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub phone: String,
}

impl DomainRecord for Customer {
    const MODULE: ModuleKind = ModuleKind::Customers;
    const LABEL: &'static str = "Customer";

    fn from_form(form: &FormInput) -> Result<Self, ValidationFailure> {
        Ok(Self {
            name: required_text(form, FIELD_CUSTOMER_NAME)?,
            phone: required_text(form, FIELD_CUSTOMER_PHONE)?,
        })
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.phone.as_str()]
    }

    fn row_cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.phone.clone()]
    }

    fn detail_fields(&self) -> Vec<DetailField> {
        vec![
            DetailField::new("Name", self.name.clone()),
            DetailField::new("Phone", self.phone.clone()),
        ]
    }

    fn created_message(&self) -> String {
        format!(
            "Customer added successfully! Name: {} Phone: {}",
            self.name, self.phone
        )
    }
}

/// Each customer counts once; the period is the month they were added.
impl Summarize for Customer {
    type Category = NoCategory;

    fn categories() -> &'static [NoCategory] {
        &[]
    }

    fn quantity(&self) -> u64 {
        1
    }

    fn category(&self) -> Option<NoCategory> {
        None
    }

    fn period_date(&self, created_on: NaiveDate) -> Option<NaiveDate> {
        Some(created_on)
    }
}
