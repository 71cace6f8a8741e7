//! Domain records for the three admin areas.
//!
//! # Responsibility
//! - Define one canonical field set per area (customers, inventory, sales).
//! - Map raw form input into typed records through `DomainRecord`.
//!
//! # Invariants
//! - Categorical values are closed enums checked when a record is built.
//! - Records carry no edit operation; they are created or deleted.

pub mod customer;
pub mod inventory;
pub mod record;
pub mod sale;
