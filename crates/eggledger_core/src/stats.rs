//! Derived summary statistics over one record store.
//!
//! # Responsibility
//! - Recompute totals, category counts and current-month sums from scratch.
//!
//! # Invariants
//! - `summarize` is a pure function of the records and the clock reading.
//! - "Today" is read once per call and never cached across calls.
//! - Creation timestamps are read in the clock's calendar, like "today".
//! - Every declared category appears in `category_counts`, zero included.

use crate::clock::Clock;
use crate::model::record::StoredRecord;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};

/// Per-record inputs to the aggregator.
pub trait Summarize {
    /// Closed set of categories records are bucketed by.
    type Category: Copy + Ord + Debug + Display + Serialize + 'static;

    /// Every category, in display order.
    fn categories() -> &'static [Self::Category];

    /// Amount added to the quantity totals.
    fn quantity(&self) -> u64;

    fn category(&self) -> Option<Self::Category>;

    /// Date deciding whether the record falls in the current period.
    /// `created_on` is the creation date in the clock's calendar.
    fn period_date(&self, created_on: NaiveDate) -> Option<NaiveDate>;
}

/// Category type for records that are not bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum NoCategory {}

impl Display for NoCategory {
    fn fmt(&self, _f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {}
    }
}

/// Summary shown above each table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats<K: Ord> {
    pub record_count: usize,
    pub total_quantity: u64,
    pub category_counts: BTreeMap<K, usize>,
    pub current_period_quantity: u64,
    pub period_year: i32,
    pub period_month: u32,
}

/// Recomputes stats over `records` for the month containing `clock.today()`.
pub fn summarize<T: Summarize>(records: &[StoredRecord<T>], clock: &dyn Clock) -> Stats<T::Category> {
    let today = clock.today();
    let mut category_counts: BTreeMap<T::Category, usize> =
        T::categories().iter().map(|category| (*category, 0)).collect();
    let mut total_quantity = 0u64;
    let mut current_period_quantity = 0u64;

    for record in records {
        let data = record.data();
        let quantity = data.quantity();
        total_quantity = total_quantity.saturating_add(quantity);

        if let Some(category) = data.category() {
            if let Some(count) = category_counts.get_mut(&category) {
                *count += 1;
            }
        }

        let in_period = data
            .period_date(clock.date_of(record.created_at()))
            .is_some_and(|date| date.year() == today.year() && date.month() == today.month());
        if in_period {
            current_period_quantity = current_period_quantity.saturating_add(quantity);
        }
    }

    Stats {
        record_count: records.len(),
        total_quantity,
        category_counts,
        current_period_quantity,
        period_year: today.year(),
        period_month: today.month(),
    }
}

impl<K: Ord + Copy> Stats<K> {
    pub fn count_for(&self, category: K) -> usize {
        self.category_counts.get(&category).copied().unwrap_or(0)
    }
}
