//! In-memory record store for one admin area.
//!
//! # Responsibility
//! - Own every record of one area in insertion order.
//! - Assign ids and creation timestamps; remove by position or by id.
//!
//! # Invariants
//! - Ids are unique for the store's lifetime.
//! - Removal preserves the relative order of the remaining records.
//! - Positions are invalidated by any insert or delete; callers that must
//!   survive mutation hold a `RecordId` instead.
//! - The store never notifies anyone; callers refresh derived views.

use crate::clock::Clock;
use crate::model::record::{RecordId, StoredRecord};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Record no longer exists, addressed by position or by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    IndexOutOfBounds { index: usize, len: usize },
    IdNotFound(RecordId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "record not found at index {index} (store holds {len})")
            }
            Self::IdNotFound(id) => write!(f, "record not found: {id}"),
        }
    }
}

impl Error for StoreError {}

/// Ordered, owned collection of records.
#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    records: Vec<StoredRecord<T>>,
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T> RecordStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `data` and returns its freshly assigned id.
    pub fn add(&mut self, data: T, clock: &dyn Clock) -> RecordId {
        let id = self.fresh_id();
        self.records.push(StoredRecord::new(id, clock.now(), data));
        debug!(
            "event=record_add module=store status=ok id={} len={}",
            id,
            self.records.len()
        );
        id
    }

    /// Removes the record at `index`; out-of-range leaves the store as is.
    pub fn remove_at(&mut self, index: usize) -> StoreResult<StoredRecord<T>> {
        if index >= self.records.len() {
            return Err(StoreError::IndexOutOfBounds {
                index,
                len: self.records.len(),
            });
        }
        Ok(self.records.remove(index))
    }

    pub fn remove_by_id(&mut self, id: RecordId) -> StoreResult<StoredRecord<T>> {
        let index = self.position_of(id).ok_or(StoreError::IdNotFound(id))?;
        self.remove_at(index)
    }

    pub fn get(&self, index: usize) -> StoreResult<&StoredRecord<T>> {
        self.records.get(index).ok_or(StoreError::IndexOutOfBounds {
            index,
            len: self.records.len(),
        })
    }

    pub fn get_by_id(&self, id: RecordId) -> StoreResult<&StoredRecord<T>> {
        self.records
            .iter()
            .find(|record| record.id() == id)
            .ok_or(StoreError::IdNotFound(id))
    }

    pub fn position_of(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    /// Read-only view in insertion order.
    pub fn all(&self) -> &[StoredRecord<T>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Positions and records whose searchable text contains `query`,
    /// case-insensitively. A blank query matches everything.
    pub fn filter<'a, F>(&'a self, query: &str, text_of: F) -> Vec<(usize, &'a StoredRecord<T>)>
    where
        F: Fn(&'a T) -> Vec<&'a str>,
    {
        let needle = query.trim().to_lowercase();
        self.records
            .iter()
            .enumerate()
            .filter(|&(_, record)| {
                needle.is_empty()
                    || text_of(record.data())
                        .iter()
                        .any(|text| text.to_lowercase().contains(needle.as_str()))
            })
            .collect()
    }

    fn fresh_id(&self) -> RecordId {
        loop {
            let candidate = Uuid::new_v4();
            if self.position_of(candidate).is_none() {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordStore, StoreError};
    use crate::clock::SystemClock;

    #[test]
    fn remove_preserves_relative_order() {
        let mut store = RecordStore::new();
        for value in ["a", "b", "c", "d"] {
            store.add(value, &SystemClock);
        }

        let removed = store.remove_at(1).expect("index 1 exists");
        assert_eq!(*removed.data(), "b");

        let remaining: Vec<&str> = store.all().iter().map(|record| *record.data()).collect();
        assert_eq!(remaining, vec!["a", "c", "d"]);
    }

    #[test]
    fn out_of_range_removal_leaves_store_unchanged() {
        let mut store = RecordStore::new();
        store.add(1_u32, &SystemClock);

        let err = store.remove_at(1).expect_err("index 1 is past the end");
        assert_eq!(err, StoreError::IndexOutOfBounds { index: 1, len: 1 });
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_by_id_reports_missing_ids() {
        let mut store = RecordStore::new();
        let id = store.add("only", &SystemClock);
        store.remove_by_id(id).expect("first removal succeeds");

        let err = store.remove_by_id(id).expect_err("second removal must fail");
        assert_eq!(err, StoreError::IdNotFound(id));
        assert!(store.is_empty());
    }
}
