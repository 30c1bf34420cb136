//! Generic in-memory collection state shared by every dashboard screen.
//!
//! A [`ListState`] owns one homogeneous, ordered collection of records plus a
//! single active filter. Records are never created or deleted after seeding;
//! operations replace one record at a time with a copy that differs only in
//! its lifecycle flag.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use positron_core::types::RecordId;
use tracing::debug;

use crate::error::ListError;

/// A record that can live in a [`ListState`].
pub trait Record: Clone {
    /// Collection name used in errors and logs.
    const COLLECTION: &'static str;

    fn id(&self) -> &RecordId;
}

/// A record with a single mutable lifecycle field.
pub trait Lifecycle: Record {
    type Flag: Clone + PartialEq + fmt::Debug;

    fn flag(&self) -> Self::Flag;

    /// Copy of this record with only the lifecycle flag replaced.
    fn with_flag(&self, flag: Self::Flag) -> Self;
}

/// A pure predicate over a record's classification and lifecycle fields.
pub trait Filter<T>: Clone + fmt::Debug {
    fn matches(&self, record: &T) -> bool;
}

/// Filter that accepts every record. Used by screens with no filter control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllRecords;

impl<T> Filter<T> for AllRecords {
    fn matches(&self, _record: &T) -> bool {
        true
    }
}

impl FromStr for AllRecords {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(AllRecords),
            _ => Err(format!("Unknown filter: {}", s)),
        }
    }
}

/// Ordered record collection with one active filter.
#[derive(Debug, Clone)]
pub struct ListState<T, F> {
    records: Vec<T>,
    filter: F,
}

impl<T: Record, F: Filter<T>> ListState<T, F> {
    /// Build state from a seed with the default ("all") filter.
    ///
    /// Fails with [`ListError::DuplicateId`] if two seed records share an id.
    pub fn initialize(seed: Vec<T>) -> Result<Self, ListError>
    where
        F: Default,
    {
        Self::with_filter(seed, F::default())
    }

    /// Build state from a seed with an explicit initial filter.
    pub fn with_filter(seed: Vec<T>, filter: F) -> Result<Self, ListError> {
        {
            let mut seen = HashSet::with_capacity(seed.len());
            for record in &seed {
                if !seen.insert(record.id().as_str()) {
                    return Err(ListError::DuplicateId {
                        collection: T::COLLECTION,
                        id: record.id().to_string(),
                    });
                }
            }
        }
        debug!(
            collection = T::COLLECTION,
            count = seed.len(),
            "List state initialized"
        );
        Ok(Self {
            records: seed,
            filter,
        })
    }

    /// Replace the active filter.
    pub fn set_filter(&mut self, filter: F) {
        debug!(collection = T::COLLECTION, filter = ?filter, "Filter changed");
        self.filter = filter;
    }

    /// Replace the active filter by name.
    pub fn set_filter_named(&mut self, name: &str) -> Result<(), ListError>
    where
        F: FromStr,
    {
        let filter = name.parse::<F>().map_err(|_| ListError::InvalidFilter {
            collection: T::COLLECTION,
            name: name.to_string(),
        })?;
        self.set_filter(filter);
        Ok(())
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Records matching the active filter, in insertion order.
    ///
    /// Evaluated lazily on each call, so filter changes and mutations are
    /// visible immediately.
    pub fn view(&self) -> impl Iterator<Item = &T> + '_ {
        self.records.iter().filter(move |r| self.filter.matches(r))
    }

    /// Count of records in the full collection satisfying `predicate`.
    ///
    /// Ignores the active filter.
    pub fn aggregate<P>(&self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).count()
    }

    /// The full, unfiltered collection.
    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|r| r.id().as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Set the lifecycle flag of the record with `id`.
    ///
    /// Every other field is copied unchanged. Fails with
    /// [`ListError::RecordNotFound`] when no record has that id.
    pub fn set_lifecycle_flag(&mut self, id: &str, flag: T::Flag) -> Result<&T, ListError>
    where
        T: Lifecycle,
    {
        self.replace(id, |record| record.with_flag(flag))
    }

    /// Set the lifecycle flag of every record.
    pub fn set_all_lifecycle_flags(&mut self, flag: T::Flag)
    where
        T: Lifecycle,
    {
        for record in self.records.iter_mut() {
            *record = record.with_flag(flag.clone());
        }
        debug!(
            collection = T::COLLECTION,
            count = self.records.len(),
            flag = ?flag,
            "Lifecycle flag set on all records"
        );
    }

    /// Replace the record with `id` by `update(record)`.
    ///
    /// `update` must keep the id; screens only use it to swap lifecycle
    /// fields or, for zones, the schedule.
    pub(crate) fn replace<U>(&mut self, id: &str, update: U) -> Result<&T, ListError>
    where
        U: FnOnce(&T) -> T,
    {
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id().as_str() == id)
            .ok_or_else(|| ListError::RecordNotFound {
                collection: T::COLLECTION,
                id: id.to_string(),
            })?;

        let updated = update(slot);
        debug_assert_eq!(updated.id(), slot.id(), "record id must not change");
        *slot = updated;
        debug!(collection = T::COLLECTION, id, "Record replaced");
        Ok(&*slot)
    }
}
