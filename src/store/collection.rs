use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Record;
use crate::errors::{DealVaultError, Result};

/// Ordered, id-addressed set of records of a single kind.
///
/// Reads hand out clones so callers never alias the owned data; every
/// mutation goes through [`Collection::insert`], [`Collection::update`],
/// [`Collection::remove`] or [`Collection::retain`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<T> {
    records: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> Collection<T> {
    pub fn from_records(records: Vec<T>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrowing iterator in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    /// Independent copy of every record.
    pub fn all(&self) -> Vec<T> {
        self.records.clone()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.records.iter().any(|record| record.id() == id)
    }

    pub fn get(&self, id: Uuid) -> Result<T> {
        self.records
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or_else(|| DealVaultError::not_found(T::KIND, id))
    }

    pub fn find<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.records.iter().find(|record| predicate(record)).cloned()
    }

    pub fn filter<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.records
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    /// Appends a new record with a fresh identifier and returns a copy of it.
    pub fn insert(&mut self, data: T::New, now: DateTime<Utc>) -> T {
        let mut id = Uuid::new_v4();
        while self.contains(id) {
            id = Uuid::new_v4();
        }
        let record = T::build(id, data, now);
        self.records.push(record.clone());
        tracing::debug!(kind = %T::KIND, %id, "record created");
        record
    }

    pub fn update(&mut self, id: Uuid, patch: T::Patch, now: DateTime<Utc>) -> Result<T> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| {
                tracing::warn!(kind = %T::KIND, %id, "update of unknown record");
                DealVaultError::not_found(T::KIND, id)
            })?;
        record.apply(patch, now);
        tracing::debug!(kind = %T::KIND, %id, "record updated");
        Ok(record.clone())
    }

    pub fn remove(&mut self, id: Uuid) -> Result<T> {
        let index = self
            .records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| {
                tracing::warn!(kind = %T::KIND, %id, "removal of unknown record");
                DealVaultError::not_found(T::KIND, id)
            })?;
        tracing::debug!(kind = %T::KIND, %id, "record removed");
        Ok(self.records.remove(index))
    }

    /// Keeps only the records matching `predicate`, returning how many were dropped.
    pub fn retain<P>(&mut self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        let before = self.records.len();
        self.records.retain(|record| predicate(record));
        before - self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, CategoryPatch, NewCategory};

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn insert_generates_distinct_ids() {
        let mut categories: Collection<Category> = Collection::default();
        let first = categories.insert(NewCategory::new("Software", "#111"), now());
        let second = categories.insert(NewCategory::new("Software", "#111"), now());
        assert_ne!(first.id, second.id);
        assert_eq!(categories.len(), 2);
    }

    #[test]
    fn remove_is_by_identity_not_value() {
        let mut categories: Collection<Category> = Collection::default();
        let first = categories.insert(NewCategory::new("Twin", "#222"), now());
        let second = categories.insert(NewCategory::new("Twin", "#222"), now());

        let removed = categories.remove(second.id).expect("second exists");
        assert_eq!(removed.id, second.id);
        assert!(categories.contains(first.id));
        assert!(categories.get(second.id).unwrap_err().is_not_found());
    }

    #[test]
    fn reads_are_detached_copies() {
        let mut categories: Collection<Category> = Collection::default();
        let created = categories.insert(NewCategory::new("Hosting", "#333"), now());

        let mut copy = categories.get(created.id).unwrap();
        copy.name = "Changed outside".into();

        assert_eq!(categories.get(created.id).unwrap().name, "Hosting");
    }

    #[test]
    fn update_unknown_id_fails() {
        let mut categories: Collection<Category> = Collection::default();
        let err = categories
            .update(Uuid::new_v4(), CategoryPatch::default(), now())
            .expect_err("missing record");
        assert!(err.is_not_found());
    }
}
