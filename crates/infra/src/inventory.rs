//! Inventory operations (application-level orchestration).
//!
//! `InventoryService` composes a [`MedicineStore`] and implements the four
//! operations of the service: list/search, add, update-quantity, delete.
//! The business error taxonomy lives here; the store stays a keyed
//! collection with no opinions about what a miss means.
//!
//! ## Execution Flow
//!
//! Every operation is a single read or write against the injected store:
//!
//! - `list`: one `find_all` / `find_by_name_containing` call
//! - `add`: existence check, then insert (the store's uniqueness constraint
//!   backs the check against races)
//! - `update_quantity`: one targeted write, miss reported as `NotFound`
//! - `delete`: one targeted delete, miss deliberately swallowed

use medstock_core::{DomainError, Medicine, MedicineId};

use crate::store::{MedicineStore, StoreError};

/// Error produced by inventory operations.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// Business-rule failure (duplicate id, missing record).
    #[error(transparent)]
    Domain(DomainError),

    /// Backend failure, propagated unchanged.
    #[error(transparent)]
    Store(StoreError),
}

impl From<DomainError> for InventoryError {
    fn from(value: DomainError) -> Self {
        InventoryError::Domain(value)
    }
}

impl From<StoreError> for InventoryError {
    fn from(value: StoreError) -> Self {
        match value {
            // A duplicate key from the store is an add racing the existence
            // check; surface it as the same business conflict.
            StoreError::Duplicate(_) => {
                InventoryError::Domain(DomainError::conflict(DUPLICATE_ID_MESSAGE))
            }
            other => InventoryError::Store(other),
        }
    }
}

/// Conflict message for an add with an already-present id.
pub const DUPLICATE_ID_MESSAGE: &str = "Medicine with this ID already exists";

/// Application service for the medicine inventory.
///
/// Generic over the store implementation so tests run against
/// [`crate::store::InMemoryMedicineStore`] and production against
/// [`crate::store::PostgresMedicineStore`] without changing call sites.
/// Holds no state of its own beyond the injected store.
#[derive(Debug)]
pub struct InventoryService<S> {
    store: S,
}

impl<S> InventoryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S> InventoryService<S>
where
    S: MedicineStore,
{
    /// List all records, or only those whose name contains `search`
    /// case-insensitively.
    ///
    /// An empty search string is treated like an absent one.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Medicine>, InventoryError> {
        match search.filter(|s| !s.is_empty()) {
            Some(fragment) => Ok(self.store.find_by_name_containing(fragment).await?),
            None => Ok(self.store.find_all().await?),
        }
    }

    /// Add a new record.
    ///
    /// Fails with a `Conflict` when the id is already present, whether the
    /// existence check sees it or a concurrent add wins the race and the
    /// store's uniqueness constraint reports the duplicate.
    pub async fn add(&self, medicine: Medicine) -> Result<(), InventoryError> {
        if self.store.find_by_id(medicine.id).await?.is_some() {
            return Err(DomainError::conflict(DUPLICATE_ID_MESSAGE).into());
        }

        self.store.insert(medicine).await?;
        Ok(())
    }

    /// Replace the quantity of an existing record, leaving `name` and
    /// `price` untouched.
    pub async fn update_quantity(&self, id: MedicineId, quantity: i64) -> Result<(), InventoryError> {
        let updated = self.store.update_quantity(id, quantity).await?;
        if !updated {
            return Err(DomainError::not_found().into());
        }

        Ok(())
    }

    /// Remove a record. Deleting an absent id still succeeds (idempotent).
    pub async fn delete(&self, id: MedicineId) -> Result<(), InventoryError> {
        self.store.delete(id).await?;
        Ok(())
    }
}
