//! Medicine storage boundary.
//!
//! This module defines the data-access abstraction the inventory service is
//! handed, plus the two provided backends: in-memory (tests/dev) and
//! Postgres (production).

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use medstock_core::{Medicine, MedicineId};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryMedicineStore;
pub use postgres::PostgresMedicineStore;

/// Medicine store operation error.
///
/// These are infrastructure outcomes (duplicate key, connectivity); the
/// service layer decides which of them are business errors.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A record with this id already exists. Uniqueness is enforced by the
    /// store itself, so this also covers inserts racing an existence check.
    #[error("duplicate medicine id: {0}")]
    Duplicate(MedicineId),

    /// Backend failure (connectivity, poisoned lock, unexpected constraint).
    #[error("storage error: {0}")]
    Storage(String),
}

/// Durable keyed storage for medicine records with substring search.
///
/// ## Semantics
///
/// - `insert` fails with [`StoreError::Duplicate`] when the id is taken,
///   independently of any existence check the caller ran first.
/// - `update_quantity` and `delete` report presence through their `bool`
///   return instead of erroring; the caller decides what a miss means
///   (an update miss is an error upstream, a delete miss is not).
/// - `find_by_name_containing` matches `name` case-insensitively; listing
///   operations return records in primary-key order.
///
/// Implementations own connection/session lifecycle: each operation
/// acquires and releases its resources internally, on every path.
#[async_trait]
pub trait MedicineStore: Send + Sync {
    /// Look up a single record by id.
    async fn find_by_id(&self, id: MedicineId) -> Result<Option<Medicine>, StoreError>;

    /// All records, in primary-key order.
    async fn find_all(&self) -> Result<Vec<Medicine>, StoreError>;

    /// Records whose `name` contains `fragment` case-insensitively.
    async fn find_by_name_containing(&self, fragment: &str) -> Result<Vec<Medicine>, StoreError>;

    /// Persist a new record verbatim.
    async fn insert(&self, medicine: Medicine) -> Result<(), StoreError>;

    /// Replace the quantity of the record with `id`, leaving the other
    /// fields untouched. Returns `false` when the id is absent.
    async fn update_quantity(&self, id: MedicineId, quantity: i64) -> Result<bool, StoreError>;

    /// Remove the record with `id`. Returns `false` when it was not present.
    async fn delete(&self, id: MedicineId) -> Result<bool, StoreError>;
}

#[async_trait]
impl<S> MedicineStore for Arc<S>
where
    S: MedicineStore + ?Sized,
{
    async fn find_by_id(&self, id: MedicineId) -> Result<Option<Medicine>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<Medicine>, StoreError> {
        (**self).find_all().await
    }

    async fn find_by_name_containing(&self, fragment: &str) -> Result<Vec<Medicine>, StoreError> {
        (**self).find_by_name_containing(fragment).await
    }

    async fn insert(&self, medicine: Medicine) -> Result<(), StoreError> {
        (**self).insert(medicine).await
    }

    async fn update_quantity(&self, id: MedicineId, quantity: i64) -> Result<bool, StoreError> {
        (**self).update_quantity(id, quantity).await
    }

    async fn delete(&self, id: MedicineId) -> Result<bool, StoreError> {
        (**self).delete(id).await
    }
}
