use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use medstock_core::{Medicine, MedicineId};

use super::{MedicineStore, StoreError};

/// In-memory medicine store.
///
/// Intended for tests/dev. Uniqueness is enforced by the map entry check
/// under the write lock, so duplicate inserts fail the same way they do
/// against Postgres.
#[derive(Debug, Default)]
pub struct InMemoryMedicineStore {
    records: RwLock<HashMap<MedicineId, Medicine>>,
}

impl InMemoryMedicineStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl MedicineStore for InMemoryMedicineStore {
    async fn find_by_id(&self, id: MedicineId) -> Result<Option<Medicine>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".to_string()))?;

        Ok(records.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Medicine>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".to_string()))?;

        let mut all: Vec<Medicine> = records.values().cloned().collect();
        all.sort_by_key(|m| m.id);
        Ok(all)
    }

    async fn find_by_name_containing(&self, fragment: &str) -> Result<Vec<Medicine>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".to_string()))?;

        let mut matched: Vec<Medicine> = records
            .values()
            .filter(|m| m.name_contains(fragment))
            .cloned()
            .collect();
        matched.sort_by_key(|m| m.id);
        Ok(matched)
    }

    async fn insert(&self, medicine: Medicine) -> Result<(), StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".to_string()))?;

        if records.contains_key(&medicine.id) {
            return Err(StoreError::Duplicate(medicine.id));
        }
        records.insert(medicine.id, medicine);
        Ok(())
    }

    async fn update_quantity(&self, id: MedicineId, quantity: i64) -> Result<bool, StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".to_string()))?;

        match records.get_mut(&id) {
            Some(medicine) => {
                medicine.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: MedicineId) -> Result<bool, StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".to_string()))?;

        Ok(records.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn medicine(id: i64, name: &str, quantity: i64, price: f64) -> Medicine {
        Medicine::new(id, name, quantity, price)
    }

    #[tokio::test]
    async fn insert_and_find_by_id() {
        let store = InMemoryMedicineStore::new();
        store.insert(medicine(1, "Paracetamol", 10, 2.5)).await.unwrap();

        let found = store.find_by_id(MedicineId::new(1)).await.unwrap();
        assert_eq!(found, Some(medicine(1, "Paracetamol", 10, 2.5)));

        let missing = store.find_by_id(MedicineId::new(2)).await.unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_id() {
        let store = InMemoryMedicineStore::new();
        store.insert(medicine(1, "Paracetamol", 10, 2.5)).await.unwrap();

        let err = store.insert(medicine(1, "Ibuprofen", 5, 3.0)).await.unwrap_err();
        match err {
            StoreError::Duplicate(id) => assert_eq!(id, MedicineId::new(1)),
            other => panic!("Expected Duplicate error, got {other:?}"),
        }

        // The original record is untouched.
        let kept = store.find_by_id(MedicineId::new(1)).await.unwrap().unwrap();
        assert_eq!(kept.name, "Paracetamol");
    }

    #[tokio::test]
    async fn find_all_returns_records_in_id_order() {
        let store = InMemoryMedicineStore::new();
        store.insert(medicine(3, "Cetrizine", 4, 1.0)).await.unwrap();
        store.insert(medicine(1, "Paracetamol", 10, 2.5)).await.unwrap();
        store.insert(medicine(2, "Ibuprofen", 5, 3.0)).await.unwrap();

        let all = store.find_all().await.unwrap();
        let ids: Vec<i64> = all.iter().map(|m| m.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn search_matches_case_insensitively() {
        let store = InMemoryMedicineStore::new();
        store.insert(medicine(1, "PARACETAMOL", 10, 2.5)).await.unwrap();
        store.insert(medicine(2, "Cetrizine", 4, 1.0)).await.unwrap();
        store.insert(medicine(3, "Ibuprofen", 5, 3.0)).await.unwrap();

        let matched = store.find_by_name_containing("cet").await.unwrap();
        let ids: Vec<i64> = matched.iter().map(|m| m.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn update_quantity_changes_only_quantity() {
        let store = InMemoryMedicineStore::new();
        store.insert(medicine(1, "Paracetamol", 10, 2.5)).await.unwrap();

        let updated = store.update_quantity(MedicineId::new(1), 5).await.unwrap();
        assert!(updated);

        let after = store.find_by_id(MedicineId::new(1)).await.unwrap().unwrap();
        assert_eq!(after.quantity, 5);
        assert_eq!(after.name, "Paracetamol");
        assert_eq!(after.price, 2.5);
    }

    #[tokio::test]
    async fn update_quantity_reports_missing_id() {
        let store = InMemoryMedicineStore::new();

        let updated = store.update_quantity(MedicineId::new(99), 5).await.unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn delete_reports_presence_and_is_idempotent() {
        let store = InMemoryMedicineStore::new();
        store.insert(medicine(1, "Paracetamol", 10, 2.5)).await.unwrap();

        assert!(store.delete(MedicineId::new(1)).await.unwrap());
        assert!(!store.delete(MedicineId::new(1)).await.unwrap());
        assert_eq!(store.find_all().await.unwrap(), vec![]);
    }
}
