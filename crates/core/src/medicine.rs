//! Medicine record: the single entity tracked by this service.

use serde::{Deserialize, Serialize};

/// Medicine identifier.
///
/// Externally assigned by the caller (it arrives in the add payload); the
/// service never generates one. Uniqueness is enforced by the store.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MedicineId(pub i64);

impl MedicineId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for MedicineId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for MedicineId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<MedicineId> for i64 {
    fn from(value: MedicineId) -> Self {
        value.0
    }
}

/// A medicine inventory record.
///
/// Values are deliberately permissive: `name` may be empty and
/// `quantity`/`price` may be negative. The boundary enforces type
/// conformance only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: MedicineId,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

impl Medicine {
    pub fn new(id: impl Into<MedicineId>, name: impl Into<String>, quantity: i64, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            price,
        }
    }

    /// Case-insensitive substring check against `name`.
    ///
    /// Every name contains the empty fragment.
    pub fn name_contains(&self, fragment: &str) -> bool {
        self.name.to_lowercase().contains(&fragment.to_lowercase())
    }
}
