//! Infrastructure layer: medicine storage backends and the inventory service.

pub mod inventory;
pub mod store;

pub use inventory::{InventoryError, InventoryService};
pub use store::{InMemoryMedicineStore, MedicineStore, PostgresMedicineStore, StoreError};
