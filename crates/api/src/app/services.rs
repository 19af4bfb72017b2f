use std::sync::Arc;

use medstock_core::{Medicine, MedicineId};
use medstock_infra::{
    InMemoryMedicineStore, InventoryError, InventoryService, PostgresMedicineStore,
};
use sqlx::PgPool;

/// Backend-selected application services.
///
/// The in-memory variant backs dev and tests; the persistent variant runs
/// against Postgres. Both expose the same inventory operations, so handlers
/// never see which backend is live.
#[derive(Clone)]
pub enum AppServices {
    InMemory {
        inventory: Arc<InventoryService<Arc<InMemoryMedicineStore>>>,
    },
    Persistent {
        inventory: Arc<InventoryService<Arc<PostgresMedicineStore>>>,
    },
}

pub async fn build_services() -> AppServices {
    let use_persistent = std::env::var("USE_PERSISTENT_STORES")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    if use_persistent {
        return build_persistent_services().await;
    }

    build_in_memory_services()
}

fn build_in_memory_services() -> AppServices {
    // In-memory store wiring (dev/test): no external dependencies.
    let store = InMemoryMedicineStore::arc();

    AppServices::InMemory {
        inventory: Arc::new(InventoryService::new(store)),
    }
}

async fn build_persistent_services() -> AppServices {
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set when USE_PERSISTENT_STORES=true");

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to Postgres");

    let store = Arc::new(PostgresMedicineStore::new(pool));
    store
        .migrate()
        .await
        .expect("Failed to run database migrations");

    AppServices::Persistent {
        inventory: Arc::new(InventoryService::new(store)),
    }
}

impl AppServices {
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Medicine>, InventoryError> {
        match self {
            AppServices::InMemory { inventory } => inventory.list(search).await,
            AppServices::Persistent { inventory } => inventory.list(search).await,
        }
    }

    pub async fn add(&self, medicine: Medicine) -> Result<(), InventoryError> {
        match self {
            AppServices::InMemory { inventory } => inventory.add(medicine).await,
            AppServices::Persistent { inventory } => inventory.add(medicine).await,
        }
    }

    pub async fn update_quantity(
        &self,
        id: MedicineId,
        quantity: i64,
    ) -> Result<(), InventoryError> {
        match self {
            AppServices::InMemory { inventory } => inventory.update_quantity(id, quantity).await,
            AppServices::Persistent { inventory } => inventory.update_quantity(id, quantity).await,
        }
    }

    pub async fn delete(&self, id: MedicineId) -> Result<(), InventoryError> {
        match self {
            AppServices::InMemory { inventory } => inventory.delete(id).await,
            AppServices::Persistent { inventory } => inventory.delete(id).await,
        }
    }
}
