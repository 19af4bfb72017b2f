//! Postgres-backed medicine store.
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to `StoreError` as follows:
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError | Scenario |
//! |------------|----------------------|------------|----------|
//! | Database (unique violation on insert) | `23505` | `Duplicate` | Insert racing another add for the same id |
//! | Database (other) | Any other | `Storage` | Other database errors |
//! | PoolClosed | N/A | `Storage` | Connection pool was closed |
//! | Other | N/A | `Storage` | Network errors, connection failures, etc. |
//!
//! ## Search Semantics
//!
//! `find_by_name_containing` promises plain substring matching, so the
//! fragment is escaped (`%`, `_`, `\`) before it is wrapped into an ILIKE
//! pattern. Postgres treats backslash as the escape character by default.

use sqlx::{PgPool, Row, migrate::Migrator};
use tracing::instrument;

use async_trait::async_trait;

use medstock_core::{Medicine, MedicineId};

use super::{MedicineStore, StoreError};

/// Schema migrations, embedded from `migrations/` at compile time.
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Postgres-backed medicine store.
///
/// Uniqueness of `id` is enforced by the primary-key constraint, so a
/// duplicate insert fails at the database even when it races an existence
/// check. Each operation checks a connection out of the pool and the pool
/// returns it on every path, including errors.
#[derive(Debug, Clone)]
pub struct PostgresMedicineStore {
    pool: PgPool,
}

impl PostgresMedicineStore {
    /// Create a new store on top of an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the embedded schema migrations for the `medicines` table.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Storage(format!("migration failed: {e}")))
    }
}

#[async_trait]
impl MedicineStore for PostgresMedicineStore {
    #[instrument(skip(self), err)]
    async fn find_by_id(&self, id: MedicineId) -> Result<Option<Medicine>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, quantity, price
            FROM medicines
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_id", e))?;

        match row {
            Some(row) => {
                let medicine = MedicineRow::from_row(&row)
                    .map_err(|e| StoreError::Storage(format!("failed to decode medicine row: {e}")))?;
                Ok(Some(medicine.into()))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self), err)]
    async fn find_all(&self) -> Result<Vec<Medicine>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, quantity, price
            FROM medicines
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_all", e))?;

        decode_rows(rows)
    }

    #[instrument(skip(self), err)]
    async fn find_by_name_containing(&self, fragment: &str) -> Result<Vec<Medicine>, StoreError> {
        let pattern = format!("%{}%", escape_like(fragment));

        let rows = sqlx::query(
            r#"
            SELECT id, name, quantity, price
            FROM medicines
            WHERE name ILIKE $1
            ORDER BY id ASC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_name_containing", e))?;

        decode_rows(rows)
    }

    #[instrument(skip(self, medicine), fields(id = %medicine.id), err)]
    async fn insert(&self, medicine: Medicine) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO medicines (id, name, quantity, price)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(medicine.id.as_i64())
        .bind(&medicine.name)
        .bind(medicine.quantity)
        .bind(medicine.price)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(StoreError::Duplicate(medicine.id)),
            Err(e) => Err(map_sqlx_error("insert", e)),
        }
    }

    #[instrument(skip(self), err)]
    async fn update_quantity(&self, id: MedicineId, quantity: i64) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE medicines
            SET quantity = $2
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .bind(quantity)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_quantity", e))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: MedicineId) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM medicines
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("delete", e))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Intermediate row representation for decoding.
struct MedicineRow {
    id: i64,
    name: String,
    quantity: i64,
    price: f64,
}

impl MedicineRow {
    fn from_row(row: &sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            quantity: row.try_get("quantity")?,
            price: row.try_get("price")?,
        })
    }
}

impl From<MedicineRow> for Medicine {
    fn from(row: MedicineRow) -> Self {
        Medicine::new(row.id, row.name, row.quantity, row.price)
    }
}

fn decode_rows(rows: Vec<sqlx::postgres::PgRow>) -> Result<Vec<Medicine>, StoreError> {
    let mut medicines = Vec::with_capacity(rows.len());
    for row in rows {
        let medicine = MedicineRow::from_row(&row)
            .map_err(|e| StoreError::Storage(format!("failed to decode medicine row: {e}")))?;
        medicines.push(medicine.into());
    }
    Ok(medicines)
}

/// Escape LIKE/ILIKE metacharacters so the fragment matches literally.
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Check if an error is a unique constraint violation.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            StoreError::Storage(format!("database error in {}: {}", operation, db_err.message()))
        }
        sqlx::Error::PoolClosed => {
            StoreError::Storage(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::RowNotFound => {
            // Should not happen for our queries (we use fetch_optional/fetch_all).
            StoreError::Storage(format!("unexpected row not found in {operation}"))
        }
        _ => StoreError::Storage(format!("sqlx error in {operation}: {err}")),
    }
}
