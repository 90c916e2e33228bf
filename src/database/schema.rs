// Table bootstrap for the vendor/parts schema.
//
// Statements run in foreign-key dependency order. They are plain CREATE TABLE,
// so running the bootstrap against an existing schema fails with
// "relation already exists" and the whole transaction is rolled back.

use sqlx::Connection;
use tracing::{error, info};

use super::manager::{DatabaseError, DatabaseManager};

pub const CREATE_VENDORS: &str = r#"
    CREATE TABLE vendors (
        vendor_id SERIAL PRIMARY KEY,
        vendor_name VARCHAR(255) NOT NULL
    )
"#;

pub const CREATE_PARTS: &str = r#"
    CREATE TABLE parts (
        part_id SERIAL PRIMARY KEY,
        part_name VARCHAR(255) NOT NULL
    )
"#;

pub const CREATE_PART_DRAWINGS: &str = r#"
    CREATE TABLE part_drawings (
        part_id INTEGER PRIMARY KEY,
        file_extension VARCHAR(5) NOT NULL,
        drawing_data BYTEA NOT NULL,
        FOREIGN KEY (part_id)
            REFERENCES parts (part_id)
            ON UPDATE CASCADE ON DELETE CASCADE
    )
"#;

pub const CREATE_VENDOR_PARTS: &str = r#"
    CREATE TABLE vendor_parts (
        vendor_id INTEGER NOT NULL,
        part_id INTEGER NOT NULL,
        PRIMARY KEY (vendor_id, part_id),
        FOREIGN KEY (vendor_id)
            REFERENCES vendors (vendor_id)
            ON UPDATE CASCADE ON DELETE CASCADE,
        FOREIGN KEY (part_id)
            REFERENCES parts (part_id)
            ON UPDATE CASCADE ON DELETE CASCADE
    )
"#;

/// (table, DDL) in creation order
pub const TABLES: [(&str, &str); 4] = [
    ("vendors", CREATE_VENDORS),
    ("parts", CREATE_PARTS),
    ("part_drawings", CREATE_PART_DRAWINGS),
    ("vendor_parts", CREATE_VENDOR_PARTS),
];

impl DatabaseManager {
    /// Create all four tables in one transaction.
    pub async fn create_tables(&self) -> Result<(), DatabaseError> {
        let mut conn = self.connect().await?;

        let result = async {
            let mut tx = conn.begin().await?;
            for (table, ddl) in TABLES {
                sqlx::query(ddl).execute(&mut *tx).await.map_err(|e| {
                    error!(statement = table, "create table failed: {}", e);
                    e
                })?;
            }
            tx.commit().await?;
            Ok::<_, sqlx::Error>(())
        }
        .await;

        Self::close(conn).await;

        match result {
            Ok(()) => {
                info!(tables = TABLES.len(), "schema bootstrap complete");
                Ok(())
            }
            Err(e) => {
                error!("schema bootstrap failed: {}", e);
                Err(e.into())
            }
        }
    }
}
