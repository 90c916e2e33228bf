use serde::{Serialize, Serializer};
use sqlx::Connection;
use tracing::{error, info};

use super::manager::{DatabaseError, DatabaseManager};

const INSERT_VENDOR: &str = "INSERT INTO vendors(vendor_name) VALUES($1)";
const SELECT_VENDORS: &str = "SELECT vendor_id, vendor_name FROM vendors ORDER BY vendor_name";

/// A row of the vendors table. Serializes as `[vendor_id, vendor_name]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vendor {
    pub vendor_id: i32,
    pub vendor_name: String,
}

impl From<(i32, String)> for Vendor {
    fn from((vendor_id, vendor_name): (i32, String)) -> Self {
        Self { vendor_id, vendor_name }
    }
}

impl Serialize for Vendor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.vendor_id, &self.vendor_name).serialize(serializer)
    }
}

/// Vendor reads and writes, one connection per call
pub struct Repository<'a> {
    db: &'a DatabaseManager,
}

impl<'a> Repository<'a> {
    pub fn new(db: &'a DatabaseManager) -> Self {
        Self { db }
    }

    /// Insert one vendor row per name and commit once. Returns the number of
    /// rows inserted.
    pub async fn create_all<S: AsRef<str>>(&self, names: &[S]) -> Result<usize, DatabaseError> {
        let mut conn = self.db.connect().await?;

        let result = async {
            let mut tx = conn.begin().await?;
            for name in names {
                sqlx::query(INSERT_VENDOR)
                    .bind(name.as_ref())
                    .execute(&mut *tx)
                    .await?;
            }
            tx.commit().await?;
            Ok::<_, sqlx::Error>(names.len())
        }
        .await;

        DatabaseManager::close(conn).await;

        match result {
            Ok(count) => {
                info!(count, "inserted vendors");
                Ok(count)
            }
            Err(e) => {
                error!("vendor insert failed: {}", e);
                Err(e.into())
            }
        }
    }

    /// All vendors ordered by name
    pub async fn select_all(&self) -> Result<Vec<Vendor>, DatabaseError> {
        let mut conn = self.db.connect().await?;

        let result = sqlx::query_as::<_, (i32, String)>(SELECT_VENDORS)
            .fetch_all(&mut conn)
            .await;

        DatabaseManager::close(conn).await;

        match result {
            Ok(rows) => {
                info!(count = rows.len(), "selected vendors");
                Ok(rows.into_iter().map(Vendor::from).collect())
            }
            Err(e) => {
                error!("vendor query failed: {}", e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vendor_serializes_as_id_name_pair() {
        let vendor = Vendor::from((7, "Asahi Glass Co Ltd.".to_string()));
        assert_eq!(serde_json::to_value(&vendor).unwrap(), json!([7, "Asahi Glass Co Ltd."]));
    }

    #[test]
    fn vendor_list_serializes_as_nested_arrays() {
        let vendors = vec![
            Vendor::from((1, "AKM Semiconductor Inc.".to_string())),
            Vendor::from((2, "Asahi Glass Co Ltd.".to_string())),
        ];
        assert_eq!(
            serde_json::to_string(&vendors).unwrap(),
            r#"[[1,"AKM Semiconductor Inc."],[2,"Asahi Glass Co Ltd."]]"#
        );
    }

    #[test]
    fn select_orders_by_name() {
        assert!(SELECT_VENDORS.ends_with("ORDER BY vendor_name"));
    }
}
