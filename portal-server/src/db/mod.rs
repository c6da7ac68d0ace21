//! Database Module
//!
//! Embedded SurrealDB: RocksDB on disk, in-memory engine for tests

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "portal";
const DATABASE: &str = "portal";

/// 索引定义 (幂等，每次启动执行)
const SCHEMA: &str = r#"
DEFINE INDEX IF NOT EXISTS company_group_idx ON TABLE company FIELDS group_id;
DEFINE INDEX IF NOT EXISTS company_created_idx ON TABLE company FIELDS created_at;
DEFINE INDEX IF NOT EXISTS company_group_date_idx ON TABLE company_group FIELDS date;
DEFINE INDEX IF NOT EXISTS company_name_code_idx ON TABLE company_name FIELDS code UNIQUE;
DEFINE INDEX IF NOT EXISTS user_username_idx ON TABLE user FIELDS username UNIQUE;
"#;

/// Database service, owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at `db_path`
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        tracing::info!("Database opened at {}", db_path);
        Self::prepare(db).await
    }

    /// In-memory database (tests)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::prepare(db).await
    }

    async fn prepare(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        db.query(SCHEMA)
            .await
            .and_then(|r| r.check())
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;
        tracing::info!("Database schema applied");

        Ok(Self { db })
    }
}
