//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.

pub mod company;
pub mod company_name;
pub mod group;
pub mod translation;
pub mod user;
pub mod website_settings;

pub use company::CompanyRepository;
pub use company_name::CompanyNameRepository;
pub use group::GroupRepository;
pub use translation::TranslationRepository;
pub use user::UserRepository;
pub use website_settings::WebsiteSettingsRepository;

use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: API 统一使用 "table:id" 字符串
// =============================================================================
//
//   - 路径参数既可以是 "company:abc" 也可以是 "abc"
//   - 查询/删除前统一转换为 RecordId: record_id(TABLE, id)
//   - 外键 (company.group_id) 以 "company_group:xxx" 字符串存储

/// Build a RecordId from `"table:key"` or a bare `"key"`
pub fn record_id(table: &str, id: &str) -> RecordId {
    let key = id
        .strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id);
    RecordId::from_table_key(table, key)
}

/// Canonical `"table:key"` string for an id in either form
pub fn record_key(table: &str, id: &str) -> String {
    record_id(table, id).to_string()
}

/// Row shape of `SELECT count() AS total ... GROUP ALL`
#[derive(Debug, Deserialize)]
pub(crate) struct CountRow {
    pub total: u64,
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
