//! Company Repository

use std::collections::HashMap;

use super::{BaseRepository, CountRow, RepoError, RepoResult, record_id};
use serde::Deserialize;
use shared::models::Company;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const TABLE: &str = "company";

#[derive(Debug, Deserialize)]
struct GroupCountRow {
    #[serde(default)]
    group_id: Option<String>,
    total: u64,
}

#[derive(Clone)]
pub struct CompanyRepository {
    base: BaseRepository,
}

impl CompanyRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All companies in registration order
    pub async fn find_all(&self) -> RepoResult<Vec<Company>> {
        let companies: Vec<Company> = self
            .base
            .db()
            .query("SELECT * FROM company ORDER BY created_at")
            .await?
            .take(0)?;
        Ok(companies)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Company>> {
        let company: Option<Company> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(company)
    }

    /// Companies registered in one group
    pub async fn find_by_group(&self, group_id: &str) -> RepoResult<Vec<Company>> {
        let companies: Vec<Company> = self
            .base
            .db()
            .query("SELECT * FROM company WHERE group_id = $group_id ORDER BY created_at")
            .bind(("group_id", group_id.to_string()))
            .await?
            .take(0)?;
        Ok(companies)
    }

    /// Live registrant count of one group
    pub async fn count_by_group(&self, group_id: &str) -> RepoResult<u64> {
        let rows: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() AS total FROM company WHERE group_id = $group_id GROUP ALL")
            .bind(("group_id", group_id.to_string()))
            .await?
            .take(0)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }

    /// Live registrant counts keyed by group id
    pub async fn counts_by_group(&self) -> RepoResult<HashMap<String, u64>> {
        let rows: Vec<GroupCountRow> = self
            .base
            .db()
            .query("SELECT group_id, count() AS total FROM company GROUP BY group_id")
            .await?
            .take(0)?;
        Ok(rows
            .into_iter()
            .filter_map(|r| r.group_id.map(|g| (g, r.total)))
            .collect())
    }

    pub async fn create(&self, company: Company) -> RepoResult<Company> {
        let created: Option<Company> = self.base.db().create(TABLE).content(company).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create company".into()))
    }

    /// Replace the stored document (id is kept)
    pub async fn replace(&self, id: &str, mut company: Company) -> RepoResult<Company> {
        company.id = None;
        let updated: Option<Company> = self
            .base
            .db()
            .update(record_id(TABLE, id))
            .content(company)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Company {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<Company> = self.base.db().delete(record_id(TABLE, id)).await?;
        Ok(deleted.is_some())
    }

    /// Delete several companies, returns how many existed
    pub async fn delete_many(&self, ids: &[String]) -> RepoResult<usize> {
        let mut deleted = 0;
        for id in ids {
            if self.delete(id).await? {
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}
