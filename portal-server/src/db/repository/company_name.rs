//! Company Name Directory Repository

use super::{BaseRepository, RepoError, RepoResult, record_id};
use shared::models::{CompanyName, CompanyNameCreate, ImportSummary, normalize_code};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const TABLE: &str = "company_name";

#[derive(Clone)]
pub struct CompanyNameRepository {
    base: BaseRepository,
}

impl CompanyNameRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<CompanyName>> {
        let names: Vec<CompanyName> = self
            .base
            .db()
            .query("SELECT * FROM company_name ORDER BY name")
            .await?
            .take(0)?;
        Ok(names)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<CompanyName>> {
        let name: Option<CompanyName> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(name)
    }

    /// Lookup by registration code (case-insensitive)
    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<CompanyName>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM company_name WHERE code = $code LIMIT 1")
            .bind(("code", normalize_code(code)))
            .await?;
        let names: Vec<CompanyName> = result.take(0)?;
        Ok(names.into_iter().next())
    }

    pub async fn create(&self, data: CompanyNameCreate) -> RepoResult<CompanyName> {
        let code = normalize_code(&data.code);
        if self.find_by_code(&code).await?.is_some() {
            return Err(RepoError::Duplicate(format!("Code '{}' already exists", code)));
        }

        let entry = CompanyName {
            id: None,
            name: data.name.trim().to_string(),
            code,
            contact_name: data.contact_name.trim().to_string(),
            mobile_number: data.mobile_number.trim().to_string(),
            created_at: shared::util::now_millis(),
        };
        let created: Option<CompanyName> = self.base.db().create(TABLE).content(entry).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create company name".into()))
    }

    /// Replace the stored document; the code must stay unique
    pub async fn replace(&self, id: &str, mut entry: CompanyName) -> RepoResult<CompanyName> {
        entry.code = normalize_code(&entry.code);
        if let Some(other) = self.find_by_code(&entry.code).await?
            && other.id.as_deref() != Some(super::record_key(TABLE, id).as_str())
        {
            return Err(RepoError::Duplicate(format!(
                "Code '{}' already exists",
                entry.code
            )));
        }

        entry.id = None;
        let updated: Option<CompanyName> = self
            .base
            .db()
            .update(record_id(TABLE, id))
            .content(entry)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Company name {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<CompanyName> = self.base.db().delete(record_id(TABLE, id)).await?;
        Ok(deleted.is_some())
    }

    pub async fn delete_all(&self) -> RepoResult<()> {
        self.base.db().query("DELETE company_name").await?.check()?;
        Ok(())
    }

    /// Bulk import, upsert by code
    ///
    /// 缺少名称或报名码的行计入 skipped；同一批次中重复的报名码以最后一行为准。
    pub async fn import(
        &self,
        rows: Vec<CompanyNameCreate>,
        replace: bool,
    ) -> RepoResult<ImportSummary> {
        if replace {
            self.delete_all().await?;
        }

        let mut summary = ImportSummary::default();
        for row in rows {
            if row.name.trim().is_empty() || row.code.trim().is_empty() {
                summary.skipped += 1;
                continue;
            }

            match self.find_by_code(&row.code).await? {
                Some(existing) => {
                    let id = existing.id.clone().unwrap_or_default();
                    let entry = CompanyName {
                        name: row.name.trim().to_string(),
                        contact_name: row.contact_name.trim().to_string(),
                        mobile_number: row.mobile_number.trim().to_string(),
                        ..existing
                    };
                    self.replace(&id, entry).await?;
                    summary.updated += 1;
                }
                None => {
                    self.create(row).await?;
                    summary.inserted += 1;
                }
            }
        }

        tracing::info!(
            inserted = summary.inserted,
            updated = summary.updated,
            skipped = summary.skipped,
            replace,
            "Company names imported"
        );
        Ok(summary)
    }
}
