//! Group Repository
//!
//! 表名使用 company_group (GROUP 为 SurrealQL 关键字)

use super::{BaseRepository, RepoError, RepoResult, record_id};
use shared::models::Group;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const TABLE: &str = "company_group";

#[derive(Clone)]
pub struct GroupRepository {
    base: BaseRepository,
}

impl GroupRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All groups ordered by date then start time
    pub async fn find_all(&self) -> RepoResult<Vec<Group>> {
        let groups: Vec<Group> = self
            .base
            .db()
            .query("SELECT * FROM company_group ORDER BY date, time_from")
            .await?
            .take(0)?;
        Ok(groups)
    }

    /// Groups dated on or after `date` ("YYYY-MM-DD" 字符串比较即日期比较)
    pub async fn find_from_date(&self, date: &str) -> RepoResult<Vec<Group>> {
        let groups: Vec<Group> = self
            .base
            .db()
            .query("SELECT * FROM company_group WHERE date >= $date ORDER BY date, time_from")
            .bind(("date", date.to_string()))
            .await?
            .take(0)?;
        Ok(groups)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Group>> {
        let group: Option<Group> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(group)
    }

    pub async fn create(&self, group: Group) -> RepoResult<Group> {
        let created: Option<Group> = self.base.db().create(TABLE).content(group).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create group".into()))
    }

    /// Replace the stored document (id is kept)
    pub async fn replace(&self, id: &str, mut group: Group) -> RepoResult<Group> {
        group.id = None;
        let updated: Option<Group> = self
            .base
            .db()
            .update(record_id(TABLE, id))
            .content(group)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Group {} not found", id)))
    }

    /// Hard delete; companies keep their dangling group_id
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<Group> = self.base.db().delete(record_id(TABLE, id)).await?;
        Ok(deleted.is_some())
    }
}
