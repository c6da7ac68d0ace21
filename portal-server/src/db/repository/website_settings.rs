//! Website Settings Repository (Singleton)

use super::{BaseRepository, RepoError, RepoResult};
use shared::models::{WebsiteSettings, WebsiteSettingsUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "website_settings";
const SINGLETON_ID: &str = "main";
const CREATE_ATTEMPTS: usize = 5;

#[derive(Clone)]
pub struct WebsiteSettingsRepository {
    base: BaseRepository,
}

impl WebsiteSettingsRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Get or create the singleton settings
    ///
    /// 并发首次读取时 create 可能失败 (记录已存在 / 事务冲突)，此时重新读取。
    pub async fn get_or_create(&self) -> RepoResult<WebsiteSettings> {
        for _ in 0..CREATE_ATTEMPTS {
            if let Some(settings) = self.get().await? {
                return Ok(settings);
            }

            let created: Result<Option<WebsiteSettings>, surrealdb::Error> = self
                .base
                .db()
                .create((TABLE, SINGLETON_ID))
                .content(WebsiteSettings::default())
                .await;
            match created {
                Ok(Some(settings)) => return Ok(settings),
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!(error = %e, "Website settings created concurrently, re-reading")
                }
            }
        }

        self.get()
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create website settings".into()))
    }

    /// Get the singleton settings
    pub async fn get(&self) -> RepoResult<Option<WebsiteSettings>> {
        let settings: Option<WebsiteSettings> =
            self.base.db().select((TABLE, SINGLETON_ID)).await?;
        Ok(settings)
    }

    /// Merge provided fields over the stored document and write it back
    pub async fn update(&self, data: WebsiteSettingsUpdate) -> RepoResult<WebsiteSettings> {
        let mut settings = self.get_or_create().await?;
        settings.apply(data);
        settings.updated_at = Some(shared::util::now_millis());

        let updated: Option<WebsiteSettings> = self
            .base
            .db()
            .update((TABLE, SINGLETON_ID))
            .content(settings)
            .await?;
        updated.ok_or_else(|| RepoError::Database("Failed to update website settings".into()))
    }
}
