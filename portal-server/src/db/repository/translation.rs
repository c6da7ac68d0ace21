//! Translation Repository
//!
//! 记录 ID 即语言代码: translation:en, translation:ar

use std::collections::BTreeMap;

use super::{BaseRepository, RepoError, RepoResult};
use shared::models::Translation;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "translation";

#[derive(Clone)]
pub struct TranslationRepository {
    base: BaseRepository,
}

impl TranslationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Translation>> {
        let translations: Vec<Translation> = self
            .base
            .db()
            .query("SELECT * FROM translation ORDER BY lang")
            .await?
            .take(0)?;
        Ok(translations)
    }

    pub async fn find_by_lang(&self, lang: &str) -> RepoResult<Option<Translation>> {
        let translation: Option<Translation> = self.base.db().select((TABLE, lang)).await?;
        Ok(translation)
    }

    /// Merge entries into a language, creating it when missing
    pub async fn merge_entries(
        &self,
        lang: &str,
        entries: BTreeMap<String, String>,
    ) -> RepoResult<Translation> {
        let now = shared::util::now_millis();
        match self.find_by_lang(lang).await? {
            Some(mut existing) => {
                existing.entries.extend(entries);
                existing.updated_at = now;
                existing.id = None;
                let updated: Option<Translation> = self
                    .base
                    .db()
                    .update((TABLE, lang))
                    .content(existing)
                    .await?;
                updated.ok_or_else(|| {
                    RepoError::Database(format!("Failed to update translation {}", lang))
                })
            }
            None => self.create(lang, entries).await,
        }
    }

    pub async fn create(
        &self,
        lang: &str,
        entries: BTreeMap<String, String>,
    ) -> RepoResult<Translation> {
        let translation = Translation {
            id: None,
            lang: lang.to_string(),
            entries,
            updated_at: shared::util::now_millis(),
        };
        let created: Option<Translation> = self
            .base
            .db()
            .create((TABLE, lang))
            .content(translation)
            .await?;
        created.ok_or_else(|| RepoError::Database(format!("Failed to create translation {}", lang)))
    }
}
