//! Translation API Handlers

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::TranslationRepository;
use crate::utils::validation::MAX_NOTE_LEN;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::event::EventKind;
use shared::models::{SeedResult, Translation, TranslationUpdate};

/// 内置默认文案 (en, ar)
const DEFAULT_TRANSLATIONS: &str = include_str!("../../../resources/translations.json");

/// 语言代码: 2-10 位小写字母或 '-'
fn validate_lang(lang: &str) -> AppResult<String> {
    let lang = lang.trim().to_lowercase();
    let valid = (2..=10).contains(&lang.len())
        && lang.chars().all(|c| c.is_ascii_lowercase() || c == '-');
    if !valid {
        return Err(AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("Invalid language code: {}", lang),
        )
        .with_detail("field", "lang"));
    }
    Ok(lang)
}

/// Bundled default resources keyed by language
pub fn default_translations() -> AppResult<BTreeMap<String, BTreeMap<String, String>>> {
    serde_json::from_str(DEFAULT_TRANSLATIONS)
        .map_err(|e| AppError::internal(format!("Bundled translations are invalid: {}", e)))
}

/// GET /api/translations - 全部语言
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Translation>>> {
    let translations = TranslationRepository::new(state.get_db()).find_all().await?;
    Ok(Json(translations))
}

/// GET /api/translations/:lang
pub async fn get_by_lang(
    State(state): State<ServerState>,
    Path(lang): Path<String>,
) -> AppResult<Json<Translation>> {
    let lang = validate_lang(&lang)?;
    let translation = TranslationRepository::new(state.get_db())
        .find_by_lang(&lang)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TranslationNotFound).with_detail("lang", lang))?;
    Ok(Json(translation))
}

/// PUT /api/translations/:lang - 合并文案 (语言不存在时创建)
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(lang): Path<String>,
    Json(payload): Json<TranslationUpdate>,
) -> AppResult<Json<Translation>> {
    let lang = validate_lang(&lang)?;
    if let Some((key, _)) = payload
        .entries
        .iter()
        .find(|(k, v)| k.trim().is_empty() || v.chars().count() > MAX_NOTE_LEN)
    {
        return Err(AppError::validation(format!("Invalid translation entry '{}'", key))
            .with_detail("key", key.clone()));
    }

    let keys = payload.entries.len();
    let translation = TranslationRepository::new(state.get_db())
        .merge_entries(&lang, payload.entries)
        .await?;

    tracing::info!(operator = %current_user.username, lang = %lang, keys, "Translations updated");
    state.notify(EventKind::TranslationsChanged);
    Ok(Json(translation))
}

/// POST /api/translations/seed - 写入尚不存在的内置语言
pub async fn seed(State(state): State<ServerState>) -> AppResult<Json<SeedResult>> {
    let repo = TranslationRepository::new(state.get_db());
    let mut seeded = Vec::new();

    for (lang, entries) in default_translations()? {
        if repo.find_by_lang(&lang).await?.is_some() {
            continue;
        }
        repo.create(&lang, entries).await?;
        seeded.push(lang);
    }

    if !seeded.is_empty() {
        tracing::info!(languages = ?seeded, "Default translations seeded");
        state.notify(EventKind::TranslationsChanged);
    }
    Ok(Json(SeedResult { seeded }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_translations_cover_the_same_keys() {
        let defaults = default_translations().unwrap();
        let en = &defaults["en"];
        let ar = &defaults["ar"];
        assert!(!en.is_empty());
        assert_eq!(
            en.keys().collect::<Vec<_>>(),
            ar.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn lang_codes_are_normalised() {
        assert_eq!(validate_lang(" EN ").unwrap(), "en");
        assert_eq!(validate_lang("pt-br").unwrap(), "pt-br");
        assert!(validate_lang("e").is_err());
        assert!(validate_lang("en_US").is_err());
        assert!(validate_lang("../etc").is_err());
    }
}
