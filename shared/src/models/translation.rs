//! Translation Model
//!
//! 每种语言一条记录，entries 为 key → 文案

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::serde_helpers;

/// Translation resource for one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    #[serde(
        default,
        deserialize_with = "serde_helpers::record_key::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// 语言代码 ("en", "ar")
    pub lang: String,
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
    #[serde(default)]
    pub updated_at: i64,
}

/// Merge entries into a language
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TranslationUpdate {
    pub entries: BTreeMap<String, String>,
}

/// Seed result
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SeedResult {
    /// 本次新写入的语言
    pub seeded: Vec<String>,
}
