//! Website Settings Model (Singleton)
//!
//! 站点开放/关闭开关、自动排期与报名后提示语，全局只有一条记录

use serde::{Deserialize, Serialize};

use crate::serde_helpers;

/// Website settings entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteSettings {
    /// 手动开关 (auto_schedule 关闭时生效)
    #[serde(default)]
    pub is_open: bool,
    /// 是否按 open_time / close_time 自动开关
    #[serde(default)]
    pub auto_schedule: bool,
    /// 开放时间 "HH:MM"
    #[serde(default)]
    pub open_time: String,
    /// 关闭时间 "HH:MM"
    #[serde(default)]
    pub close_time: String,
    /// 是否启用报名码自动填充
    #[serde(default = "default_codes_active")]
    pub codes_active: bool,
    /// 首页提示语
    #[serde(default)]
    pub message: String,
    /// 报名成功后的提示语
    #[serde(default)]
    pub post_registration_message: String,
    /// 更新时间 (Unix millis)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

fn default_codes_active() -> bool {
    true
}

impl Default for WebsiteSettings {
    fn default() -> Self {
        Self {
            is_open: false,
            auto_schedule: false,
            open_time: String::new(),
            close_time: String::new(),
            codes_active: default_codes_active(),
            message: String::new(),
            post_registration_message: String::new(),
            updated_at: None,
        }
    }
}

impl WebsiteSettings {
    /// Merge a partial update over the current settings
    pub fn apply(&mut self, update: WebsiteSettingsUpdate) {
        if let Some(v) = update.is_open {
            self.is_open = v;
        }
        if let Some(v) = update.auto_schedule {
            self.auto_schedule = v;
        }
        if let Some(v) = update.open_time {
            self.open_time = v.trim().to_string();
        }
        if let Some(v) = update.close_time {
            self.close_time = v.trim().to_string();
        }
        if let Some(v) = update.codes_active {
            self.codes_active = v;
        }
        if let Some(v) = update.message {
            self.message = v;
        }
        if let Some(v) = update.post_registration_message {
            self.post_registration_message = v;
        }
    }
}

/// Update website settings payload
///
/// 缺省字段保持原值；布尔值按 truthy 规则强转，字符串 `null` 视为 `""`。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WebsiteSettingsUpdate {
    #[serde(
        default,
        deserialize_with = "serde_helpers::truthy",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_open: Option<bool>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::truthy",
        skip_serializing_if = "Option::is_none"
    )]
    pub auto_schedule: Option<bool>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::string_or_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub open_time: Option<String>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::string_or_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub close_time: Option<String>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::truthy",
        skip_serializing_if = "Option::is_none"
    )]
    pub codes_active: Option<bool>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::string_or_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::string_or_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub post_registration_message: Option<String>,
}
