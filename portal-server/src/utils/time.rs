//! 时间工具函数 (业务时区)
//!
//! 报名窗口与分组日期都按配置的业务时区 (PORTAL_TIMEZONE) 计算，
//! 数据库中的时间戳统一为 UTC Unix millis。

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// 业务时区的当前本地时间
pub fn business_now(tz: Tz) -> NaiveDateTime {
    chrono::Utc::now().with_timezone(&tz).naive_local()
}

/// 业务时区的今天
pub fn business_today(tz: Tz) -> NaiveDate {
    business_now(tz).date()
}

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 解析时段时间 (HH:MM)
pub fn parse_slot_time(time: &str) -> AppResult<NaiveTime> {
    shared::gate::parse_time(time)
        .ok_or_else(|| AppError::validation(format!("Invalid time format: {}", time)))
}

/// 日期格式化为 YYYY-MM-DD
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
