//! Group Model
//!
//! 分组 = 管理员定义的办理时段 (日期 + 起止时间 + 容量)

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::capacity::Capacity;
use crate::serde_helpers;

/// Group entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(
        default,
        deserialize_with = "serde_helpers::record_key::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub name: String,
    /// 日期 "YYYY-MM-DD"
    pub date: String,
    /// 开始时间 "HH:MM"
    pub time_from: String,
    /// 结束时间 "HH:MM"
    pub time_to: String,
    /// 星期 (由 date 推导)
    #[serde(default)]
    pub day: String,
    /// 最大公司数 (0 = 不限)
    #[serde(default)]
    pub max_companies: u32,
    #[serde(default)]
    pub created_at: i64,
}

impl Group {
    /// Parsed calendar date, `None` when malformed
    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// English weekday name for a date ("Monday", ...)
pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Create group payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupCreate {
    pub name: String,
    pub date: String,
    pub time_from: String,
    pub time_to: String,
    #[serde(default)]
    pub max_companies: Option<u32>,
}

/// Update group payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GroupUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_companies: Option<u32>,
}

/// Group with live occupancy
///
/// `registered_count` 每次都从 company 表实时统计，不做冗余存储。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupView {
    #[serde(flatten)]
    pub group: Group,
    pub registered_count: u64,
    /// 剩余名额 (`None` = 不限)
    pub remaining: Option<u64>,
    pub is_full: bool,
}

impl GroupView {
    pub fn new(group: Group, registered_count: u64) -> Self {
        let capacity = Capacity::new(group.max_companies, registered_count);
        Self {
            group,
            registered_count,
            remaining: capacity.remaining(),
            is_full: capacity.is_full(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(max: u32) -> Group {
        Group {
            id: Some("company_group:a".into()),
            name: "Morning".into(),
            date: "2026-10-19".into(),
            time_from: "09:00".into(),
            time_to: "11:00".into(),
            day: "Monday".into(),
            max_companies: max,
            created_at: 0,
        }
    }

    #[test]
    fn weekday_is_derived_from_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(weekday_name(date), "Friday");
    }

    #[test]
    fn view_reports_remaining_slots() {
        let view = GroupView::new(group(5), 3);
        assert_eq!(view.remaining, Some(2));
        assert!(!view.is_full);
    }

    #[test]
    fn view_of_unlimited_group_is_never_full() {
        let view = GroupView::new(group(0), 1_000);
        assert_eq!(view.remaining, None);
        assert!(!view.is_full);
    }

    #[test]
    fn view_flattens_group_fields() {
        let json = serde_json::to_value(GroupView::new(group(2), 2)).unwrap();
        assert_eq!(json["name"], "Morning");
        assert_eq!(json["registered_count"], 2);
        assert_eq!(json["remaining"], 0);
        assert_eq!(json["is_full"], true);
    }
}
