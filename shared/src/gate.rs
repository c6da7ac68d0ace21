//! Registration gate
//!
//! 根据站点设置与当前时间判断是否允许报名，并计算下一次开关切换的倒计时。
//!
//! 真值表:
//! - `auto_schedule = false` 或时间缺失/格式错误 → 使用手动开关 `is_open`，无倒计时
//! - 同日窗口 (`open < close`)   → `open <= now < close`
//! - 跨夜窗口 (`close <= open`)  → `now >= open || now < close`
//!
//! 服务端校验与客户端轮询共用此模块。

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::WebsiteSettings;

/// Gate decision at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateStatus {
    /// Effective open state
    pub is_open: bool,
    /// 自动排期是否生效 (设置开启且时间可解析)
    pub schedule_active: bool,
    /// 下一次切换时刻 (业务时区本地时间)
    pub next_transition: Option<NaiveDateTime>,
    /// 距离下一次切换的秒数
    pub remaining_seconds: Option<i64>,
    /// Evaluation time (业务时区本地时间)
    pub server_time: NaiveDateTime,
}

/// Parsed daily schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl Schedule {
    /// Parse `open_time` / `close_time`, `None` when either is absent or malformed
    pub fn parse(open_time: &str, close_time: &str) -> Option<Self> {
        Some(Self {
            open: parse_time(open_time)?,
            close: parse_time(close_time)?,
        })
    }

    pub fn from_settings(settings: &WebsiteSettings) -> Option<Self> {
        if !settings.auto_schedule {
            return None;
        }
        Self::parse(&settings.open_time, &settings.close_time)
    }

    pub fn is_overnight(&self) -> bool {
        self.close <= self.open
    }

    /// Effective open state at a time of day
    pub fn is_open_at(&self, t: NaiveTime) -> bool {
        if self.is_overnight() {
            t >= self.open || t < self.close
        } else {
            self.open <= t && t < self.close
        }
    }
}

/// Parse `HH:MM` or `HH:MM:SS`
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

/// Next occurrence of `target` strictly after `now` (today or tomorrow)
pub fn next_occurrence(now: NaiveDateTime, target: NaiveTime) -> NaiveDateTime {
    let today = now.date().and_time(target);
    if today > now {
        today
    } else {
        today + Duration::days(1)
    }
}

/// Evaluate the gate
pub fn evaluate(settings: &WebsiteSettings, now: NaiveDateTime) -> GateStatus {
    let Some(schedule) = Schedule::from_settings(settings) else {
        return GateStatus {
            is_open: settings.is_open,
            schedule_active: false,
            next_transition: None,
            remaining_seconds: None,
            server_time: now,
        };
    };

    let is_open = schedule.is_open_at(now.time());

    // open == close: 全天开放，不会切换
    let next_transition = if schedule.open == schedule.close {
        None
    } else if is_open {
        Some(next_occurrence(now, schedule.close))
    } else {
        Some(next_occurrence(now, schedule.open))
    };

    GateStatus {
        is_open,
        schedule_active: true,
        next_transition,
        remaining_seconds: next_transition.map(|t| (t - now).num_seconds().max(0)),
        server_time: now,
    }
}
