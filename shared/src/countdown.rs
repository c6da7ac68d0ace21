//! Edge-triggered countdown expiry
//!
//! 倒计时归零时只触发一次；剩余时间重新大于 5 秒后才会再次触发，
//! 避免在切换边界反复回调。

/// Slack required before the trigger re-arms
pub const REARM_THRESHOLD_SECS: i64 = 5;

#[derive(Debug, Clone)]
pub struct CountdownTrigger {
    armed: bool,
}

impl Default for CountdownTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownTrigger {
    pub fn new() -> Self {
        Self { armed: true }
    }

    /// Feed the latest remaining seconds, `true` exactly once per expiry
    pub fn observe(&mut self, remaining_seconds: i64) -> bool {
        if remaining_seconds <= 0 {
            if self.armed {
                self.armed = false;
                return true;
            }
            return false;
        }
        if remaining_seconds > REARM_THRESHOLD_SECS {
            self.armed = true;
        }
        false
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}
