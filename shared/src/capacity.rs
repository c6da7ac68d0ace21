//! Group capacity check
//!
//! 名额 = max_companies - 已报名数；max_companies 为 0 表示不限。
//! 已报名数总是从 company 表实时统计，这里只做纯计算。

use crate::error::{AppError, AppResult};

/// Occupancy of one group at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub max_companies: u32,
    pub registered: u64,
}

impl Capacity {
    pub fn new(max_companies: u32, registered: u64) -> Self {
        Self {
            max_companies,
            registered,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        self.max_companies == 0
    }

    /// Remaining slots, `None` when the group is unlimited
    pub fn remaining(&self) -> Option<u64> {
        if self.is_unlimited() {
            None
        } else {
            Some(u64::from(self.max_companies).saturating_sub(self.registered))
        }
    }

    pub fn is_full(&self) -> bool {
        !self.is_unlimited() && self.registered >= u64::from(self.max_companies)
    }

    /// Reject one more registrant when full
    pub fn ensure_slot(&self, group_id: &str) -> AppResult<()> {
        if self.is_full() {
            return Err(AppError::group_full(group_id, self.max_companies));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn unlimited_group_is_never_full() {
        for registered in [0, 1, 10_000, u64::MAX] {
            let cap = Capacity::new(0, registered);
            assert!(!cap.is_full());
            assert_eq!(cap.remaining(), None);
            assert!(cap.ensure_slot("company_group:a").is_ok());
        }
    }

    #[test]
    fn remaining_counts_down_to_zero() {
        assert_eq!(Capacity::new(3, 0).remaining(), Some(3));
        assert_eq!(Capacity::new(3, 2).remaining(), Some(1));
        assert_eq!(Capacity::new(3, 3).remaining(), Some(0));
    }

    #[test]
    fn overfilled_group_clamps_remaining() {
        // max_companies 被调低后可能出现超额
        let cap = Capacity::new(2, 5);
        assert_eq!(cap.remaining(), Some(0));
        assert!(cap.is_full());
    }

    #[test]
    fn third_company_in_group_of_two_is_rejected() {
        let cap = Capacity::new(2, 2);
        assert!(cap.is_full());
        let err = cap.ensure_slot("company_group:a").unwrap_err();
        assert_eq!(err.code, ErrorCode::GroupFull);

        assert!(Capacity::new(2, 1).ensure_slot("company_group:a").is_ok());
    }
}
