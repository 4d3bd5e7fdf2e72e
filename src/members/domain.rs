pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::core::lending::LendingResult;
use crate::members::domain::model::{MemberEntity, MembershipTierEntity};

// MembershipPolicy is the set of quantitative limits applied per member
// class. It is resolved at operation time; later tier changes affect future
// operations only, never an open loan.
#[derive(Debug, PartialEq, Clone, Copy)]
pub(crate) struct MembershipPolicy {
    pub max_concurrent_loans: i64,
    pub loan_duration_days: i64,
    pub max_renewals: i64,
}

impl Default for MembershipPolicy {
    // fallback for members without a tier: nothing may be issued, renewals
    // keep the historical 14-day/single-renewal allowance
    fn default() -> Self {
        Self {
            max_concurrent_loans: 0,
            loan_duration_days: 14,
            max_renewals: 1,
        }
    }
}

impl From<&MembershipTierEntity> for MembershipPolicy {
    fn from(tier: &MembershipTierEntity) -> Self {
        Self {
            max_concurrent_loans: tier.max_concurrent_loans,
            loan_duration_days: tier.loan_duration_days,
            max_renewals: tier.max_renewals,
        }
    }
}

#[async_trait]
pub(crate) trait MemberService: Sync + Send {
    async fn add_tier(&self, tier: &MembershipTierEntity) -> LendingResult<MembershipTierEntity>;
    async fn add_member(&self, member: &MemberEntity) -> LendingResult<MemberEntity>;
    async fn find_member_by_id(&self, id: &str) -> LendingResult<MemberEntity>;
    async fn policy_for(&self, member_id: &str) -> LendingResult<MembershipPolicy>;
}
