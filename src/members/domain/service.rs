use async_trait::async_trait;
use crate::core::lending::LendingResult;
use crate::members::domain::model::{MemberEntity, MembershipTierEntity};
use crate::members::domain::{MemberService, MembershipPolicy};
use crate::members::repository::{MemberRepository, TierRepository};

pub(crate) struct MemberServiceImpl {
    member_repository: Box<dyn MemberRepository>,
    tier_repository: Box<dyn TierRepository>,
}

impl MemberServiceImpl {
    pub(crate) fn new(member_repository: Box<dyn MemberRepository>,
                      tier_repository: Box<dyn TierRepository>) -> Self {
        Self {
            member_repository,
            tier_repository,
        }
    }
}

#[async_trait]
impl MemberService for MemberServiceImpl {
    async fn add_tier(&self, tier: &MembershipTierEntity) -> LendingResult<MembershipTierEntity> {
        self.tier_repository.create(tier).await?;
        Ok(tier.clone())
    }

    async fn add_member(&self, member: &MemberEntity) -> LendingResult<MemberEntity> {
        self.member_repository.create(member).await?;
        Ok(member.clone())
    }

    async fn find_member_by_id(&self, id: &str) -> LendingResult<MemberEntity> {
        self.member_repository.get(id).await
    }

    async fn policy_for(&self, member_id: &str) -> LendingResult<MembershipPolicy> {
        let member = self.member_repository.get(member_id).await?;
        match member.tier_id {
            Some(tier_id) => {
                let tier = self.tier_repository.get(tier_id.as_str()).await?;
                Ok(MembershipPolicy::from(&tier))
            }
            None => Ok(MembershipPolicy::default()),
        }
    }
}
