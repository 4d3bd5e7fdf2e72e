use crate::core::repository::ddb_repository::DdbRepository;
use crate::core::repository::memory_repository::MemoryRepository;
use crate::core::repository::Repository;
use crate::members::domain::model::{MemberEntity, MembershipTierEntity};

pub(crate) trait MemberRepository : Repository<MemberEntity> {}

impl MemberRepository for DdbRepository<MemberEntity> {}

impl MemberRepository for MemoryRepository<MemberEntity> {}

pub(crate) trait TierRepository : Repository<MembershipTierEntity> {}

impl TierRepository for DdbRepository<MembershipTierEntity> {}

impl TierRepository for MemoryRepository<MembershipTierEntity> {}
