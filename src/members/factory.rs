use crate::core::repository::ddb_repository::DdbRepository;
use crate::core::repository::memory_repository::MemoryRepository;
use crate::core::repository::RepositoryStore;
use crate::members::domain::service::MemberServiceImpl;
use crate::members::domain::MemberService;
use crate::members::repository::{MemberRepository, TierRepository};
use crate::utils::ddb::{build_db_client, create_table};

pub(crate) async fn create_member_repository(store: RepositoryStore) -> Box<dyn MemberRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DdbRepository::new(client, "members", "members_ndx", "member_id", "email"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "members", "member_id", "email", "full_name").await;
            Box::new(DdbRepository::new(client, "members", "members_ndx", "member_id", "email"))
        }
        RepositoryStore::Memory => {
            Box::new(MemoryRepository::new("members"))
        }
    }
}

pub(crate) async fn create_tier_repository(store: RepositoryStore) -> Box<dyn TierRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DdbRepository::new(client, "tiers", "tiers_ndx", "tier_id", "name"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "tiers", "tier_id", "name", "created_at").await;
            Box::new(DdbRepository::new(client, "tiers", "tiers_ndx", "tier_id", "name"))
        }
        RepositoryStore::Memory => {
            Box::new(MemoryRepository::new("tiers"))
        }
    }
}

pub(crate) async fn create_member_service(store: RepositoryStore) -> Box<dyn MemberService> {
    let member_repo = create_member_repository(store).await;
    let tier_repo = create_tier_repository(store).await;
    Box::new(MemberServiceImpl::new(member_repo, tier_repo))
}
