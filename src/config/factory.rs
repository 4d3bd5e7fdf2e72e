use crate::config::domain::service::ConfigServiceImpl;
use crate::config::domain::ConfigService;
use crate::config::repository::ConfigRepository;
use crate::core::repository::ddb_repository::DdbRepository;
use crate::core::repository::memory_repository::MemoryRepository;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::{build_db_client, create_table};

pub(crate) async fn create_config_repository(store: RepositoryStore) -> Box<dyn ConfigRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DdbRepository::new(client, "library_config", "library_config_ndx", "config_id", "config_id"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "library_config", "config_id", "updated_at", "created_at").await;
            Box::new(DdbRepository::new(client, "library_config", "library_config_ndx", "config_id", "config_id"))
        }
        RepositoryStore::Memory => {
            Box::new(MemoryRepository::new("library_config"))
        }
    }
}

pub(crate) async fn create_config_service(store: RepositoryStore) -> Box<dyn ConfigService> {
    let config_repo = create_config_repository(store).await;
    Box::new(ConfigServiceImpl::new(config_repo))
}
