use crate::core::repository::ddb_repository::DdbRepository;
use crate::core::repository::memory_repository::MemoryRepository;
use crate::core::repository::RepositoryStore;
use crate::notifications::domain::service::NotificationServiceImpl;
use crate::notifications::domain::Notifier;
use crate::notifications::repository::NotificationRepository;
use crate::utils::ddb::{build_db_client, create_table};

pub(crate) async fn create_notification_repository(store: RepositoryStore) -> Box<dyn NotificationRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DdbRepository::new(client, "notifications", "notifications_ndx", "notification_id", "member_id"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "notifications", "notification_id", "member_id", "created_at").await;
            Box::new(DdbRepository::new(client, "notifications", "notifications_ndx", "notification_id", "member_id"))
        }
        RepositoryStore::Memory => {
            Box::new(MemoryRepository::new("notifications"))
        }
    }
}

pub(crate) async fn create_notifier(store: RepositoryStore) -> Box<dyn Notifier> {
    let notification_repo = create_notification_repository(store).await;
    Box::new(NotificationServiceImpl::new(notification_repo))
}
