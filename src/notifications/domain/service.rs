use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use crate::core::lending::LendingResult;
use crate::notifications::domain::model::NotificationEntity;
use crate::notifications::domain::Notifier;
use crate::notifications::repository::NotificationRepository;

const PAGE_SIZE: usize = 100;

pub(crate) struct NotificationServiceImpl {
    notification_repository: Box<dyn NotificationRepository>,
}

impl NotificationServiceImpl {
    pub(crate) fn new(notification_repository: Box<dyn NotificationRepository>) -> Self {
        Self {
            notification_repository,
        }
    }
}

#[async_trait]
impl Notifier for NotificationServiceImpl {
    async fn deliver(&self, member_id: &str, message: &str) -> LendingResult<NotificationEntity> {
        let notification = NotificationEntity::new(member_id, message);
        self.notification_repository.create(&notification).await?;
        Ok(notification)
    }

    async fn find_by_member(&self, member_id: &str) -> LendingResult<Vec<NotificationEntity>> {
        let predicate = HashMap::from([("member_id".to_string(), member_id.to_string())]);
        let mut notifications = vec![];
        let mut page = None;
        loop {
            let res = self.notification_repository.query(&predicate, page.as_deref(), PAGE_SIZE).await?;
            notifications.extend(res.records);
            if res.next_page.is_none() {
                break;
            }
            page = res.next_page;
        }
        notifications.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(notifications)
    }

    async fn mark_read(&self, notification_id: &str) -> LendingResult<NotificationEntity> {
        let mut notification = self.notification_repository.get(notification_id).await?;
        notification.is_read = true;
        notification.updated_at = Utc::now().naive_utc();
        self.notification_repository.update(&notification).await?;
        self.notification_repository.get(notification_id).await
    }

    async fn acknowledge(&self, member_id: &str, needle: &str) -> LendingResult<usize> {
        let notifications = self.find_by_member(member_id).await?;
        let mut acknowledged = 0;
        for notification in notifications {
            if !notification.is_read && notification.message.contains(needle) {
                self.mark_read(notification.notification_id.as_str()).await?;
                acknowledged += 1;
            }
        }
        Ok(acknowledged)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::core::repository::RepositoryStore;
    use crate::notifications::domain::Notifier;
    use crate::notifications::factory;

    async fn build_notifier() -> Box<dyn Notifier> {
        factory::create_notifier(RepositoryStore::Memory).await
    }

    #[tokio::test]
    async fn test_should_deliver_and_list() {
        let notifier = build_notifier().await;
        let member_id = Uuid::new_v4().to_string();
        let _ = notifier.deliver(member_id.as_str(), "first message").await.expect("should deliver");
        let _ = notifier.deliver(member_id.as_str(), "second message").await.expect("should deliver");
        let notifications = notifier.find_by_member(member_id.as_str()).await.expect("should list");
        assert_eq!(2, notifications.len());
        assert!(notifications.iter().all(|n| !n.is_read));
    }

    #[tokio::test]
    async fn test_should_mark_read() {
        let notifier = build_notifier().await;
        let member_id = Uuid::new_v4().to_string();
        let notification = notifier.deliver(member_id.as_str(), "a message").await.expect("should deliver");
        let updated = notifier.mark_read(notification.notification_id.as_str()).await.expect("should mark read");
        assert!(updated.is_read);
        assert!(updated.version > notification.version);
    }

    #[tokio::test]
    async fn test_should_acknowledge_matching_unread() {
        let notifier = build_notifier().await;
        let member_id = Uuid::new_v4().to_string();
        let _ = notifier.deliver(member_id.as_str(), "'Dune' is overdue").await.expect("should deliver");
        let _ = notifier.deliver(member_id.as_str(), "'Emma' is overdue").await.expect("should deliver");
        let read = notifier.deliver(member_id.as_str(), "'Dune' is overdue again").await.expect("should deliver");
        let _ = notifier.mark_read(read.notification_id.as_str()).await.expect("should mark read");

        let acknowledged = notifier.acknowledge(member_id.as_str(), "'Dune'").await.expect("should acknowledge");
        assert_eq!(1, acknowledged);
        let notifications = notifier.find_by_member(member_id.as_str()).await.expect("should list");
        let unread: Vec<_> = notifications.iter().filter(|n| !n.is_read).collect();
        assert_eq!(1, unread.len());
        assert!(unread[0].message.contains("'Emma'"));
    }
}
