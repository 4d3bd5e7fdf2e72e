pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::core::lending::LendingResult;
use crate::notifications::domain::model::NotificationEntity;

// Delivery seam for circulation. Implementations persist per-member rows;
// callers treat delivery as best-effort and must not fail the triggering
// operation when it errors.
#[async_trait]
pub(crate) trait Notifier: Sync + Send {
    async fn deliver(&self, member_id: &str, message: &str) -> LendingResult<NotificationEntity>;
    async fn find_by_member(&self, member_id: &str) -> LendingResult<Vec<NotificationEntity>>;
    async fn mark_read(&self, notification_id: &str) -> LendingResult<NotificationEntity>;
    // marks every unread notification for the member whose message contains
    // the needle
    async fn acknowledge(&self, member_id: &str, needle: &str) -> LendingResult<usize>;
}
