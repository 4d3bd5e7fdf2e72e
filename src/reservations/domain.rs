pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::core::lending::LendingResult;
use crate::reservations::domain::model::ReservationEntity;

#[async_trait]
pub(crate) trait ReservationService: Sync + Send {
    async fn reserve(&self, member_id: &str, book_id: &str) -> LendingResult<ReservationEntity>;
    async fn cancel(&self, reservation_id: &str, member_id: &str) -> LendingResult<ReservationEntity>;
    // oldest pending reservation wins; ties broken by reservation id
    async fn find_earliest_pending(&self, book_id: &str) -> LendingResult<Option<ReservationEntity>>;
    async fn find_pending_by_member(&self, member_id: &str, book_id: &str) -> LendingResult<Option<ReservationEntity>>;
    async fn mark_fulfilled(&self, reservation_id: &str) -> LendingResult<ReservationEntity>;
}
