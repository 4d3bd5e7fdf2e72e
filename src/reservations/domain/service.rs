use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use crate::catalog::domain::CatalogService;
use crate::core::lending::{LendingError, LendingResult, ReservationStatus};
use crate::members::domain::MemberService;
use crate::reservations::domain::model::ReservationEntity;
use crate::reservations::domain::ReservationService;
use crate::reservations::repository::ReservationRepository;

const PAGE_SIZE: usize = 100;

pub(crate) struct ReservationServiceImpl {
    reservation_repository: Box<dyn ReservationRepository>,
    catalog_service: Box<dyn CatalogService>,
    member_service: Box<dyn MemberService>,
}

impl ReservationServiceImpl {
    pub(crate) fn new(reservation_repository: Box<dyn ReservationRepository>,
                      catalog_service: Box<dyn CatalogService>,
                      member_service: Box<dyn MemberService>) -> Self {
        Self {
            reservation_repository,
            catalog_service,
            member_service,
        }
    }

    async fn query_all(&self, predicate: &HashMap<String, String>) -> LendingResult<Vec<ReservationEntity>> {
        let mut reservations = vec![];
        let mut page = None;
        loop {
            let res = self.reservation_repository.query(predicate, page.as_deref(), PAGE_SIZE).await?;
            reservations.extend(res.records);
            if res.next_page.is_none() {
                break;
            }
            page = res.next_page;
        }
        Ok(reservations)
    }
}

#[async_trait]
impl ReservationService for ReservationServiceImpl {
    async fn reserve(&self, member_id: &str, book_id: &str) -> LendingResult<ReservationEntity> {
        let _ = self.member_service.find_member_by_id(member_id).await?;
        let book = self.catalog_service.find_book_by_id(book_id).await?;
        if book.available_copies > 0 {
            return Err(LendingError::item_already_available(
                format!("book {} still has {} available copies", book_id, book.available_copies).as_str()));
        }
        if self.find_pending_by_member(member_id, book_id).await?.is_some() {
            return Err(LendingError::duplicate_reservation(
                format!("member {} already has a pending reservation for book {}", member_id, book_id).as_str()));
        }
        let reservation = ReservationEntity::new(member_id, book_id);
        self.reservation_repository.create(&reservation).await?;
        Ok(reservation)
    }

    async fn cancel(&self, reservation_id: &str, member_id: &str) -> LendingResult<ReservationEntity> {
        let mut reservation = self.reservation_repository.get(reservation_id).await?;
        if reservation.member_id != member_id {
            return Err(LendingError::validation(
                format!("reservation {} does not belong to member {}", reservation_id, member_id).as_str(), None));
        }
        if !reservation.is_pending() {
            return Err(LendingError::invalid_state(
                format!("reservation {} is not pending", reservation_id).as_str()));
        }
        reservation.reservation_status = ReservationStatus::Cancelled;
        reservation.updated_at = Utc::now().naive_utc();
        self.reservation_repository.update(&reservation).await?;
        self.reservation_repository.get(reservation_id).await
    }

    async fn find_earliest_pending(&self, book_id: &str) -> LendingResult<Option<ReservationEntity>> {
        let predicate = HashMap::from([
            ("book_id".to_string(), book_id.to_string()),
            ("reservation_status".to_string(), ReservationStatus::Pending.to_string()),
        ]);
        let reservations = self.query_all(&predicate).await?;
        Ok(reservations.into_iter().min_by(|a, b| {
            a.requested_at.cmp(&b.requested_at).then(a.reservation_id.cmp(&b.reservation_id))
        }))
    }

    async fn find_pending_by_member(&self, member_id: &str, book_id: &str) -> LendingResult<Option<ReservationEntity>> {
        let predicate = HashMap::from([
            ("book_id".to_string(), book_id.to_string()),
            ("member_id".to_string(), member_id.to_string()),
            ("reservation_status".to_string(), ReservationStatus::Pending.to_string()),
        ]);
        let reservations = self.query_all(&predicate).await?;
        Ok(reservations.into_iter().next())
    }

    async fn mark_fulfilled(&self, reservation_id: &str) -> LendingResult<ReservationEntity> {
        let mut reservation = self.reservation_repository.get(reservation_id).await?;
        if !reservation.is_pending() {
            return Err(LendingError::invalid_state(
                format!("reservation {} is not pending", reservation_id).as_str()));
        }
        reservation.reservation_status = ReservationStatus::Fulfilled;
        reservation.updated_at = Utc::now().naive_utc();
        self.reservation_repository.update(&reservation).await?;
        self.reservation_repository.get(reservation_id).await
    }
}
