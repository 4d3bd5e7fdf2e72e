use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::lending::ReservationStatus;
use crate::reservations::domain::model::ReservationEntity;
use crate::utils::date::serializer;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct ReservationDto {
    pub reservation_id: String,
    pub member_id: String,
    pub book_id: String,
    pub reservation_status: ReservationStatus,
    #[serde(with = "serializer")]
    pub requested_at: NaiveDateTime,
}

impl From<&ReservationEntity> for ReservationDto {
    fn from(reservation: &ReservationEntity) -> Self {
        Self {
            reservation_id: reservation.reservation_id.to_string(),
            member_id: reservation.member_id.to_string(),
            book_id: reservation.book_id.to_string(),
            reservation_status: reservation.reservation_status,
            requested_at: reservation.requested_at,
        }
    }
}
