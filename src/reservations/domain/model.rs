use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::lending::ReservationStatus;
use crate::utils::date::serializer;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct ReservationEntity {
    pub reservation_id: String,
    pub version: i64,
    pub member_id: String,
    pub book_id: String,
    pub reservation_status: ReservationStatus,
    #[serde(with = "serializer")]
    pub requested_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl ReservationEntity {
    pub fn new(member_id: &str, book_id: &str) -> Self {
        Self {
            reservation_id: Uuid::new_v4().to_string(),
            version: 0,
            member_id: member_id.to_string(),
            book_id: book_id.to_string(),
            reservation_status: ReservationStatus::Pending,
            requested_at: Utc::now().naive_utc(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.reservation_status == ReservationStatus::Pending
    }
}

impl Identifiable for ReservationEntity {
    fn id(&self) -> String {
        self.reservation_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}
