use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::reservations::domain::ReservationService;
use crate::reservations::dto::ReservationDto;

pub(crate) struct ReserveBookCommand {
    reservation_service: Box<dyn ReservationService>,
}

impl ReserveBookCommand {
    pub(crate) fn new(reservation_service: Box<dyn ReservationService>) -> Self {
        Self {
            reservation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReserveBookCommandRequest {
    member_id: String,
    book_id: String,
}

impl ReserveBookCommandRequest {
    pub fn new(member_id: &str, book_id: &str) -> Self {
        Self {
            member_id: member_id.to_string(),
            book_id: book_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ReserveBookCommandResponse {
    reservation: ReservationDto,
}

impl ReserveBookCommandResponse {
    pub fn new(reservation: ReservationDto) -> Self {
        Self {
            reservation,
        }
    }
}

#[async_trait]
impl Command<ReserveBookCommandRequest, ReserveBookCommandResponse> for ReserveBookCommand {
    async fn execute(&self, req: ReserveBookCommandRequest) -> Result<ReserveBookCommandResponse, CommandError> {
        self.reservation_service.reserve(req.member_id.as_str(), req.book_id.as_str())
            .await.map_err(CommandError::from)
            .map(|reservation| ReserveBookCommandResponse::new(ReservationDto::from(&reservation)))
    }
}
