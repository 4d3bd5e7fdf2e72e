use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::reservations::domain::ReservationService;
use crate::reservations::dto::ReservationDto;

pub(crate) struct CancelReservationCommand {
    reservation_service: Box<dyn ReservationService>,
}

impl CancelReservationCommand {
    pub(crate) fn new(reservation_service: Box<dyn ReservationService>) -> Self {
        Self {
            reservation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CancelReservationCommandRequest {
    reservation_id: String,
    member_id: String,
}

impl CancelReservationCommandRequest {
    pub fn new(reservation_id: &str, member_id: &str) -> Self {
        Self {
            reservation_id: reservation_id.to_string(),
            member_id: member_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CancelReservationCommandResponse {
    reservation: ReservationDto,
}

impl CancelReservationCommandResponse {
    pub fn new(reservation: ReservationDto) -> Self {
        Self {
            reservation,
        }
    }
}

#[async_trait]
impl Command<CancelReservationCommandRequest, CancelReservationCommandResponse> for CancelReservationCommand {
    async fn execute(&self, req: CancelReservationCommandRequest) -> Result<CancelReservationCommandResponse, CommandError> {
        self.reservation_service.cancel(req.reservation_id.as_str(), req.member_id.as_str())
            .await.map_err(CommandError::from)
            .map(|reservation| CancelReservationCommandResponse::new(ReservationDto::from(&reservation)))
    }
}
