use axum::{
    extract::State,
    response::Json,
};
use serde_json::Value;
use crate::core::command::Command;
use crate::core::controller::{json_to_server_error, AppState, ServerError};
use crate::reservations::command::cancel_reservation_cmd::{CancelReservationCommand, CancelReservationCommandRequest, CancelReservationCommandResponse};
use crate::reservations::command::reserve_book_cmd::{ReserveBookCommand, ReserveBookCommandRequest, ReserveBookCommandResponse};
use crate::reservations::domain::ReservationService;
use crate::reservations::factory;

async fn build_service(state: AppState) -> Box<dyn ReservationService> {
    factory::create_reservation_service(state.store).await
}

pub(crate) async fn reserve_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<ReserveBookCommandResponse>, ServerError> {
    let req: ReserveBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = ReserveBookCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn cancel_reservation(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<CancelReservationCommandResponse>, ServerError> {
    let req: CancelReservationCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = CancelReservationCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}
