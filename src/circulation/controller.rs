use axum::{
    extract::State,
    response::Json,
};
use serde_json::Value;
use crate::circulation::command::issue_book_cmd::{IssueBookCommand, IssueBookCommandRequest, IssueBookCommandResponse};
use crate::circulation::command::mark_lost_cmd::{MarkLostCommand, MarkLostCommandRequest, MarkLostCommandResponse};
use crate::circulation::command::renew_loan_cmd::{RenewLoanCommand, RenewLoanCommandRequest, RenewLoanCommandResponse};
use crate::circulation::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest, ReturnBookCommandResponse};
use crate::circulation::domain::CirculationService;
use crate::circulation::factory;
use crate::core::command::Command;
use crate::core::controller::{json_to_server_error, AppState, ServerError};

async fn build_service(state: AppState) -> Box<dyn CirculationService> {
    factory::create_circulation_service(state.store).await
}

pub(crate) async fn issue_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<IssueBookCommandResponse>, ServerError> {
    let req: IssueBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = IssueBookCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn renew_loan(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<RenewLoanCommandResponse>, ServerError> {
    let req: RenewLoanCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = RenewLoanCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn return_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<ReturnBookCommandResponse>, ServerError> {
    let req: ReturnBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = ReturnBookCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn mark_lost(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<MarkLostCommandResponse>, ServerError> {
    let req: MarkLostCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = MarkLostCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}
