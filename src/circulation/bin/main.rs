include!("../../lib.rs");
use axum::{
    routing::post,
    Router,
};
use lambda_http::{run, Error};
use crate::circulation::controller::{issue_book, mark_lost, renew_loan, return_book};
use crate::core::controller::AppState;
use crate::core::repository::RepositoryStore;
use crate::reservations::controller::{cancel_reservation, reserve_book};
use crate::utils::ddb::setup_tracing;

const DEV_MODE: bool = true;

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let state = if DEV_MODE {
        std::env::set_var("AWS_LAMBDA_FUNCTION_NAME", "_");
        std::env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "4096"); // 200MB
        std::env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "1");
        std::env::set_var("AWS_LAMBDA_RUNTIME_API", "http://[::]:9000/.rt");
        AppState::new(RepositoryStore::LocalDynamoDB)
    } else {
        AppState::new(RepositoryStore::DynamoDB)
    };

    let app = Router::new()
        .route("/loans", post(issue_book))
        .route("/loans/renew", post(renew_loan))
        .route("/loans/return", post(return_book))
        .route("/loans/lost", post(mark_lost))
        .route("/reservations", post(reserve_book))
        .route("/reservations/cancel", post(cancel_reservation))
        .with_state(state);

    run(app).await
}
