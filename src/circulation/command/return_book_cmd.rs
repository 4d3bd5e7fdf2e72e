use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::CirculationService;
use crate::circulation::dto::ReturnOutcome;
use crate::core::command::{Command, CommandError};
use crate::core::lending::ReturnAction;

pub(crate) struct ReturnBookCommand {
    circulation_service: Box<dyn CirculationService>,
}

impl ReturnBookCommand {
    pub(crate) fn new(circulation_service: Box<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReturnBookCommandRequest {
    loan_id: String,
    member_id: String,
    action: ReturnAction,
}

impl ReturnBookCommandRequest {
    pub fn new(loan_id: &str, member_id: &str, action: ReturnAction) -> Self {
        Self {
            loan_id: loan_id.to_string(),
            member_id: member_id.to_string(),
            action,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ReturnBookCommandResponse {
    outcome: ReturnOutcome,
}

impl ReturnBookCommandResponse {
    pub fn new(outcome: ReturnOutcome) -> Self {
        Self {
            outcome,
        }
    }
}

#[async_trait]
impl Command<ReturnBookCommandRequest, ReturnBookCommandResponse> for ReturnBookCommand {
    async fn execute(&self, req: ReturnBookCommandRequest) -> Result<ReturnBookCommandResponse, CommandError> {
        self.circulation_service.return_book(req.loan_id.as_str(), req.member_id.as_str(), req.action)
            .await.map_err(CommandError::from).map(ReturnBookCommandResponse::new)
    }
}
