use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::CirculationService;
use crate::circulation::dto::LoanDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct IssueBookCommand {
    circulation_service: Box<dyn CirculationService>,
}

impl IssueBookCommand {
    pub(crate) fn new(circulation_service: Box<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueBookCommandRequest {
    member_id: String,
    book_id: String,
}

impl IssueBookCommandRequest {
    pub fn new(member_id: &str, book_id: &str) -> Self {
        Self {
            member_id: member_id.to_string(),
            book_id: book_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct IssueBookCommandResponse {
    loan: LoanDto,
}

impl IssueBookCommandResponse {
    pub fn new(loan: LoanDto) -> Self {
        Self {
            loan,
        }
    }
}

#[async_trait]
impl Command<IssueBookCommandRequest, IssueBookCommandResponse> for IssueBookCommand {
    async fn execute(&self, req: IssueBookCommandRequest) -> Result<IssueBookCommandResponse, CommandError> {
        self.circulation_service.issue(req.member_id.as_str(), req.book_id.as_str())
            .await.map_err(CommandError::from)
            .map(|loan| IssueBookCommandResponse::new(LoanDto::from(&loan)))
    }
}
