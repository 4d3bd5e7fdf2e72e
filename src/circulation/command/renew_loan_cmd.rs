use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::CirculationService;
use crate::circulation::dto::LoanDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct RenewLoanCommand {
    circulation_service: Box<dyn CirculationService>,
}

impl RenewLoanCommand {
    pub(crate) fn new(circulation_service: Box<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RenewLoanCommandRequest {
    loan_id: String,
    member_id: String,
}

impl RenewLoanCommandRequest {
    pub fn new(loan_id: &str, member_id: &str) -> Self {
        Self {
            loan_id: loan_id.to_string(),
            member_id: member_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RenewLoanCommandResponse {
    loan: LoanDto,
}

impl RenewLoanCommandResponse {
    pub fn new(loan: LoanDto) -> Self {
        Self {
            loan,
        }
    }
}

#[async_trait]
impl Command<RenewLoanCommandRequest, RenewLoanCommandResponse> for RenewLoanCommand {
    async fn execute(&self, req: RenewLoanCommandRequest) -> Result<RenewLoanCommandResponse, CommandError> {
        self.circulation_service.renew(req.loan_id.as_str(), req.member_id.as_str())
            .await.map_err(CommandError::from)
            .map(|loan| RenewLoanCommandResponse::new(LoanDto::from(&loan)))
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::catalog::domain::model::BookEntity;
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory as catalog_factory;
    use crate::circulation::command::renew_loan_cmd::{RenewLoanCommand, RenewLoanCommandRequest};
    use crate::circulation::domain::CirculationService;
    use crate::circulation::factory;
    use crate::core::command::Command;
    use crate::core::repository::RepositoryStore;
    use crate::members::domain::model::{MemberEntity, MembershipTierEntity};
    use crate::members::domain::MemberService;
    use crate::members::factory as members_factory;

    #[tokio::test]
    async fn test_should_run_renew_loan() {
        let member_svc = members_factory::create_member_service(RepositoryStore::Memory).await;
        let tier = member_svc.add_tier(&MembershipTierEntity::new("tier", 3, 14, 1)).await.expect("should add tier");
        let member = member_svc.add_member(&MemberEntity::new("r@test.org", "renewer", Some(tier.tier_id.as_str()))).await
            .expect("should add member");
        let catalog_svc = catalog_factory::create_catalog_service(RepositoryStore::Memory).await;
        let book = catalog_svc.add_book(&BookEntity::new(Uuid::new_v4().to_string().as_str(), "cmd book", 1)).await
            .expect("should add book");

        let svc = factory::create_circulation_service(RepositoryStore::Memory).await;
        let loan = svc.issue(member.member_id.as_str(), book.book_id.as_str()).await.expect("should issue");

        let res = RenewLoanCommand::new(svc).execute(
            RenewLoanCommandRequest::new(loan.loan_id.as_str(), member.member_id.as_str()))
            .await.expect("should renew loan");
        assert_eq!(1, res.loan.renewal_count);
        assert!(res.loan.due_at > loan.due_at);
    }
}
