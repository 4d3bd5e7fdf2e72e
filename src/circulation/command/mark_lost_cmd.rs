use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::CirculationService;
use crate::circulation::dto::LoanDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct MarkLostCommand {
    circulation_service: Box<dyn CirculationService>,
}

impl MarkLostCommand {
    pub(crate) fn new(circulation_service: Box<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MarkLostCommandRequest {
    loan_id: String,
    member_id: String,
}

impl MarkLostCommandRequest {
    pub fn new(loan_id: &str, member_id: &str) -> Self {
        Self {
            loan_id: loan_id.to_string(),
            member_id: member_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct MarkLostCommandResponse {
    loan: LoanDto,
}

impl MarkLostCommandResponse {
    pub fn new(loan: LoanDto) -> Self {
        Self {
            loan,
        }
    }
}

#[async_trait]
impl Command<MarkLostCommandRequest, MarkLostCommandResponse> for MarkLostCommand {
    async fn execute(&self, req: MarkLostCommandRequest) -> Result<MarkLostCommandResponse, CommandError> {
        self.circulation_service.mark_lost(req.loan_id.as_str(), req.member_id.as_str())
            .await.map_err(CommandError::from)
            .map(|loan| MarkLostCommandResponse::new(LoanDto::from(&loan)))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use uuid::Uuid;
    use crate::catalog::domain::model::BookEntity;
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory as catalog_factory;
    use crate::circulation::command::mark_lost_cmd::{MarkLostCommand, MarkLostCommandRequest};
    use crate::circulation::domain::CirculationService;
    use crate::circulation::factory;
    use crate::core::command::Command;
    use crate::core::lending::LoanStatus;
    use crate::core::repository::RepositoryStore;
    use crate::members::domain::model::{MemberEntity, MembershipTierEntity};
    use crate::members::domain::MemberService;
    use crate::members::factory as members_factory;

    #[tokio::test]
    async fn test_should_run_mark_lost() {
        let member_svc = members_factory::create_member_service(RepositoryStore::Memory).await;
        let tier = member_svc.add_tier(&MembershipTierEntity::new("tier", 3, 14, 1)).await.expect("should add tier");
        let member = member_svc.add_member(&MemberEntity::new("l@test.org", "loser", Some(tier.tier_id.as_str()))).await
            .expect("should add member");
        let catalog_svc = catalog_factory::create_catalog_service(RepositoryStore::Memory).await;
        let mut book = BookEntity::new(Uuid::new_v4().to_string().as_str(), "cmd book", 1);
        book.replacement_price = dec!(20.00);
        let book = catalog_svc.add_book(&book).await.expect("should add book");

        let svc = factory::create_circulation_service(RepositoryStore::Memory).await;
        let loan = svc.issue(member.member_id.as_str(), book.book_id.as_str()).await.expect("should issue");

        let res = MarkLostCommand::new(svc).execute(
            MarkLostCommandRequest::new(loan.loan_id.as_str(), member.member_id.as_str()))
            .await.expect("should mark lost");
        assert_eq!(LoanStatus::Lost, res.loan.loan_status);
        assert_eq!(dec!(25.00), res.loan.fine_amount);
    }
}
