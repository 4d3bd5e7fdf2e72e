pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::circulation::domain::model::LoanEntity;
use crate::circulation::dto::ReturnOutcome;
use crate::core::lending::{LendingResult, ReturnAction};

// CirculationService drives the loan lifecycle. Every operation re-reads its
// entities and relies on version-guarded writes, so a concurrent writer
// surfaces as a retryable conflict rather than a lost update.
#[async_trait]
pub(crate) trait CirculationService: Sync + Send {
    async fn issue(&self, member_id: &str, book_id: &str) -> LendingResult<LoanEntity>;
    async fn renew(&self, loan_id: &str, member_id: &str) -> LendingResult<LoanEntity>;
    async fn return_book(&self, loan_id: &str, member_id: &str, action: ReturnAction) -> LendingResult<ReturnOutcome>;
    async fn mark_lost(&self, loan_id: &str, member_id: &str) -> LendingResult<LoanEntity>;
    async fn find_loan_by_id(&self, loan_id: &str) -> LendingResult<LoanEntity>;
    async fn find_loans_by_member(&self, member_id: &str) -> LendingResult<Vec<LoanEntity>>;
    async fn query_overdue(&self) -> LendingResult<Vec<LoanEntity>>;
}
