use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::model::LoanEntity;
use crate::core::lending::LoanStatus;
use crate::utils::date::serializer;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct LoanDto {
    pub loan_id: String,
    pub member_id: String,
    pub book_id: String,
    pub loan_status: LoanStatus,
    #[serde(with = "serializer")]
    pub issued_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub due_at: NaiveDateTime,
    pub returned_at: Option<NaiveDateTime>,
    pub fine_amount: Decimal,
    pub renewal_count: i64,
}

impl From<&LoanEntity> for LoanDto {
    fn from(loan: &LoanEntity) -> Self {
        Self {
            loan_id: loan.loan_id.to_string(),
            member_id: loan.member_id.to_string(),
            book_id: loan.book_id.to_string(),
            loan_status: loan.loan_status,
            issued_at: loan.issued_at,
            due_at: loan.due_at,
            returned_at: loan.returned_at,
            fine_amount: loan.fine_amount,
            renewal_count: loan.renewal_count,
        }
    }
}

// Outcome of a return request. A plain Return against an overdue loan does
// not finalize; the caller must repeat the request with a payment choice.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct ReturnOutcome {
    pub finalized: bool,
    pub confirmation_required: bool,
    pub overdue_days: i64,
    pub fine_amount: Decimal,
    pub loan: Option<LoanDto>,
}

impl ReturnOutcome {
    pub fn confirmation(overdue_days: i64, fine_amount: Decimal) -> Self {
        Self {
            finalized: false,
            confirmation_required: true,
            overdue_days,
            fine_amount,
            loan: None,
        }
    }

    pub fn finalized(overdue_days: i64, fine_amount: Decimal, loan: &LoanEntity) -> Self {
        Self {
            finalized: true,
            confirmation_required: false,
            overdue_days,
            fine_amount,
            loan: Some(LoanDto::from(loan)),
        }
    }
}
