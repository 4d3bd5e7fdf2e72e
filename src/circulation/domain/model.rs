use chrono::{Duration, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::lending::LoanStatus;
use crate::utils::date::serializer;

// LoanEntity abstracts a single copy lent to a member. The fine is captured
// on the loan when it closes, not accrued in place while it is open.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct LoanEntity {
    pub loan_id: String,
    pub version: i64,
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
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl LoanEntity {
    pub fn new(member_id: &str, book_id: &str, loan_duration_days: i64) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            loan_id: Uuid::new_v4().to_string(),
            version: 0,
            member_id: member_id.to_string(),
            book_id: book_id.to_string(),
            loan_status: LoanStatus::Issued,
            issued_at: now,
            due_at: now + Duration::days(loan_duration_days),
            returned_at: None,
            fine_amount: dec!(0.00),
            renewal_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_open(&self) -> bool {
        self.loan_status == LoanStatus::Issued
    }
}

impl Identifiable for LoanEntity {
    fn id(&self) -> String {
        self.loan_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}
