use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::lending::ItemStatus;
use crate::utils::date::serializer;

// BookEntity abstracts a physical book title with its copy counts. The status
// is derived from the counts except for Reserved, which is pinned by the
// return path until the reserved copy is issued.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct BookEntity {
    pub book_id: String,
    pub version: i64,
    pub isbn: String,
    pub title: String,
    pub total_copies: i64,
    pub available_copies: i64,
    // per-item borrow duration in days, the source of truth for due dates at issue time
    pub loan_duration_days: i64,
    pub replacement_price: Decimal,
    pub book_status: ItemStatus,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookEntity {
    pub fn new(isbn: &str, title: &str, total_copies: i64) -> Self {
        let mut book = Self {
            book_id: Uuid::new_v4().to_string(),
            version: 0,
            isbn: isbn.to_string(),
            title: title.to_string(),
            total_copies,
            available_copies: total_copies,
            loan_duration_days: 14,
            replacement_price: dec!(0.00),
            book_status: ItemStatus::Available,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        };
        book.book_status = book.stock_status();
        book
    }

    // status implied by the copy count alone
    pub fn stock_status(&self) -> ItemStatus {
        if self.available_copies == 0 {
            ItemStatus::OutOfStock
        } else {
            ItemStatus::Available
        }
    }

    // A Reserved pin is sticky under plain stock recomputation; only the
    // issue path clears it by applying the stock rule directly.
    pub fn refresh_status(&mut self) {
        if self.book_status != ItemStatus::Reserved {
            self.book_status = self.stock_status();
        }
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> String {
        self.book_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}
