pub mod model;
pub mod service;

use async_trait::async_trait;
use rust_decimal::Decimal;
use crate::config::domain::model::LibraryConfigEntity;
use crate::core::lending::LendingResult;

#[async_trait]
pub(crate) trait ConfigService: Sync + Send {
    async fn load(&self) -> LendingResult<LibraryConfigEntity>;
    async fn fine_rate_per_day(&self) -> LendingResult<Decimal>;
    async fn hold_expiry_days(&self) -> LendingResult<i64>;
    async fn update(&self, fine_per_day: Decimal, hold_expiry_days: i64) -> LendingResult<LibraryConfigEntity>;
}
