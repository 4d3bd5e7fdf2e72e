pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::catalog::domain::model::BookEntity;
use crate::core::lending::{ItemStatus, LendingResult};

// CatalogService owns the physical book records consumed by circulation.
// Copy counts and status are mutated only through this interface.
#[async_trait]
pub(crate) trait CatalogService: Sync + Send {
    async fn add_book(&self, book: &BookEntity) -> LendingResult<BookEntity>;
    async fn update_book(&self, book: &BookEntity) -> LendingResult<()>;
    async fn find_book_by_id(&self, id: &str) -> LendingResult<BookEntity>;
    async fn find_book_by_isbn(&self, isbn: &str) -> LendingResult<Vec<BookEntity>>;
    async fn adjust_stock(&self, id: &str, delta: i64) -> LendingResult<BookEntity>;
    async fn set_status(&self, id: &str, status: ItemStatus) -> LendingResult<BookEntity>;
}
