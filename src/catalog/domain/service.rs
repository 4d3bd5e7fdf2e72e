use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use crate::catalog::domain::model::BookEntity;
use crate::catalog::domain::CatalogService;
use crate::catalog::repository::BookRepository;
use crate::core::lending::{ItemStatus, LendingError, LendingResult};

pub(crate) struct CatalogServiceImpl {
    book_repository: Box<dyn BookRepository>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
        }
    }
}

fn validate_copies(book: &BookEntity) -> LendingResult<()> {
    if book.available_copies < 0 || book.available_copies > book.total_copies {
        return Err(LendingError::validation(
            format!("book {} has {} available of {} total copies",
                    book.book_id, book.available_copies, book.total_copies).as_str(),
            Some("400".to_string())));
    }
    Ok(())
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, book: &BookEntity) -> LendingResult<BookEntity> {
        validate_copies(book)?;
        self.book_repository.create(book).await?;
        Ok(book.clone())
    }

    async fn update_book(&self, book: &BookEntity) -> LendingResult<()> {
        validate_copies(book)?;
        let mut updated = book.clone();
        updated.updated_at = Utc::now().naive_utc();
        self.book_repository.update(&updated).await.map(|_| ())
    }

    async fn find_book_by_id(&self, id: &str) -> LendingResult<BookEntity> {
        self.book_repository.get(id).await
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> LendingResult<Vec<BookEntity>> {
        let res = self.book_repository.query(
            &HashMap::from([("isbn".to_string(), isbn.to_string())]), None, 100).await?;
        Ok(res.records)
    }

    async fn adjust_stock(&self, id: &str, delta: i64) -> LendingResult<BookEntity> {
        let mut book = self.book_repository.get(id).await?;
        book.available_copies += delta;
        validate_copies(&book)?;
        book.refresh_status();
        book.updated_at = Utc::now().naive_utc();
        self.book_repository.update(&book).await?;
        self.book_repository.get(id).await
    }

    async fn set_status(&self, id: &str, status: ItemStatus) -> LendingResult<BookEntity> {
        let mut book = self.book_repository.get(id).await?;
        book.book_status = status;
        book.updated_at = Utc::now().naive_utc();
        self.book_repository.update(&book).await?;
        self.book_repository.get(id).await
    }
}
