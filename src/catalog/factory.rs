use crate::catalog::domain::service::CatalogServiceImpl;
use crate::catalog::domain::CatalogService;
use crate::catalog::repository::BookRepository;
use crate::core::repository::ddb_repository::DdbRepository;
use crate::core::repository::memory_repository::MemoryRepository;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::{build_db_client, create_table};

pub(crate) async fn create_book_repository(store: RepositoryStore) -> Box<dyn BookRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DdbRepository::new(client, "books", "books_ndx", "book_id", "book_status"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "books", "book_id", "book_status", "isbn").await;
            Box::new(DdbRepository::new(client, "books", "books_ndx", "book_id", "book_status"))
        }
        RepositoryStore::Memory => {
            Box::new(MemoryRepository::new("books"))
        }
    }
}

pub(crate) async fn create_catalog_service(store: RepositoryStore) -> Box<dyn CatalogService> {
    let book_repo = create_book_repository(store).await;
    Box::new(CatalogServiceImpl::new(book_repo))
}
