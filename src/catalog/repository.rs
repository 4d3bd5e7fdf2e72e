use crate::catalog::domain::model::BookEntity;
use crate::core::repository::ddb_repository::DdbRepository;
use crate::core::repository::memory_repository::MemoryRepository;
use crate::core::repository::Repository;

pub(crate) trait BookRepository : Repository<BookEntity> {}

impl BookRepository for DdbRepository<BookEntity> {}

impl BookRepository for MemoryRepository<BookEntity> {}
