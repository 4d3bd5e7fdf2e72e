use crate::config::domain::model::LibraryConfigEntity;
use crate::core::repository::ddb_repository::DdbRepository;
use crate::core::repository::memory_repository::MemoryRepository;
use crate::core::repository::Repository;

pub(crate) trait ConfigRepository : Repository<LibraryConfigEntity> {}

impl ConfigRepository for DdbRepository<LibraryConfigEntity> {}

impl ConfigRepository for MemoryRepository<LibraryConfigEntity> {}
