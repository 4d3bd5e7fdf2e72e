use crate::circulation::domain::model::LoanEntity;
use crate::core::repository::ddb_repository::DdbRepository;
use crate::core::repository::memory_repository::MemoryRepository;
use crate::core::repository::Repository;

pub(crate) trait LoanRepository : Repository<LoanEntity> {}

impl LoanRepository for DdbRepository<LoanEntity> {}

impl LoanRepository for MemoryRepository<LoanEntity> {}
