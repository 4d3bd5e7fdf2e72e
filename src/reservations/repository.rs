use crate::core::repository::ddb_repository::DdbRepository;
use crate::core::repository::memory_repository::MemoryRepository;
use crate::core::repository::Repository;
use crate::reservations::domain::model::ReservationEntity;

pub(crate) trait ReservationRepository : Repository<ReservationEntity> {}

impl ReservationRepository for DdbRepository<ReservationEntity> {}

impl ReservationRepository for MemoryRepository<ReservationEntity> {}
