use crate::core::repository::ddb_repository::DdbRepository;
use crate::core::repository::memory_repository::MemoryRepository;
use crate::core::repository::Repository;
use crate::notifications::domain::model::NotificationEntity;

pub(crate) trait NotificationRepository : Repository<NotificationEntity> {}

impl NotificationRepository for DdbRepository<NotificationEntity> {}

impl NotificationRepository for MemoryRepository<NotificationEntity> {}
