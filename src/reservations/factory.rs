use crate::catalog::factory as catalog_factory;
use crate::core::repository::ddb_repository::DdbRepository;
use crate::core::repository::memory_repository::MemoryRepository;
use crate::core::repository::RepositoryStore;
use crate::members::factory as members_factory;
use crate::reservations::domain::service::ReservationServiceImpl;
use crate::reservations::domain::ReservationService;
use crate::reservations::repository::ReservationRepository;
use crate::utils::ddb::{build_db_client, create_table};

pub(crate) async fn create_reservation_repository(store: RepositoryStore) -> Box<dyn ReservationRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DdbRepository::new(client, "reservations", "reservations_ndx", "reservation_id", "book_id"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "reservations", "reservation_id", "book_id", "reservation_status").await;
            Box::new(DdbRepository::new(client, "reservations", "reservations_ndx", "reservation_id", "book_id"))
        }
        RepositoryStore::Memory => {
            Box::new(MemoryRepository::new("reservations"))
        }
    }
}

pub(crate) async fn create_reservation_service(store: RepositoryStore) -> Box<dyn ReservationService> {
    let reservation_repo = create_reservation_repository(store).await;
    let catalog_svc = catalog_factory::create_catalog_service(store).await;
    let member_svc = members_factory::create_member_service(store).await;
    Box::new(ReservationServiceImpl::new(reservation_repo, catalog_svc, member_svc))
}
