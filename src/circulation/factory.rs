use crate::catalog::factory as catalog_factory;
use crate::circulation::domain::service::CirculationServiceImpl;
use crate::circulation::domain::CirculationService;
use crate::circulation::repository::LoanRepository;
use crate::config::factory as config_factory;
use crate::core::repository::ddb_repository::DdbRepository;
use crate::core::repository::memory_repository::MemoryRepository;
use crate::core::repository::RepositoryStore;
use crate::members::factory as members_factory;
use crate::notifications::factory as notifications_factory;
use crate::reservations::factory as reservations_factory;
use crate::utils::ddb::{build_db_client, create_table};

pub(crate) async fn create_loan_repository(store: RepositoryStore) -> Box<dyn LoanRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DdbRepository::new(client, "loans", "loans_ndx", "loan_id", "member_id"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "loans", "loan_id", "member_id", "loan_status").await;
            Box::new(DdbRepository::new(client, "loans", "loans_ndx", "loan_id", "member_id"))
        }
        RepositoryStore::Memory => {
            Box::new(MemoryRepository::new("loans"))
        }
    }
}

pub(crate) async fn create_circulation_service(store: RepositoryStore) -> Box<dyn CirculationService> {
    let loan_repo = create_loan_repository(store).await;
    let catalog_svc = catalog_factory::create_catalog_service(store).await;
    let member_svc = members_factory::create_member_service(store).await;
    let reservation_svc = reservations_factory::create_reservation_service(store).await;
    let config_svc = config_factory::create_config_service(store).await;
    let notifier = notifications_factory::create_notifier(store).await;
    Box::new(CirculationServiceImpl::new(loan_repo, catalog_svc, member_svc, reservation_svc, config_svc, notifier))
}
