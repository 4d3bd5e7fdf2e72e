use std::collections::HashMap;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;
use crate::catalog::domain::CatalogService;
use crate::circulation::domain::model::LoanEntity;
use crate::circulation::domain::CirculationService;
use crate::circulation::dto::ReturnOutcome;
use crate::circulation::fines;
use crate::circulation::repository::LoanRepository;
use crate::config::domain::ConfigService;
use crate::core::lending::{ItemStatus, LendingError, LendingResult, LoanStatus, ReturnAction};
use crate::members::domain::MemberService;
use crate::notifications::domain::Notifier;
use crate::reservations::domain::ReservationService;
use crate::utils::date::DATE_FMT;

// flat processing fee added to the replacement price of a lost copy
const LOST_ITEM_SURCHARGE: Decimal = dec!(5.00);

const PAGE_SIZE: usize = 100;

pub(crate) struct CirculationServiceImpl {
    loan_repository: Box<dyn LoanRepository>,
    catalog_service: Box<dyn CatalogService>,
    member_service: Box<dyn MemberService>,
    reservation_service: Box<dyn ReservationService>,
    config_service: Box<dyn ConfigService>,
    notifier: Box<dyn Notifier>,
}

impl CirculationServiceImpl {
    pub(crate) fn new(loan_repository: Box<dyn LoanRepository>,
                      catalog_service: Box<dyn CatalogService>,
                      member_service: Box<dyn MemberService>,
                      reservation_service: Box<dyn ReservationService>,
                      config_service: Box<dyn ConfigService>,
                      notifier: Box<dyn Notifier>) -> Self {
        Self {
            loan_repository,
            catalog_service,
            member_service,
            reservation_service,
            config_service,
            notifier,
        }
    }

    async fn query_all(&self, predicate: &HashMap<String, String>) -> LendingResult<Vec<LoanEntity>> {
        let mut loans = vec![];
        let mut page = None;
        loop {
            let res = self.loan_repository.query(predicate, page.as_deref(), PAGE_SIZE).await?;
            loans.extend(res.records);
            if res.next_page.is_none() {
                break;
            }
            page = res.next_page;
        }
        Ok(loans)
    }

    async fn count_open_loans(&self, member_id: &str) -> LendingResult<i64> {
        let predicate = HashMap::from([
            ("member_id".to_string(), member_id.to_string()),
            ("loan_status".to_string(), LoanStatus::Issued.to_string()),
        ]);
        Ok(self.query_all(&predicate).await?.len() as i64)
    }

    // a member holds at most one open loan per book; history keeps closed ones
    async fn has_open_loan_for(&self, member_id: &str, book_id: &str) -> LendingResult<bool> {
        let predicate = HashMap::from([
            ("member_id".to_string(), member_id.to_string()),
            ("book_id".to_string(), book_id.to_string()),
            ("loan_status".to_string(), LoanStatus::Issued.to_string()),
        ]);
        Ok(!self.query_all(&predicate).await?.is_empty())
    }

    // loads the loan and rejects callers who do not hold it open
    async fn owned_open_loan(&self, loan_id: &str, member_id: &str) -> LendingResult<LoanEntity> {
        let loan = self.loan_repository.get(loan_id).await?;
        if loan.member_id != member_id {
            return Err(LendingError::validation(
                format!("loan {} does not belong to member {}", loan_id, member_id).as_str(), None));
        }
        if !loan.is_open() {
            return Err(LendingError::invalid_state(
                format!("loan {} is already {}", loan_id, loan.loan_status).as_str()));
        }
        Ok(loan)
    }

    // delivery is best-effort; circulation outcomes never depend on it
    async fn notify(&self, member_id: &str, message: &str) {
        if let Err(err) = self.notifier.deliver(member_id, message).await {
            warn!("failed to notify member {}: {}", member_id, err);
        }
    }
}

#[async_trait]
impl CirculationService for CirculationServiceImpl {
    async fn issue(&self, member_id: &str, book_id: &str) -> LendingResult<LoanEntity> {
        let _ = self.member_service.find_member_by_id(member_id).await?;
        let book = self.catalog_service.find_book_by_id(book_id).await?;

        // an outstanding reservation blocks everyone but its holder
        let claimed = match self.reservation_service.find_earliest_pending(book_id).await? {
            Some(reservation) if reservation.member_id != member_id => {
                return Err(LendingError::reserved_for_other(
                    format!("book {} is reserved by another member", book_id).as_str()));
            }
            other => other,
        };
        if book.available_copies <= 0 && claimed.is_none() {
            return Err(LendingError::out_of_stock(
                format!("book {} has no available copies", book_id).as_str()));
        }

        let policy = self.member_service.policy_for(member_id).await?;
        let open = self.count_open_loans(member_id).await?;
        if open >= policy.max_concurrent_loans {
            return Err(LendingError::limit_reached(
                format!("member {} reached the limit of {} concurrent loans",
                        member_id, policy.max_concurrent_loans).as_str()));
        }
        if self.has_open_loan_for(member_id, book_id).await? {
            return Err(LendingError::validation(
                format!("member {} already has book {} on loan", member_id, book_id).as_str(),
                Some("ALREADY_BORROWED".to_string())));
        }

        // the stock write goes first and serializes racing issues; the loser
        // conflicts or runs out of copies here, before any loan row exists
        match claimed {
            Some(reservation) => {
                let mut held = self.catalog_service.find_book_by_id(book_id).await?;
                // the held copy was kept out of stock at return time, so a
                // zero count means the member picks up that copy
                let took_shelf_copy = held.available_copies > 0;
                if took_shelf_copy {
                    held.available_copies -= 1;
                }
                held.book_status = held.stock_status();
                self.catalog_service.update_book(&held).await?;
                if let Err(err) = self.reservation_service.mark_fulfilled(reservation.reservation_id.as_str()).await {
                    // put the copy back so the shelf count stays truthful
                    let mut reverted = self.catalog_service.find_book_by_id(book_id).await?;
                    if took_shelf_copy {
                        reverted.available_copies += 1;
                    }
                    reverted.book_status = ItemStatus::Reserved;
                    if let Err(revert_err) = self.catalog_service.update_book(&reverted).await {
                        warn!("failed to restore book {} after fulfillment error: {}", book_id, revert_err);
                    }
                    return Err(err);
                }
            }
            None => {
                let _ = self.catalog_service.adjust_stock(book_id, -1).await?;
            }
        }

        let loan = LoanEntity::new(member_id, book_id, book.loan_duration_days);
        self.loan_repository.create(&loan).await?;

        self.notify(member_id, format!("You have borrowed '{}', due back on {}",
                                       book.title, loan.due_at.format("%Y-%m-%d")).as_str()).await;
        Ok(loan)
    }

    async fn renew(&self, loan_id: &str, member_id: &str) -> LendingResult<LoanEntity> {
        let mut loan = self.owned_open_loan(loan_id, member_id).await?;
        if self.reservation_service.find_earliest_pending(loan.book_id.as_str()).await?.is_some() {
            return Err(LendingError::reserved_by_other(
                format!("book {} has a pending reservation", loan.book_id).as_str()));
        }
        let policy = self.member_service.policy_for(member_id).await?;
        if loan.renewal_count >= policy.max_renewals {
            return Err(LendingError::renewal_limit(
                format!("loan {} reached the limit of {} renewals", loan_id, policy.max_renewals).as_str()));
        }
        loan.due_at += Duration::days(policy.loan_duration_days);
        loan.renewal_count += 1;
        loan.updated_at = Utc::now().naive_utc();
        self.loan_repository.update(&loan).await?;
        self.loan_repository.get(loan_id).await
    }

    async fn return_book(&self, loan_id: &str, member_id: &str, action: ReturnAction) -> LendingResult<ReturnOutcome> {
        let mut loan = self.owned_open_loan(loan_id, member_id).await?;
        let now = Utc::now().naive_utc();
        let rate = self.config_service.fine_rate_per_day().await?;
        let overdue_days = fines::overdue_days(now, loan.due_at);
        let fine = fines::fine_for(now, loan.due_at, rate);

        // an overdue return needs an explicit payment choice before anything
        // is written
        if action == ReturnAction::Return && fine > dec!(0.00) {
            return Ok(ReturnOutcome::confirmation(overdue_days, fine));
        }
        let recorded_fine = match action {
            ReturnAction::ReturnPayNow => dec!(0.00),
            _ => fine,
        };

        let prior_fine = loan.fine_amount;
        loan.loan_status = LoanStatus::Returned;
        loan.returned_at = Some(now);
        loan.fine_amount = recorded_fine;
        loan.updated_at = now;
        // the loan write serializes racing returns; the loser conflicts here
        // before any stock change
        self.loan_repository.update(&loan).await?;
        let saved = self.loan_repository.get(loan_id).await?;

        let book = self.catalog_service.find_book_by_id(loan.book_id.as_str()).await?;
        let restocked = match self.reservation_service.find_earliest_pending(book.book_id.as_str()).await {
            Ok(Some(reservation)) => {
                // the returned copy is held for the earliest reserver instead
                // of going back on the shelf
                self.catalog_service.set_status(book.book_id.as_str(), ItemStatus::Reserved).await
                    .map(|_| Some(reservation))
            }
            Ok(None) => {
                self.catalog_service.adjust_stock(book.book_id.as_str(), 1).await.map(|_| None)
            }
            Err(err) => Err(err),
        };
        let held_for = match restocked {
            Ok(reservation) => reservation,
            Err(err) => {
                // reopen the loan so the copy is not stranded half-returned
                let mut reopened = saved;
                reopened.loan_status = LoanStatus::Issued;
                reopened.returned_at = None;
                reopened.fine_amount = prior_fine;
                reopened.updated_at = Utc::now().naive_utc();
                if let Err(revert_err) = self.loan_repository.update(&reopened).await {
                    warn!("failed to reopen loan {} after restock error: {}", loan_id, revert_err);
                }
                return Err(err);
            }
        };
        if let Some(reservation) = held_for {
            self.notify(reservation.member_id.as_str(),
                        format!("'{}' is now available for you to pick up", book.title).as_str()).await;
        }

        // clear notices about the title before delivering the thank-you note
        if let Err(err) = self.notifier.acknowledge(
            member_id, format!("'{}'", book.title).as_str()).await {
            warn!("failed to acknowledge notifications for member {}: {}", member_id, err);
        }
        self.notify(member_id, format!("Thank you for returning '{}'", book.title).as_str()).await;
        Ok(ReturnOutcome::finalized(overdue_days, recorded_fine, &saved))
    }

    async fn mark_lost(&self, loan_id: &str, member_id: &str) -> LendingResult<LoanEntity> {
        let mut loan = self.owned_open_loan(loan_id, member_id).await?;
        let book = self.catalog_service.find_book_by_id(loan.book_id.as_str()).await?;
        loan.loan_status = LoanStatus::Lost;
        loan.fine_amount = (book.replacement_price + LOST_ITEM_SURCHARGE).round_dp(2);
        loan.updated_at = Utc::now().naive_utc();
        self.loan_repository.update(&loan).await?;
        let saved = self.loan_repository.get(loan_id).await?;
        self.notify(member_id, format!("'{}' has been marked lost, a fee of {} was charged",
                                       book.title, saved.fine_amount).as_str()).await;
        Ok(saved)
    }

    async fn find_loan_by_id(&self, loan_id: &str) -> LendingResult<LoanEntity> {
        self.loan_repository.get(loan_id).await
    }

    async fn find_loans_by_member(&self, member_id: &str) -> LendingResult<Vec<LoanEntity>> {
        let predicate = HashMap::from([("member_id".to_string(), member_id.to_string())]);
        let mut loans = self.query_all(&predicate).await?;
        loans.sort_by(|a, b| a.issued_at.cmp(&b.issued_at));
        Ok(loans)
    }

    async fn query_overdue(&self) -> LendingResult<Vec<LoanEntity>> {
        let now = Utc::now().naive_utc();
        let predicate = HashMap::from([
            ("loan_status".to_string(), LoanStatus::Issued.to_string()),
            ("due_at:<=".to_string(), format!("{}", now.format(DATE_FMT))),
        ]);
        self.query_all(&predicate).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;
    use crate::catalog::domain::model::BookEntity;
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory as catalog_factory;
    use crate::circulation::domain::CirculationService;
    use crate::circulation::factory;
    use crate::core::lending::{ItemStatus, LendingError, LoanStatus, ReservationStatus, ReturnAction};
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::members::domain::model::{MemberEntity, MembershipTierEntity};
    use crate::members::domain::MemberService;
    use crate::members::factory as members_factory;
    use crate::notifications::domain::Notifier;
    use crate::notifications::factory as notifications_factory;
    use crate::reservations::domain::ReservationService;
    use crate::reservations::factory as reservations_factory;

    async fn build_service() -> Box<dyn CirculationService> {
        factory::create_circulation_service(RepositoryStore::Memory).await
    }

    // member on a tier allowing a couple of loans and a single renewal
    async fn add_member(max_loans: i64) -> MemberEntity {
        let member_svc = members_factory::create_member_service(RepositoryStore::Memory).await;
        let tier = member_svc.add_tier(&MembershipTierEntity::new("tier", max_loans, 14, 1)).await
            .expect("should add tier");
        member_svc.add_member(&MemberEntity::new("m@test.org", "member", Some(tier.tier_id.as_str()))).await
            .expect("should add member")
    }

    async fn add_book(total_copies: i64) -> BookEntity {
        let catalog_svc = catalog_factory::create_catalog_service(RepositoryStore::Memory).await;
        catalog_svc.add_book(&BookEntity::new(Uuid::new_v4().to_string().as_str(), "a title", total_copies)).await
            .expect("should add book")
    }

    async fn add_priced_book(total_copies: i64, replacement_price: rust_decimal::Decimal) -> BookEntity {
        let catalog_svc = catalog_factory::create_catalog_service(RepositoryStore::Memory).await;
        let mut book = BookEntity::new(Uuid::new_v4().to_string().as_str(), "a priced title", total_copies);
        book.replacement_price = replacement_price;
        catalog_svc.add_book(&book).await.expect("should add book")
    }

    async fn find_book(book_id: &str) -> BookEntity {
        let repo = catalog_factory::create_book_repository(RepositoryStore::Memory).await;
        repo.get(book_id).await.expect("should find book")
    }

    // pushes the due date into the past so a fine accrues
    async fn make_overdue(loan_id: &str, days: i64) {
        let repo = factory::create_loan_repository(RepositoryStore::Memory).await;
        let mut loan = repo.get(loan_id).await.expect("should find loan");
        loan.due_at = Utc::now().naive_utc() - Duration::days(days);
        repo.update(&loan).await.expect("should update loan");
    }

    #[tokio::test]
    async fn test_should_issue_book_and_decrement_stock() {
        let circulation_svc = build_service().await;
        let member = add_member(2).await;
        let book = add_book(2).await;
        let loan = circulation_svc.issue(member.member_id.as_str(), book.book_id.as_str()).await
            .expect("should issue");
        assert_eq!(LoanStatus::Issued, loan.loan_status);
        assert_eq!(loan.issued_at + Duration::days(book.loan_duration_days), loan.due_at);
        let stored = find_book(book.book_id.as_str()).await;
        assert_eq!(1, stored.available_copies);
        assert_eq!(ItemStatus::Available, stored.book_status);
    }

    #[tokio::test]
    async fn test_should_reject_issue_when_out_of_stock() {
        let circulation_svc = build_service().await;
        let member = add_member(2).await;
        let book = add_book(0).await;
        let res = circulation_svc.issue(member.member_id.as_str(), book.book_id.as_str()).await;
        assert!(matches!(res, Err(LendingError::OutOfStock { message: _ })));
    }

    #[tokio::test]
    async fn test_should_reject_issue_when_reserved_for_other() {
        let circulation_svc = build_service().await;
        let reservation_svc = reservations_factory::create_reservation_service(RepositoryStore::Memory).await;
        let reserver = add_member(2).await;
        let other = add_member(2).await;
        let book = add_book(0).await;
        let _ = reservation_svc.reserve(reserver.member_id.as_str(), book.book_id.as_str()).await
            .expect("should reserve");
        let res = circulation_svc.issue(other.member_id.as_str(), book.book_id.as_str()).await;
        assert!(matches!(res, Err(LendingError::ReservedForOther { message: _ })));
    }

    #[tokio::test]
    async fn test_should_reject_second_open_loan_for_same_book() {
        let circulation_svc = build_service().await;
        let member = add_member(5).await;
        let book = add_book(2).await;
        let _ = circulation_svc.issue(member.member_id.as_str(), book.book_id.as_str()).await
            .expect("should issue");
        let res = circulation_svc.issue(member.member_id.as_str(), book.book_id.as_str()).await;
        assert!(matches!(res, Err(LendingError::Validation { message: _, reason_code: _ })));
        // a closed loan does not block borrowing the title again
        let loans = circulation_svc.find_loans_by_member(member.member_id.as_str()).await.expect("should list");
        let open = loans.iter().filter(|l| l.book_id == book.book_id && l.is_open()).count();
        assert_eq!(1, open);
    }

    #[tokio::test]
    async fn test_should_not_leave_loan_behind_when_issues_race_for_last_copy() {
        for _round in 0..50 {
            let first = add_member(2).await;
            let second = add_member(2).await;
            let book = add_book(1).await;
            let issue = |member_id: String, book_id: String| async move {
                let circulation_svc = build_service().await;
                circulation_svc.issue(member_id.as_str(), book_id.as_str()).await
            };
            let racer = tokio::spawn(issue(first.member_id.clone(), book.book_id.clone()));
            let other = tokio::spawn(issue(second.member_id.clone(), book.book_id.clone()));
            let outcomes = vec![racer.await.expect("should join"), other.await.expect("should join")];
            let issued = outcomes.iter().filter(|r| r.is_ok()).count();
            assert_eq!(1, issued);

            // the loser must not leave a loan row behind
            let repo = factory::create_loan_repository(RepositoryStore::Memory).await;
            let predicate = HashMap::from([
                ("book_id".to_string(), book.book_id.clone()),
                ("loan_status".to_string(), LoanStatus::Issued.to_string()),
            ]);
            let open = repo.query(&predicate, None, 10).await.expect("should query").records;
            assert_eq!(1, open.len());
            let stored = find_book(book.book_id.as_str()).await;
            assert_eq!(0, stored.available_copies);
        }
    }

    #[tokio::test]
    async fn test_should_reject_issue_over_loan_limit() {
        let circulation_svc = build_service().await;
        let member = add_member(1).await;
        let first = add_book(1).await;
        let second = add_book(1).await;
        let _ = circulation_svc.issue(member.member_id.as_str(), first.book_id.as_str()).await
            .expect("should issue");
        let res = circulation_svc.issue(member.member_id.as_str(), second.book_id.as_str()).await;
        assert!(matches!(res, Err(LendingError::LimitReached { message: _ })));
    }

    #[tokio::test]
    async fn test_should_reject_issue_for_tierless_member() {
        let circulation_svc = build_service().await;
        let member_svc = members_factory::create_member_service(RepositoryStore::Memory).await;
        let member = member_svc.add_member(&MemberEntity::new("t@test.org", "tierless", None)).await
            .expect("should add member");
        let book = add_book(1).await;
        let res = circulation_svc.issue(member.member_id.as_str(), book.book_id.as_str()).await;
        assert!(matches!(res, Err(LendingError::LimitReached { message: _ })));
    }

    #[tokio::test]
    async fn test_should_renew_and_extend_due_date() {
        let circulation_svc = build_service().await;
        let member = add_member(2).await;
        let book = add_book(1).await;
        let loan = circulation_svc.issue(member.member_id.as_str(), book.book_id.as_str()).await
            .expect("should issue");
        let renewed = circulation_svc.renew(loan.loan_id.as_str(), member.member_id.as_str()).await
            .expect("should renew");
        assert_eq!(loan.due_at + Duration::days(14), renewed.due_at);
        assert_eq!(1, renewed.renewal_count);
    }

    #[tokio::test]
    async fn test_should_reject_renew_past_limit() {
        let circulation_svc = build_service().await;
        let member = add_member(2).await;
        let book = add_book(1).await;
        let loan = circulation_svc.issue(member.member_id.as_str(), book.book_id.as_str()).await
            .expect("should issue");
        let _ = circulation_svc.renew(loan.loan_id.as_str(), member.member_id.as_str()).await
            .expect("should renew");
        let res = circulation_svc.renew(loan.loan_id.as_str(), member.member_id.as_str()).await;
        assert!(matches!(res, Err(LendingError::RenewalLimit { message: _ })));
    }

    #[tokio::test]
    async fn test_should_reject_renew_when_reserved() {
        let circulation_svc = build_service().await;
        let reservation_svc = reservations_factory::create_reservation_service(RepositoryStore::Memory).await;
        let member = add_member(2).await;
        let reserver = add_member(2).await;
        let book = add_book(1).await;
        let loan = circulation_svc.issue(member.member_id.as_str(), book.book_id.as_str()).await
            .expect("should issue");
        let _ = reservation_svc.reserve(reserver.member_id.as_str(), book.book_id.as_str()).await
            .expect("should reserve");
        let res = circulation_svc.renew(loan.loan_id.as_str(), member.member_id.as_str()).await;
        assert!(matches!(res, Err(LendingError::ReservedByOther { message: _ })));
    }

    #[tokio::test]
    async fn test_should_return_on_time_without_fine() {
        let circulation_svc = build_service().await;
        let member = add_member(2).await;
        let book = add_book(1).await;
        let loan = circulation_svc.issue(member.member_id.as_str(), book.book_id.as_str()).await
            .expect("should issue");
        let outcome = circulation_svc.return_book(loan.loan_id.as_str(), member.member_id.as_str(), ReturnAction::Return).await
            .expect("should return");
        assert!(outcome.finalized);
        assert!(!outcome.confirmation_required);
        assert_eq!(dec!(0.00), outcome.fine_amount);
        let returned = outcome.loan.expect("should carry loan");
        assert_eq!(LoanStatus::Returned, returned.loan_status);
        assert!(returned.returned_at.is_some());
        let stored = find_book(book.book_id.as_str()).await;
        assert_eq!(1, stored.available_copies);
    }

    #[tokio::test]
    async fn test_should_require_confirmation_for_overdue_return() {
        let circulation_svc = build_service().await;
        let member = add_member(2).await;
        let book = add_book(1).await;
        let loan = circulation_svc.issue(member.member_id.as_str(), book.book_id.as_str()).await
            .expect("should issue");
        make_overdue(loan.loan_id.as_str(), 2).await;
        let outcome = circulation_svc.return_book(loan.loan_id.as_str(), member.member_id.as_str(), ReturnAction::Return).await
            .expect("should answer");
        assert!(!outcome.finalized);
        assert!(outcome.confirmation_required);
        assert_eq!(2, outcome.overdue_days);
        assert_eq!(dec!(2.00), outcome.fine_amount);
        assert!(outcome.loan.is_none());
        // nothing was written, the loan is still open
        let open = circulation_svc.find_loan_by_id(loan.loan_id.as_str()).await.expect("should find loan");
        assert_eq!(LoanStatus::Issued, open.loan_status);
        let stored = find_book(book.book_id.as_str()).await;
        assert_eq!(0, stored.available_copies);
    }

    #[tokio::test]
    async fn test_should_waive_fine_when_paying_now() {
        let circulation_svc = build_service().await;
        let member = add_member(2).await;
        let book = add_book(1).await;
        let loan = circulation_svc.issue(member.member_id.as_str(), book.book_id.as_str()).await
            .expect("should issue");
        make_overdue(loan.loan_id.as_str(), 3).await;
        let outcome = circulation_svc.return_book(loan.loan_id.as_str(), member.member_id.as_str(), ReturnAction::ReturnPayNow).await
            .expect("should return");
        assert!(outcome.finalized);
        assert_eq!(dec!(0.00), outcome.fine_amount);
        assert_eq!(dec!(0.00), outcome.loan.expect("should carry loan").fine_amount);
    }

    #[tokio::test]
    async fn test_should_record_fine_when_paying_later() {
        let circulation_svc = build_service().await;
        let member = add_member(2).await;
        let book = add_book(1).await;
        let loan = circulation_svc.issue(member.member_id.as_str(), book.book_id.as_str()).await
            .expect("should issue");
        make_overdue(loan.loan_id.as_str(), 3).await;
        let outcome = circulation_svc.return_book(loan.loan_id.as_str(), member.member_id.as_str(), ReturnAction::ReturnPayLater).await
            .expect("should return");
        assert!(outcome.finalized);
        assert_eq!(3, outcome.overdue_days);
        assert_eq!(dec!(3.00), outcome.fine_amount);
        assert_eq!(dec!(3.00), outcome.loan.expect("should carry loan").fine_amount);
    }

    #[tokio::test]
    async fn test_should_reject_double_return() {
        let circulation_svc = build_service().await;
        let member = add_member(2).await;
        let book = add_book(1).await;
        let loan = circulation_svc.issue(member.member_id.as_str(), book.book_id.as_str()).await
            .expect("should issue");
        let _ = circulation_svc.return_book(loan.loan_id.as_str(), member.member_id.as_str(), ReturnAction::Return).await
            .expect("should return");
        let res = circulation_svc.return_book(loan.loan_id.as_str(), member.member_id.as_str(), ReturnAction::Return).await;
        assert!(matches!(res, Err(LendingError::InvalidState { message: _ })));
    }

    #[tokio::test]
    async fn test_should_hold_returned_copy_for_earliest_reserver() {
        let circulation_svc = build_service().await;
        let reservation_svc = reservations_factory::create_reservation_service(RepositoryStore::Memory).await;
        let notifier = notifications_factory::create_notifier(RepositoryStore::Memory).await;
        let borrower = add_member(2).await;
        let first_reserver = add_member(2).await;
        let second_reserver = add_member(2).await;
        let book = add_book(1).await;
        let loan = circulation_svc.issue(borrower.member_id.as_str(), book.book_id.as_str()).await
            .expect("should issue");
        let _ = reservation_svc.reserve(first_reserver.member_id.as_str(), book.book_id.as_str()).await
            .expect("should reserve");
        let _ = reservation_svc.reserve(second_reserver.member_id.as_str(), book.book_id.as_str()).await
            .expect("should reserve");

        let outcome = circulation_svc.return_book(loan.loan_id.as_str(), borrower.member_id.as_str(), ReturnAction::Return).await
            .expect("should return");
        assert!(outcome.finalized);

        // the copy is pinned for pickup instead of going back on the shelf
        let stored = find_book(book.book_id.as_str()).await;
        assert_eq!(ItemStatus::Reserved, stored.book_status);
        assert_eq!(0, stored.available_copies);

        let first_inbox = notifier.find_by_member(first_reserver.member_id.as_str()).await.expect("should list");
        assert!(first_inbox.iter().any(|n| n.message.contains("available for you to pick up")));
        let second_inbox = notifier.find_by_member(second_reserver.member_id.as_str()).await.expect("should list");
        assert!(!second_inbox.iter().any(|n| n.message.contains("available for you to pick up")));
    }

    #[tokio::test]
    async fn test_should_fulfill_reservation_on_pickup() {
        let circulation_svc = build_service().await;
        let reservation_svc = reservations_factory::create_reservation_service(RepositoryStore::Memory).await;
        let borrower = add_member(2).await;
        let reserver = add_member(2).await;
        let book = add_book(1).await;
        let loan = circulation_svc.issue(borrower.member_id.as_str(), book.book_id.as_str()).await
            .expect("should issue");
        let reservation = reservation_svc.reserve(reserver.member_id.as_str(), book.book_id.as_str()).await
            .expect("should reserve");
        let _ = circulation_svc.return_book(loan.loan_id.as_str(), borrower.member_id.as_str(), ReturnAction::Return).await
            .expect("should return");

        let pickup = circulation_svc.issue(reserver.member_id.as_str(), book.book_id.as_str()).await
            .expect("should issue held copy");
        assert_eq!(LoanStatus::Issued, pickup.loan_status);

        let stored = find_book(book.book_id.as_str()).await;
        assert_eq!(0, stored.available_copies);
        assert_eq!(ItemStatus::OutOfStock, stored.book_status);

        let fulfilled = reservation_svc.find_earliest_pending(book.book_id.as_str()).await.expect("should query");
        assert!(fulfilled.is_none());
        let repo = reservations_factory::create_reservation_repository(RepositoryStore::Memory).await;
        let stored_reservation = repo.get(reservation.reservation_id.as_str()).await.expect("should find reservation");
        assert_eq!(ReservationStatus::Fulfilled, stored_reservation.reservation_status);
    }

    #[tokio::test]
    async fn test_should_acknowledge_overdue_notices_on_return() {
        let circulation_svc = build_service().await;
        let notifier = notifications_factory::create_notifier(RepositoryStore::Memory).await;
        let member = add_member(2).await;
        let book = add_book(1).await;
        let loan = circulation_svc.issue(member.member_id.as_str(), book.book_id.as_str()).await
            .expect("should issue");
        let _ = notifier.deliver(member.member_id.as_str(),
                                 format!("'{}' is overdue, please return it", book.title).as_str()).await
            .expect("should deliver");
        let _ = circulation_svc.return_book(loan.loan_id.as_str(), member.member_id.as_str(), ReturnAction::Return).await
            .expect("should return");
        let inbox = notifier.find_by_member(member.member_id.as_str()).await.expect("should list");
        let overdue: Vec<_> = inbox.iter().filter(|n| n.message.contains("overdue")).collect();
        assert!(!overdue.is_empty());
        assert!(overdue.iter().all(|n| n.is_read));
        // the thank-you note is delivered after the sweep and stays unread
        let thanks: Vec<_> = inbox.iter().filter(|n| n.message.contains("Thank you")).collect();
        assert!(!thanks.is_empty());
        assert!(thanks.iter().all(|n| !n.is_read));
    }

    #[tokio::test]
    async fn test_should_charge_replacement_and_surcharge_for_lost_copy() {
        let circulation_svc = build_service().await;
        let member = add_member(2).await;
        let book = add_priced_book(1, dec!(42.50)).await;
        let loan = circulation_svc.issue(member.member_id.as_str(), book.book_id.as_str()).await
            .expect("should issue");
        let lost = circulation_svc.mark_lost(loan.loan_id.as_str(), member.member_id.as_str()).await
            .expect("should mark lost");
        assert_eq!(LoanStatus::Lost, lost.loan_status);
        assert_eq!(dec!(47.50), lost.fine_amount);
        assert_eq!(None, lost.returned_at);
        // the copy never comes back, stock stays down
        let stored = find_book(book.book_id.as_str()).await;
        assert_eq!(0, stored.available_copies);
    }

    #[tokio::test]
    async fn test_should_list_overdue_loans() {
        let circulation_svc = build_service().await;
        let member = add_member(2).await;
        let book = add_book(1).await;
        let loan = circulation_svc.issue(member.member_id.as_str(), book.book_id.as_str()).await
            .expect("should issue");
        make_overdue(loan.loan_id.as_str(), 1).await;
        let overdue = circulation_svc.query_overdue().await.expect("should query");
        assert!(overdue.iter().any(|l| l.loan_id == loan.loan_id));
    }

    #[tokio::test]
    async fn test_should_list_member_loans() {
        let circulation_svc = build_service().await;
        let member = add_member(2).await;
        let first = add_book(1).await;
        let second = add_book(1).await;
        let _ = circulation_svc.issue(member.member_id.as_str(), first.book_id.as_str()).await
            .expect("should issue");
        let _ = circulation_svc.issue(member.member_id.as_str(), second.book_id.as_str()).await
            .expect("should issue");
        let loans = circulation_svc.find_loans_by_member(member.member_id.as_str()).await.expect("should list");
        assert_eq!(2, loans.len());
    }
}
