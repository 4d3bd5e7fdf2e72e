use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

// LendingError covers the expected business outcomes of circulation operations
// (issue/renew/return/mark-lost/reserve) alongside infrastructure failures.
// Business variants are recovered at the operation boundary and never treated
// as faults; only storage-level errors may be retryable.
#[derive(Debug)]
pub enum LendingError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    // Raised when an optimistic version check fails because another operation
    // committed first. The caller can retry the whole operation.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
    OutOfStock {
        message: String,
    },
    ReservedForOther {
        message: String,
    },
    LimitReached {
        message: String,
    },
    RenewalLimit {
        message: String,
    },
    ReservedByOther {
        message: String,
    },
    ItemAlreadyAvailable {
        message: String,
    },
    DuplicateReservation {
        message: String,
    },
    InvalidState {
        message: String,
    },
}

impl LendingError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> LendingError {
        LendingError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn duplicate_key(message: &str) -> LendingError {
        LendingError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LendingError {
        LendingError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LendingError {
        LendingError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> LendingError {
        if retryable {
            LendingError::unavailable(
                format!("ddb database unavailable error {:?} {:?}", message, reason).as_str(), reason, true)
        } else if let Some(ref reason_val) = reason {
            if reason_val.as_str().contains("404") {
                LendingError::not_found(
                    format!("not found error {:?} {:?}", message, reason).as_str())
            } else {
                LendingError::database(
                    format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
            }
        } else {
            LendingError::database(
                format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
        }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LendingError {
        LendingError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LendingError {
        LendingError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LendingError {
        LendingError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn out_of_stock(message: &str) -> LendingError {
        LendingError::OutOfStock { message: message.to_string() }
    }

    pub fn reserved_for_other(message: &str) -> LendingError {
        LendingError::ReservedForOther { message: message.to_string() }
    }

    pub fn limit_reached(message: &str) -> LendingError {
        LendingError::LimitReached { message: message.to_string() }
    }

    pub fn renewal_limit(message: &str) -> LendingError {
        LendingError::RenewalLimit { message: message.to_string() }
    }

    pub fn reserved_by_other(message: &str) -> LendingError {
        LendingError::ReservedByOther { message: message.to_string() }
    }

    pub fn item_already_available(message: &str) -> LendingError {
        LendingError::ItemAlreadyAvailable { message: message.to_string() }
    }

    pub fn duplicate_reservation(message: &str) -> LendingError {
        LendingError::DuplicateReservation { message: message.to_string() }
    }

    pub fn invalid_state(message: &str) -> LendingError {
        LendingError::InvalidState { message: message.to_string() }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LendingError::Database { retryable, .. } => { *retryable }
            LendingError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            _ => { false }
        }
    }
}

impl From<std::io::Error> for LendingError {
    fn from(err: std::io::Error) -> Self {
        LendingError::runtime(
            format!("serde io {:?}", err).as_str(), None)
    }
}

impl From<serde_json::Error> for LendingError {
    fn from(err: serde_json::Error) -> Self {
        LendingError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for LendingError {
    fn from(err: String) -> Self {
        LendingError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for LendingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LendingError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LendingError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LendingError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LendingError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LendingError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LendingError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LendingError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LendingError::OutOfStock { message } => {
                write!(f, "{}", message)
            }
            LendingError::ReservedForOther { message } => {
                write!(f, "{}", message)
            }
            LendingError::LimitReached { message } => {
                write!(f, "{}", message)
            }
            LendingError::RenewalLimit { message } => {
                write!(f, "{}", message)
            }
            LendingError::ReservedByOther { message } => {
                write!(f, "{}", message)
            }
            LendingError::ItemAlreadyAvailable { message } => {
                write!(f, "{}", message)
            }
            LendingError::DuplicateReservation { message } => {
                write!(f, "{}", message)
            }
            LendingError::InvalidState { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

/// A specialized Result type for circulation operations and repositories.
pub type LendingResult<T> = Result<T, LendingError>;

// It defines abstraction for paginated result
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    // The page number or token
    pub page: Option<String>,
    // page size
    pub page_size: usize,
    // Next page if available
    pub next_page: Option<String>,
    // list of records
    pub records: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub(crate) fn new(page: Option<&str>, page_size: usize,
                      next_page: Option<String>, records: Vec<T>) -> Self {
        PaginatedResult {
            page: page.map(str::to_string),
            page_size,
            next_page,
            records,
        }
    }
}

// ItemStatus is derived from the copy counts except for Reserved, which pins
// a returned copy to the head reserver and is set only by the return path.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub(crate) enum ItemStatus {
    Available,
    OutOfStock,
    Reserved,
}

impl From<String> for ItemStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Available" => ItemStatus::Available,
            "OutOfStock" => ItemStatus::OutOfStock,
            "Reserved" => ItemStatus::Reserved,
            _ => ItemStatus::Available,
        }
    }
}

impl Display for ItemStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ItemStatus::Available => write!(f, "Available"),
            ItemStatus::OutOfStock => write!(f, "OutOfStock"),
            ItemStatus::Reserved => write!(f, "Reserved"),
        }
    }
}

// LoanStatus transitions: Issued -> Returned, Issued -> Lost. Both are
// terminal; nothing leaves Returned or Lost.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub(crate) enum LoanStatus {
    Issued,
    Returned,
    Lost,
}

impl From<String> for LoanStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Issued" => LoanStatus::Issued,
            "Returned" => LoanStatus::Returned,
            "Lost" => LoanStatus::Lost,
            _ => LoanStatus::Issued,
        }
    }
}

impl Display for LoanStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            LoanStatus::Issued => write!(f, "Issued"),
            LoanStatus::Returned => write!(f, "Returned"),
            LoanStatus::Lost => write!(f, "Lost"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub(crate) enum ReservationStatus {
    Pending,
    Fulfilled,
    Cancelled,
}

impl From<String> for ReservationStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Pending" => ReservationStatus::Pending,
            "Fulfilled" => ReservationStatus::Fulfilled,
            "Cancelled" => ReservationStatus::Cancelled,
            _ => ReservationStatus::Pending,
        }
    }
}

impl Display for ReservationStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ReservationStatus::Pending => write!(f, "Pending"),
            ReservationStatus::Fulfilled => write!(f, "Fulfilled"),
            ReservationStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

// ReturnAction drives the two-phase return confirmation: a plain Return with
// an outstanding fine mutates nothing and asks the caller to re-invoke with
// one of the pay variants.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub(crate) enum ReturnAction {
    Return,
    ReturnPayNow,
    ReturnPayLater,
}

impl From<String> for ReturnAction {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Return" => ReturnAction::Return,
            "ReturnPayNow" => ReturnAction::ReturnPayNow,
            "ReturnPayLater" => ReturnAction::ReturnPayLater,
            _ => ReturnAction::Return,
        }
    }
}

impl Display for ReturnAction {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ReturnAction::Return => write!(f, "Return"),
            ReturnAction::ReturnPayNow => write!(f, "ReturnPayNow"),
            ReturnAction::ReturnPayLater => write!(f, "ReturnPayLater"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::lending::{ItemStatus, LendingError, LoanStatus, ReservationStatus, ReturnAction};

    #[tokio::test]
    async fn test_should_create_database_error() {
        assert!(matches!(LendingError::database("test", None, false), LendingError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_duplicate_key_error() {
        assert!(matches!(LendingError::duplicate_key("test"), LendingError::DuplicateKey{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_not_found_error() {
        assert!(matches!(LendingError::not_found("test"), LendingError::NotFound{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_unavailable_error() {
        assert!(matches!(LendingError::unavailable("test", None, false), LendingError::CurrentlyUnavailable{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_validation_error() {
        assert!(matches!(LendingError::validation("test", None), LendingError::Validation{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_serialization_error() {
        assert!(matches!(LendingError::serialization("test"), LendingError::Serialization{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_runtime_error() {
        assert!(matches!(LendingError::runtime("test", None), LendingError::Runtime{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_business_errors() {
        assert!(matches!(LendingError::out_of_stock("test"), LendingError::OutOfStock{ message: _ }));
        assert!(matches!(LendingError::reserved_for_other("test"), LendingError::ReservedForOther{ message: _ }));
        assert!(matches!(LendingError::limit_reached("test"), LendingError::LimitReached{ message: _ }));
        assert!(matches!(LendingError::renewal_limit("test"), LendingError::RenewalLimit{ message: _ }));
        assert!(matches!(LendingError::reserved_by_other("test"), LendingError::ReservedByOther{ message: _ }));
        assert!(matches!(LendingError::item_already_available("test"), LendingError::ItemAlreadyAvailable{ message: _ }));
        assert!(matches!(LendingError::duplicate_reservation("test"), LendingError::DuplicateReservation{ message: _ }));
        assert!(matches!(LendingError::invalid_state("test"), LendingError::InvalidState{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_database_or_unavailable_error() {
        assert!(matches!(LendingError::database_or_unavailable("test", None, true), LendingError::CurrentlyUnavailable{ message: _, reason_code: _, retryable: _ }));
        assert!(matches!(LendingError::database_or_unavailable("test", Some("404".to_string()), false), LendingError::NotFound{ message: _ }));
        assert!(matches!(LendingError::database_or_unavailable("test", Some("500".to_string()), false), LendingError::Database{ message: _, reason_code: _, retryable: _ }));
        assert!(matches!(LendingError::database_or_unavailable("test", None, false), LendingError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_retryable_error() {
        assert_eq!(false, LendingError::database("test", None, false).retryable());
        assert_eq!(true, LendingError::database("test", None, true).retryable());
        assert_eq!(false, LendingError::unavailable("test", None, false).retryable());
        assert_eq!(true, LendingError::unavailable("test", None, true).retryable());
        assert_eq!(false, LendingError::out_of_stock("test").retryable());
        assert_eq!(false, LendingError::invalid_state("test").retryable());
    }

    #[tokio::test]
    async fn test_should_format_item_status() {
        let statuses = vec![
            ItemStatus::Available,
            ItemStatus::OutOfStock,
            ItemStatus::Reserved,
        ];
        for status in statuses {
            let str = status.to_string();
            let str_status = ItemStatus::from(str);
            assert_eq!(status, str_status);
        }
    }

    #[tokio::test]
    async fn test_should_format_loan_status() {
        let statuses = vec![
            LoanStatus::Issued,
            LoanStatus::Returned,
            LoanStatus::Lost,
        ];
        for status in statuses {
            let str = status.to_string();
            let str_status = LoanStatus::from(str);
            assert_eq!(status, str_status);
        }
    }

    #[tokio::test]
    async fn test_should_format_reservation_status() {
        let statuses = vec![
            ReservationStatus::Pending,
            ReservationStatus::Fulfilled,
            ReservationStatus::Cancelled,
        ];
        for status in statuses {
            let str = status.to_string();
            let str_status = ReservationStatus::from(str);
            assert_eq!(status, str_status);
        }
    }

    #[tokio::test]
    async fn test_should_format_return_action() {
        let actions = vec![
            ReturnAction::Return,
            ReturnAction::ReturnPayNow,
            ReturnAction::ReturnPayLater,
        ];
        for action in actions {
            let str = action.to_string();
            let str_action = ReturnAction::from(str);
            assert_eq!(action, str_action);
        }
    }
}
