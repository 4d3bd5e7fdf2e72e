use async_trait::async_trait;
use crate::core::lending::LendingError;

#[derive(Debug)]
pub enum CommandError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Conflict {
        message: String,
    },
    NotFound {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LendingError> for CommandError {
    fn from(other: LendingError) -> Self {
        match other {
            LendingError::Database { message, reason_code, retryable } => {
                CommandError::Database { message, reason_code, retryable }
            }
            LendingError::DuplicateKey { message } => {
                CommandError::Conflict { message }
            }
            LendingError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LendingError::CurrentlyUnavailable { message, reason_code, retryable } => {
                CommandError::Runtime { message, reason_code, retryable }
            }
            LendingError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LendingError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LendingError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code, retryable: true }
            }
            LendingError::OutOfStock { message } => {
                CommandError::Validation { message, reason_code: Some("OUT_OF_STOCK".to_string()) }
            }
            LendingError::ReservedForOther { message } => {
                CommandError::Validation { message, reason_code: Some("RESERVED_FOR_OTHER".to_string()) }
            }
            LendingError::LimitReached { message } => {
                CommandError::Validation { message, reason_code: Some("LIMIT_REACHED".to_string()) }
            }
            LendingError::RenewalLimit { message } => {
                CommandError::Validation { message, reason_code: Some("RENEWAL_LIMIT".to_string()) }
            }
            LendingError::ReservedByOther { message } => {
                CommandError::Validation { message, reason_code: Some("RESERVED_BY_OTHER".to_string()) }
            }
            LendingError::ItemAlreadyAvailable { message } => {
                CommandError::Validation { message, reason_code: Some("ITEM_ALREADY_AVAILABLE".to_string()) }
            }
            LendingError::DuplicateReservation { message } => {
                CommandError::Conflict { message }
            }
            LendingError::InvalidState { message } => {
                CommandError::Validation { message, reason_code: Some("INVALID_STATE".to_string()) }
            }
        }
    }
}
