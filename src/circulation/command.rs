pub mod issue_book_cmd;
pub mod mark_lost_cmd;
pub mod renew_loan_cmd;
pub mod return_book_cmd;
