pub mod cancel_reservation_cmd;
pub mod reserve_book_cmd;
