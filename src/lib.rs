pub mod core;
pub mod utils;
pub mod catalog;
pub mod members;
pub mod circulation;
pub mod reservations;
pub mod notifications;
pub mod config;
