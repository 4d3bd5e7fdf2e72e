pub mod command;
pub mod controller;
pub mod domain;
pub mod lending;
pub mod repository;
