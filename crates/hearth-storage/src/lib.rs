//! Hearth storage crate - SQLite persistence for people, account types,
//! and accounts.
//!
//! Provides a WAL-mode SQLite database with versioned migrations and
//! repository implementations for the three entity kinds.

pub mod db;
pub mod migrations;
pub mod repository;

pub use db::Database;
pub use repository::{AccountRepository, AccountTypeRepository, PersonRepository};
