//! # dirhub-database
//!
//! Persistence for DirHub. The [`store::DirectoryStore`] contract hands out
//! one [`store::UnitOfWork`] per service operation; it is implemented by a
//! PostgreSQL store (one `sqlx` transaction per unit of work) and by an
//! in-memory arena store used for development and tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod repositories;
pub mod store;

pub use connection::create_pool;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{DirectoryStore, UnitOfWork};
