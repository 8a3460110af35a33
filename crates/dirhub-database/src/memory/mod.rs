//! In-memory store with the same visibility and atomicity rules as the
//! PostgreSQL store.

pub mod arena;
pub mod store;

pub use arena::DirectoryArena;
pub use store::{MemoryStore, MemoryUnitOfWork};
