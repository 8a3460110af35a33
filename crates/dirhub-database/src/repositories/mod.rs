//! PostgreSQL repositories.
//!
//! Each repository borrows the connection of an open transaction, so every
//! query issued by one service operation lands in the same unit of work.

pub mod directory;
pub mod grant;
pub mod reference;

pub use directory::DirectoryRepository;
pub use grant::GrantRepository;
pub use reference::ReferenceRepository;

use dirhub_core::types::DirectoryId;

/// Convert typed IDs into the `BIGINT[]` parameter used with `= ANY($1)`.
pub(crate) fn raw_ids(ids: &[DirectoryId]) -> Vec<i64> {
    ids.iter().map(|id| id.get()).collect()
}
