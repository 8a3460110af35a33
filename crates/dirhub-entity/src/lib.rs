//! # dirhub-entity
//!
//! Domain entity models for DirHub. Every struct in this crate represents
//! a database table row, an insert payload, or a domain view object.
//! Table rows derive `sqlx::FromRow`.

pub mod directory;
pub mod grant;

pub use directory::{CreateDirectory, Directory, DirectoryNode};
pub use grant::{CreateDirectoryGrant, DirectoryGrant};
