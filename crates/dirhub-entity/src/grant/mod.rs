//! Directory access grant entities.

pub mod model;

pub use model::{CreateDirectoryGrant, DirectoryGrant};
