//! Directory domain entities.

pub mod model;
pub mod tree;

pub use model::{CreateDirectory, Directory};
pub use tree::DirectoryNode;
