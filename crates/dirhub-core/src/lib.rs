//! # dirhub-core
//!
//! Core crate for DirHub. Contains configuration schemas, typed
//! surrogate identifiers, and the unified error system.
//!
//! This crate has **no** internal dependencies on other DirHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
