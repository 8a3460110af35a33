//! # dirhub-api
//!
//! HTTP API layer for DirHub built on Axum.
//!
//! Exposes the directory service over REST, maps [`AppError`] onto HTTP
//! status codes, and wraps every success body in the
//! `{ "success": true, "data": ... }` envelope.
//!
//! [`AppError`]: dirhub_core::AppError

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
