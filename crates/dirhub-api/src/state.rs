//! Application state shared across all handlers.

use std::sync::Arc;

use dirhub_core::config::AppConfig;
use dirhub_service::DirectoryService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState<S>>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug)]
pub struct AppState<S> {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Directory service
    pub directory_service: Arc<DirectoryService<S>>,
}

impl<S> AppState<S> {
    /// Bundle configuration and service.
    pub fn new(config: AppConfig, directory_service: DirectoryService<S>) -> Self {
        Self {
            config: Arc::new(config),
            directory_service: Arc::new(directory_service),
        }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            directory_service: Arc::clone(&self.directory_service),
        }
    }
}
