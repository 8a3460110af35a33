//! Route definitions for the DirHub HTTP API.
//!
//! All routes are organized by resource and mounted under `/api`.

use axum::{
    Router,
    routing::{get, post},
};

use dirhub_database::store::DirectoryStore;

use crate::handlers;
use crate::state::AppState;

/// Build the API router and thread `state` through every route.
pub fn build_router<S: DirectoryStore>(state: AppState<S>) -> Router {
    let api_routes = Router::new()
        .merge(directory_routes())
        .merge(project_routes())
        .merge(user_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Directory endpoints: CRUD, children, tree, authorities
fn directory_routes<S: DirectoryStore>() -> Router<AppState<S>> {
    use handlers::authority as auth;
    use handlers::directory as dir;

    Router::new()
        .route(
            "/directories",
            get(dir::list_directories::<S>).post(dir::create_root_directory::<S>),
        )
        .route(
            "/directories/authorities",
            get(auth::list_directory_users::<S>),
        )
        .route(
            "/directories/{id}",
            get(dir::get_directory::<S>)
                .put(dir::rename_directory::<S>)
                .delete(dir::delete_directory::<S>),
        )
        .route(
            "/directories/{id}/children",
            get(dir::list_children::<S>).post(dir::create_child_directory::<S>),
        )
        .route("/directories/{id}/tree", get(dir::get_tree::<S>))
        .route(
            "/directories/{id}/authorities",
            post(auth::assign_authority::<S>),
        )
}

/// Project and task directory creation
fn project_routes<S: DirectoryStore>() -> Router<AppState<S>> {
    use handlers::directory as dir;

    Router::new()
        .route(
            "/projects/{project_id}/directories",
            post(dir::create_project_directory::<S>),
        )
        .route(
            "/projects/{project_id}/tasks/{task_id}/directories",
            post(dir::create_task_directory::<S>),
        )
}

/// Per-user authority listing
fn user_routes<S: DirectoryStore>() -> Router<AppState<S>> {
    Router::new().route(
        "/users/{user_id}/directories",
        get(handlers::authority::list_user_directories::<S>),
    )
}

/// Health check
fn health_routes<S: DirectoryStore>() -> Router<AppState<S>> {
    Router::new().route("/health", get(handlers::health::health::<S>))
}
