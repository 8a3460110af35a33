//! Directory CRUD and tree handlers.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use dirhub_core::types::{DirectoryId, ProjectId, TaskId};
use dirhub_database::store::DirectoryStore;
use dirhub_entity::directory::{Directory, DirectoryNode};
use dirhub_service::{
    CreateDirectoryRequest, DirectorySummary, OperationStatus, RenameDirectoryRequest,
};

use crate::dto::request::{CreateDirectoryBody, CreateProjectDirectoryBody, RenameDirectoryBody};
use crate::dto::response::ApiResponse;
use crate::extractors::{ApiJson, ApiPath};
use crate::handlers::ApiResult;
use crate::state::AppState;

/// GET /api/directories
pub async fn list_directories<S: DirectoryStore>(
    State(state): State<AppState<S>>,
) -> ApiResult<Json<ApiResponse<Vec<DirectorySummary>>>> {
    let dirs = state.directory_service.list_all().await?;
    Ok(Json(ApiResponse::ok(dirs)))
}

/// POST /api/directories
pub async fn create_root_directory<S: DirectoryStore>(
    State(state): State<AppState<S>>,
    ApiJson(req): ApiJson<CreateDirectoryBody>,
) -> ApiResult<Json<ApiResponse<Directory>>> {
    req.validate()?;

    let dir = state
        .directory_service
        .create_root(CreateDirectoryRequest::new(req.name))
        .await?;
    Ok(Json(ApiResponse::ok(dir)))
}

/// GET /api/directories/{id}
pub async fn get_directory<S: DirectoryStore>(
    State(state): State<AppState<S>>,
    ApiPath(id): ApiPath<DirectoryId>,
) -> ApiResult<Json<ApiResponse<Directory>>> {
    let dir = state.directory_service.get(id).await?;
    Ok(Json(ApiResponse::ok(dir)))
}

/// PUT /api/directories/{id}
pub async fn rename_directory<S: DirectoryStore>(
    State(state): State<AppState<S>>,
    ApiPath(id): ApiPath<DirectoryId>,
    ApiJson(req): ApiJson<RenameDirectoryBody>,
) -> ApiResult<Json<ApiResponse<OperationStatus>>> {
    req.validate()?;

    let status = state
        .directory_service
        .rename(RenameDirectoryRequest::new(req.name), id)
        .await?;
    Ok(Json(ApiResponse::ok(status)))
}

/// DELETE /api/directories/{id}
pub async fn delete_directory<S: DirectoryStore>(
    State(state): State<AppState<S>>,
    ApiPath(id): ApiPath<DirectoryId>,
) -> ApiResult<Json<ApiResponse<OperationStatus>>> {
    let status = state.directory_service.remove(id).await?;
    Ok(Json(ApiResponse::ok(status)))
}

/// POST /api/directories/{id}/children
pub async fn create_child_directory<S: DirectoryStore>(
    State(state): State<AppState<S>>,
    ApiPath(id): ApiPath<DirectoryId>,
    ApiJson(req): ApiJson<CreateDirectoryBody>,
) -> ApiResult<Json<ApiResponse<OperationStatus>>> {
    req.validate()?;

    let status = state
        .directory_service
        .create(CreateDirectoryRequest::new(req.name), id)
        .await?;
    Ok(Json(ApiResponse::ok(status)))
}

/// GET /api/directories/{id}/children
pub async fn list_children<S: DirectoryStore>(
    State(state): State<AppState<S>>,
    ApiPath(id): ApiPath<DirectoryId>,
) -> ApiResult<Json<ApiResponse<Vec<DirectorySummary>>>> {
    let children = state.directory_service.list_children(id).await?;
    Ok(Json(ApiResponse::ok(children)))
}

/// GET /api/directories/{id}/tree
pub async fn get_tree<S: DirectoryStore>(
    State(state): State<AppState<S>>,
    ApiPath(id): ApiPath<DirectoryId>,
) -> ApiResult<Json<ApiResponse<DirectoryNode>>> {
    let tree = state.directory_service.tree(id).await?;
    Ok(Json(ApiResponse::ok(tree)))
}

/// POST /api/projects/{project_id}/directories
pub async fn create_project_directory<S: DirectoryStore>(
    State(state): State<AppState<S>>,
    ApiPath(project_id): ApiPath<ProjectId>,
    ApiJson(req): ApiJson<CreateProjectDirectoryBody>,
) -> ApiResult<Json<ApiResponse<Directory>>> {
    req.validate()?;

    let dir = state
        .directory_service
        .create_for_project(CreateDirectoryRequest::new(req.name), req.parent_id, project_id)
        .await?;
    Ok(Json(ApiResponse::ok(dir)))
}

/// POST /api/projects/{project_id}/tasks/{task_id}/directories
pub async fn create_task_directory<S: DirectoryStore>(
    State(state): State<AppState<S>>,
    ApiPath((project_id, task_id)): ApiPath<(ProjectId, TaskId)>,
    ApiJson(req): ApiJson<CreateDirectoryBody>,
) -> ApiResult<Json<ApiResponse<Directory>>> {
    req.validate()?;

    let dir = state
        .directory_service
        .create_for_task(CreateDirectoryRequest::new(req.name), task_id, project_id)
        .await?;
    Ok(Json(ApiResponse::ok(dir)))
}
