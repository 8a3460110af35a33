//! Directory authority handlers.

use axum::Json;
use axum::extract::State;

use dirhub_core::types::{DirectoryId, UserId};
use dirhub_database::store::DirectoryStore;
use dirhub_service::{GrantSummary, OperationStatus, UserAuthority, UserDirectoryGrant};

use crate::dto::response::ApiResponse;
use crate::extractors::{ApiJson, ApiPath};
use crate::handlers::ApiResult;
use crate::state::AppState;

/// POST /api/directories/{id}/authorities
pub async fn assign_authority<S: DirectoryStore>(
    State(state): State<AppState<S>>,
    ApiPath(id): ApiPath<DirectoryId>,
    ApiJson(entries): ApiJson<Vec<UserAuthority>>,
) -> ApiResult<Json<ApiResponse<OperationStatus>>> {
    let status = state
        .directory_service
        .assign_authority(&entries, id)
        .await?;
    Ok(Json(ApiResponse::ok(status)))
}

/// GET /api/directories/authorities
pub async fn list_directory_users<S: DirectoryStore>(
    State(state): State<AppState<S>>,
) -> ApiResult<Json<ApiResponse<Vec<GrantSummary>>>> {
    let grants = state.directory_service.list_directory_users().await?;
    Ok(Json(ApiResponse::ok(grants)))
}

/// GET /api/users/{user_id}/directories
pub async fn list_user_directories<S: DirectoryStore>(
    State(state): State<AppState<S>>,
    ApiPath(user_id): ApiPath<UserId>,
) -> ApiResult<Json<ApiResponse<Vec<UserDirectoryGrant>>>> {
    let grants = state
        .directory_service
        .list_authority_directories_for_user(user_id)
        .await?;
    Ok(Json(ApiResponse::ok(grants)))
}
