//! Staff management handlers.
//!
//! Capability checks happen in the route guard; handlers only enforce
//! rules that depend on the request body.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use pharmacy_auth::accounts::NewAccount;

use crate::dto::request::{CreateUserRequest, UpdateAccessRequest, UserListQuery, validate};
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, ApiError> {
    let users = state.accounts.list(query.role).await?;
    Ok(Json(ApiResponse::ok(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// POST /api/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    validate(&req)?;

    let user = state
        .accounts
        .create(
            &auth.profile,
            NewAccount {
                name: req.name,
                email: req.email,
                password: req.password,
                role: req.role,
                permissions: req.permissions,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

/// PUT /api/admin/users/{id}/access
pub async fn update_access(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAccessRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .accounts
        .update_access(&auth.profile, id, req.role, req.permissions)
        .await?;

    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

/// DELETE /api/admin/users/{id}
pub async fn deactivate_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.accounts.deactivate(&auth.profile, id).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}
