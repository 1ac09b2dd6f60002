//! User management handlers (admin only)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use super::dto::{CreateUserRequest, ListUsersParams, RoleRequest};
use crate::application::users::{UserDto, UserWithRolesDto};
use crate::application::Caller;
use crate::domain::DomainError;
use crate::interfaces::http::common::{err_response, ApiResponse, PaginatedResponse};
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(ListUsersParams),
    responses(
        (status = 200, description = "User list", body = PaginatedResponse<UserDto>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Query(params): Query<ListUsersParams>,
) -> Result<Json<PaginatedResponse<UserDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .users
        .list_users(&caller, params.search, params.page, params.page_size)
        .await
    {
        Ok((users, total)) => Ok(Json(PaginatedResponse::new(
            users,
            total,
            params.page,
            params.page_size,
        ))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User with roles", body = ApiResponse<UserWithRolesDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<UserWithRolesDto>>, (StatusCode, Json<ApiResponse<UserWithRolesDto>>)>
{
    match state.users.get_user(&caller, id).await {
        Ok(user) => Ok(Json(ApiResponse::success(user))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 409, description = "Username taken"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), (StatusCode, Json<ApiResponse<UserDto>>)> {
    if let Err(e) = request.validate() {
        return Err(err_response(DomainError::Validation(e.to_string())));
    }
    match state
        .users
        .create_user(
            &caller,
            &request.username,
            &request.email,
            &request.password,
            request.nickname,
        )
        .await
    {
        Ok(user) => Ok((StatusCode::CREATED, Json(ApiResponse::success(user)))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/roles",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = RoleRequest,
    responses(
        (status = 200, description = "Role assigned"),
        (status = 404, description = "User not found")
    )
)]
pub async fn assign_role(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
    Json(request): Json<RoleRequest>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.users.assign_role(&caller, id, &request.role).await {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}/roles",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = RoleRequest,
    responses(
        (status = 200, description = "Role revoked"),
        (status = 404, description = "User not found")
    )
)]
pub async fn revoke_role(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
    Json(request): Json<RoleRequest>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.users.revoke_role(&caller, id, &request.role).await {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(err_response(e)),
    }
}
