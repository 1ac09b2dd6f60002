//! Authentication handlers

use axum::{extract::State, http::StatusCode, Extension, Json};
use validator::Validate;

use super::dto::{LoginRequest, LoginResponse};
use crate::application::users::{UserDto, UserWithRolesDto};
use crate::application::Caller;
use crate::domain::DomainError;
use crate::infrastructure::crypto::jwt::create_token;
use crate::interfaces::http::common::{err_response, ApiResponse};
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, (StatusCode, Json<ApiResponse<LoginResponse>>)> {
    if let Err(e) = request.validate() {
        return Err(err_response(DomainError::Validation(e.to_string())));
    }

    let (user, roles) = state
        .user_service
        .login(&request.username, &request.password)
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Invalid username or password")),
            )
        })?;

    let role_names: Vec<String> = roles.iter().map(|r| r.as_str().to_string()).collect();
    let token = create_token(user.id, &user.username, role_names.clone(), &state.auth.jwt_config)
        .map_err(|e| err_response(DomainError::Storage(format!("Token creation failed: {e}"))))?;

    Ok(Json(ApiResponse::success(LoginResponse {
        token,
        user: UserDto::from(user),
        roles: role_names,
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserWithRolesDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<ApiResponse<UserWithRolesDto>>, (StatusCode, Json<ApiResponse<UserWithRolesDto>>)>
{
    match state.users.me(&caller).await {
        Ok(user) => Ok(Json(ApiResponse::success(user))),
        Err(e) => Err(err_response(e)),
    }
}
