//! Club event handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use super::dto::ClubEventRequest;
use crate::application::club_state::ClubEventDto;
use crate::application::Caller;
use crate::domain::DomainError;
use crate::interfaces::http::common::{err_response, ApiResponse};
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/club/events",
    tag = "ClubEvents",
    responses(
        (status = 200, description = "Club events ordered by start", body = ApiResponse<Vec<ClubEventDto>>)
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ClubEventDto>>>, (StatusCode, Json<ApiResponse<Vec<ClubEventDto>>>)>
{
    match state.club_states.get_events().await {
        Ok(events) => Ok(Json(ApiResponse::success(events))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/club/events/{id}",
    tag = "ClubEvents",
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Club event", body = ApiResponse<ClubEventDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ClubEventDto>>, (StatusCode, Json<ApiResponse<ClubEventDto>>)> {
    match state.club_states.get_event(id).await {
        Ok(event) => Ok(Json(ApiResponse::success(event))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/club/events",
    tag = "ClubEvents",
    security(("bearer_auth" = [])),
    request_body = ClubEventRequest,
    responses(
        (status = 201, description = "Event created", body = ApiResponse<ClubEventDto>),
        (status = 403, description = "States manager role required")
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(request): Json<ClubEventRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ClubEventDto>>), (StatusCode, Json<ApiResponse<ClubEventDto>>)>
{
    if let Err(e) = request.validate() {
        return Err(err_response(DomainError::Validation(e.to_string())));
    }
    match state
        .club_states
        .create_event(&caller, request.name, request.place, request.from, request.to)
        .await
    {
        Ok(event) => Ok((StatusCode::CREATED, Json(ApiResponse::success(event)))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/club/events/{id}",
    tag = "ClubEvents",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Event ID")),
    request_body = ClubEventRequest,
    responses(
        (status = 200, description = "Event updated"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_event(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
    Json(request): Json<ClubEventRequest>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    if let Err(e) = request.validate() {
        return Err(err_response(DomainError::Validation(e.to_string())));
    }
    match state
        .club_states
        .update_event(&caller, id, request.name, request.place, request.from, request.to)
        .await
    {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/club/events/{id}",
    tag = "ClubEvents",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.club_states.delete_event(&caller, id).await {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(err_response(e)),
    }
}
