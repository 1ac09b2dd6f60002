//! Club state handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    parse_kind, parse_weekday, CreateRepeatingStateRequest, LinkSuccessorRequest,
    ModifyStateRequest, NextStateParams, PlanStateRequest, StateRangeParams,
};
use crate::application::club_state::{
    CurrentStateDto, PlannedStateDto, PlannedStateChanges, RepeatingStateCreatedDto,
    RepeatingStateDto,
};
use crate::application::Caller;
use crate::interfaces::http::common::{err_response, ApiResponse};
use crate::interfaces::http::router::AppState;

type StateResult =
    Result<Json<ApiResponse<PlannedStateDto>>, (StatusCode, Json<ApiResponse<PlannedStateDto>>)>;

#[utoipa::path(
    get,
    path = "/api/v1/club/state",
    tag = "ClubStates",
    responses(
        (status = 200, description = "Current club state with the upcoming one", body = ApiResponse<CurrentStateDto>)
    )
)]
pub async fn current_state(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CurrentStateDto>>, (StatusCode, Json<ApiResponse<CurrentStateDto>>)> {
    match state.club_states.get_current_state().await {
        Ok(current) => Ok(Json(ApiResponse::success(current))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/club/states/next",
    tag = "ClubStates",
    params(NextStateParams),
    responses(
        (status = 200, description = "Next planned state, if any", body = ApiResponse<Option<PlannedStateDto>>)
    )
)]
pub async fn next_state(
    State(state): State<AppState>,
    Query(params): Query<NextStateParams>,
) -> Result<
    Json<ApiResponse<Option<PlannedStateDto>>>,
    (StatusCode, Json<ApiResponse<Option<PlannedStateDto>>>),
> {
    let kind = match params.kind.as_deref().map(parse_kind).transpose() {
        Ok(kind) => kind,
        Err(e) => return Err(err_response(e)),
    };
    match state.club_states.get_next_state(kind).await {
        Ok(next) => Ok(Json(ApiResponse::success(next))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/club/states",
    tag = "ClubStates",
    params(StateRangeParams),
    responses(
        (status = 200, description = "Planned states intersecting the range", body = ApiResponse<Vec<PlannedStateDto>>)
    )
)]
pub async fn states_in_range(
    State(state): State<AppState>,
    Query(params): Query<StateRangeParams>,
) -> Result<
    Json<ApiResponse<Vec<PlannedStateDto>>>,
    (StatusCode, Json<ApiResponse<Vec<PlannedStateDto>>>),
> {
    match state
        .club_states
        .get_states_in_range(params.from, params.to)
        .await
    {
        Ok(states) => Ok(Json(ApiResponse::success(states))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/club/states/{id}",
    tag = "ClubStates",
    params(("id" = i32, Path, description = "Planned state ID")),
    responses(
        (status = 200, description = "Planned state", body = ApiResponse<PlannedStateDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_state(State(state): State<AppState>, Path(id): Path<i32>) -> StateResult {
    match state.club_states.get_state(id).await {
        Ok(found) => Ok(Json(ApiResponse::success(found))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/club/states",
    tag = "ClubStates",
    security(("bearer_auth" = [])),
    request_body = PlanStateRequest,
    responses(
        (status = 201, description = "State planned", body = ApiResponse<PlannedStateDto>),
        (status = 409, description = "Overlaps an existing state"),
        (status = 403, description = "States manager role required")
    )
)]
pub async fn plan_state(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(request): Json<PlanStateRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<PlannedStateDto>>),
    (StatusCode, Json<ApiResponse<PlannedStateDto>>),
> {
    let kind = match parse_kind(&request.kind) {
        Ok(kind) => kind,
        Err(e) => return Err(err_response(e)),
    };
    match state
        .club_states
        .plan_state(
            &caller,
            kind,
            request.start,
            request.planned_end,
            request.note_internal,
            request.associated_event_id,
        )
        .await
    {
        Ok(planned) => Ok((StatusCode::CREATED, Json(ApiResponse::success(planned)))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/club/states/{id}",
    tag = "ClubStates",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Planned state ID")),
    request_body = ModifyStateRequest,
    responses(
        (status = 200, description = "State modified", body = ApiResponse<PlannedStateDto>),
        (status = 422, description = "Invalid change")
    )
)]
pub async fn modify_state(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
    Json(request): Json<ModifyStateRequest>,
) -> StateResult {
    let kind = match request.kind.as_deref().map(parse_kind).transpose() {
        Ok(kind) => kind,
        Err(e) => return Err(err_response(e)),
    };
    let changes = PlannedStateChanges {
        kind,
        start: request.start,
        planned_end: request.planned_end,
        note_internal: request.note_internal,
        associated_event_id: request.associated_event_id,
    };
    match state.club_states.modify_state(&caller, id, changes).await {
        Ok(modified) => Ok(Json(ApiResponse::success(modified))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/club/states/{id}",
    tag = "ClubStates",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Planned state ID")),
    responses(
        (status = 200, description = "State cancelled"),
        (status = 422, description = "State already started")
    )
)]
pub async fn cancel_state(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.club_states.cancel_state(&caller, id).await {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/club/states/{id}/successor",
    tag = "ClubStates",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Planned state ID")),
    request_body = LinkSuccessorRequest,
    responses(
        (status = 200, description = "Successor linked or cleared"),
        (status = 409, description = "Successor already has a predecessor"),
        (status = 422, description = "Inconsistent or cyclic linkage")
    )
)]
pub async fn link_successor(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
    Json(request): Json<LinkSuccessorRequest>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .club_states
        .link_successor(&caller, id, request.next_id)
        .await
    {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(err_response(e)),
    }
}

// ── Repeating states ────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/v1/club/repeating-states",
    tag = "ClubStates",
    responses(
        (status = 200, description = "Repeating state templates", body = ApiResponse<Vec<RepeatingStateDto>>)
    )
)]
pub async fn list_repeating_states(
    State(state): State<AppState>,
) -> Result<
    Json<ApiResponse<Vec<RepeatingStateDto>>>,
    (StatusCode, Json<ApiResponse<Vec<RepeatingStateDto>>>),
> {
    match state.club_states.get_repeating_states().await {
        Ok(templates) => Ok(Json(ApiResponse::success(templates))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/club/repeating-states",
    tag = "ClubStates",
    security(("bearer_auth" = [])),
    request_body = CreateRepeatingStateRequest,
    responses(
        (status = 201, description = "Template created and materialized", body = ApiResponse<RepeatingStateCreatedDto>),
        (status = 403, description = "States manager role required")
    )
)]
pub async fn create_repeating_state(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(request): Json<CreateRepeatingStateRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<RepeatingStateCreatedDto>>),
    (StatusCode, Json<ApiResponse<RepeatingStateCreatedDto>>),
> {
    let kind = match parse_kind(&request.kind) {
        Ok(kind) => kind,
        Err(e) => return Err(err_response(e)),
    };
    let day_of_week = match parse_weekday(request.day_of_week) {
        Ok(day) => day,
        Err(e) => return Err(err_response(e)),
    };
    match state
        .club_states
        .create_repeating_state(
            &caller,
            kind,
            day_of_week,
            request.time_from,
            request.time_to,
            request.effective_from,
            request.effective_to,
            request.note_internal,
        )
        .await
    {
        Ok(created) => Ok((StatusCode::CREATED, Json(ApiResponse::success(created)))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/club/repeating-states/{id}",
    tag = "ClubStates",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Repeating state ID")),
    responses(
        (status = 200, description = "Template deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_repeating_state(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.club_states.delete_repeating_state(&caller, id).await {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(err_response(e)),
    }
}
