//! Reservation handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use super::dto::{
    AddItemsRequest, CreateReservationRequest, ExtendItemRequest, ItemStateRequest,
    ManagerCreateReservationRequest, NoteRequest,
};
use crate::application::board_games::{ItemEventDto, ReservationView};
use crate::application::Caller;
use crate::domain::{DomainError, ItemState};
use crate::interfaces::http::common::{err_response, ApiResponse};
use crate::interfaces::http::router::AppState;

type ReservationResult =
    Result<Json<ApiResponse<ReservationView>>, (StatusCode, Json<ApiResponse<ReservationView>>)>;

#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All reservations, newest first", body = ApiResponse<Vec<ReservationView>>),
        (status = 403, description = "Manager role required")
    )
)]
pub async fn list_all_reservations(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<
    Json<ApiResponse<Vec<ReservationView>>>,
    (StatusCode, Json<ApiResponse<Vec<ReservationView>>>),
> {
    match state.board_games.get_all_reservations(&caller).await {
        Ok(reservations) => Ok(Json(ApiResponse::success(reservations))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/user/{user_id}",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User's reservations, newest first", body = ApiResponse<Vec<ReservationView>>),
        (status = 403, description = "Not your reservations")
    )
)]
pub async fn list_user_reservations(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(user_id): Path<i32>,
) -> Result<
    Json<ApiResponse<Vec<ReservationView>>>,
    (StatusCode, Json<ApiResponse<Vec<ReservationView>>>),
> {
    match state
        .board_games
        .get_user_reservations(&caller, user_id)
        .await
    {
        Ok(reservations) => Ok(Json(ApiResponse::success(reservations))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation with items", body = ApiResponse<ReservationView>),
        (status = 403, description = "Not yours and not a manager"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
) -> ReservationResult {
    match state.board_games.get_reservation(&caller, id).await {
        Ok(reservation) => Ok(Json(ApiResponse::success(reservation))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ApiResponse<ReservationView>),
        (status = 422, description = "Game unavailable")
    )
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(request): Json<CreateReservationRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<ReservationView>>),
    (StatusCode, Json<ApiResponse<ReservationView>>),
> {
    if let Err(e) = request.validate() {
        return Err(err_response(DomainError::Validation(e.to_string())));
    }
    match state
        .board_games
        .create_reservation(&caller, request.note, &request.board_game_ids)
        .await
    {
        Ok(reservation) => Ok((StatusCode::CREATED, Json(ApiResponse::success(reservation)))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/manager",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    request_body = ManagerCreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created for the target user", body = ApiResponse<ReservationView>),
        (status = 403, description = "Manager role required")
    )
)]
pub async fn manager_create_reservation(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(request): Json<ManagerCreateReservationRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<ReservationView>>),
    (StatusCode, Json<ApiResponse<ReservationView>>),
> {
    if let Err(e) = request.validate() {
        return Err(err_response(DomainError::Validation(e.to_string())));
    }
    match state
        .board_games
        .manager_create_reservation(
            &caller,
            request.user_id,
            request.note_internal,
            &request.board_game_ids,
        )
        .await
    {
        Ok(reservation) => Ok((StatusCode::CREATED, Json(ApiResponse::success(reservation)))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/items",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = AddItemsRequest,
    responses(
        (status = 200, description = "Items added", body = ApiResponse<ReservationView>),
        (status = 422, description = "Game unavailable")
    )
)]
pub async fn add_reservation_items(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
    Json(request): Json<AddItemsRequest>,
) -> ReservationResult {
    if let Err(e) = request.validate() {
        return Err(err_response(DomainError::Validation(e.to_string())));
    }
    match state
        .board_games
        .add_reservation_items(&caller, id, &request.board_game_ids)
        .await
    {
        Ok(reservation) => Ok(Json(ApiResponse::success(reservation))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/reservations/{id}/note",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = NoteRequest,
    responses(
        (status = 200, description = "Note updated"),
        (status = 403, description = "Only the owner may edit the note")
    )
)]
pub async fn update_note(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
    Json(request): Json<NoteRequest>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .board_games
        .update_reservation_note(&caller, id, request.note)
        .await
    {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/reservations/{id}/note-internal",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = NoteRequest,
    responses(
        (status = 200, description = "Internal note updated"),
        (status = 403, description = "Manager role required")
    )
)]
pub async fn update_note_internal(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
    Json(request): Json<NoteRequest>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .board_games
        .update_reservation_note_internal(&caller, id, request.note)
        .await
    {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/reservations/{id}/items/{item_id}/state",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Reservation ID"),
        ("item_id" = i32, Path, description = "Reservation item ID")
    ),
    request_body = ItemStateRequest,
    responses(
        (status = 200, description = "Item transitioned", body = ApiResponse<ReservationView>),
        (status = 422, description = "Illegal transition")
    )
)]
pub async fn update_item_state(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path((id, item_id)): Path<(i32, i32)>,
    Json(request): Json<ItemStateRequest>,
) -> ReservationResult {
    let Some(target) = ItemState::from_str(&request.state) else {
        return Err(err_response(DomainError::Validation(format!(
            "Unknown item state '{}'",
            request.state
        ))));
    };
    match state
        .board_games
        .update_item_state(&caller, id, item_id, target, request.note_internal)
        .await
    {
        Ok(reservation) => Ok(Json(ApiResponse::success(reservation))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/reservations/{id}/items/{item_id}/extend",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Reservation ID"),
        ("item_id" = i32, Path, description = "Reservation item ID")
    ),
    request_body = ExtendItemRequest,
    responses(
        (status = 200, description = "Expiry extended", body = ApiResponse<ReservationView>),
        (status = 422, description = "Item cannot be extended")
    )
)]
pub async fn extend_item(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path((id, item_id)): Path<(i32, i32)>,
    Json(request): Json<ExtendItemRequest>,
) -> ReservationResult {
    match state
        .board_games
        .extend_item(
            &caller,
            id,
            item_id,
            request.new_expires_on,
            request.note_internal,
        )
        .await
    {
        Ok(reservation) => Ok(Json(ApiResponse::success(reservation))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}/items/{item_id}/events",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Reservation ID"),
        ("item_id" = i32, Path, description = "Reservation item ID")
    ),
    responses(
        (status = 200, description = "Item audit log, oldest first", body = ApiResponse<Vec<ItemEventDto>>),
        (status = 403, description = "Manager role required")
    )
)]
pub async fn item_history(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path((id, item_id)): Path<(i32, i32)>,
) -> Result<Json<ApiResponse<Vec<ItemEventDto>>>, (StatusCode, Json<ApiResponse<Vec<ItemEventDto>>>)>
{
    match state.board_games.item_history(&caller, id, item_id).await {
        Ok(events) => Ok(Json(ApiResponse::success(events))),
        Err(e) => Err(err_response(e)),
    }
}
