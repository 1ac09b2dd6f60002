//! Board game catalog handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use super::dto::{
    CategoryRequest, CreateBoardGameRequest, ListBoardGamesParams, UpdateBoardGameRequest,
    UpdateStockRequest,
};
use crate::application::board_games::{BoardGameView, CategoryDto, ManagerBoardGameDto};
use crate::application::Caller;
use crate::domain::{BoardGame, DomainError, NewBoardGame};
use crate::interfaces::http::common::{err_response, ApiResponse};
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/board-games",
    tag = "BoardGames",
    params(ListBoardGamesParams),
    responses(
        (status = 200, description = "Board game list", body = ApiResponse<Vec<BoardGameView>>)
    )
)]
pub async fn list_board_games(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Query(params): Query<ListBoardGamesParams>,
) -> Result<Json<ApiResponse<Vec<BoardGameView>>>, (StatusCode, Json<ApiResponse<Vec<BoardGameView>>>)>
{
    match state
        .board_games
        .get_board_games(&caller, params.visible, params.category_id, params.players)
        .await
    {
        Ok(games) => Ok(Json(ApiResponse::success(games))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/board-games/{id}",
    tag = "BoardGames",
    params(("id" = i32, Path, description = "Board game ID")),
    responses(
        (status = 200, description = "Board game", body = ApiResponse<BoardGameView>),
        (status = 401, description = "Hidden game, not signed in"),
        (status = 403, description = "Hidden game, not a manager"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_board_game(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BoardGameView>>, (StatusCode, Json<ApiResponse<BoardGameView>>)> {
    match state.board_games.get_board_game(&caller, id).await {
        Ok(game) => Ok(Json(ApiResponse::success(game))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/board-games",
    tag = "BoardGames",
    security(("bearer_auth" = [])),
    request_body = CreateBoardGameRequest,
    responses(
        (status = 201, description = "Board game created", body = ApiResponse<ManagerBoardGameDto>),
        (status = 403, description = "Manager role required")
    )
)]
pub async fn create_board_game(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(request): Json<CreateBoardGameRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<ManagerBoardGameDto>>),
    (StatusCode, Json<ApiResponse<ManagerBoardGameDto>>),
> {
    if let Err(e) = request.validate() {
        return Err(err_response(DomainError::Validation(e.to_string())));
    }
    let game = NewBoardGame {
        name: request.name,
        description: request.description,
        image_url: request.image_url,
        category_id: request.category_id,
        players_min: request.players_min,
        players_max: request.players_max,
        note_internal: request.note_internal,
        owner_id: request.owner_id,
        in_stock: request.in_stock,
        unavailable: request.unavailable,
        visible: request.visible,
        default_reservation_days: request.default_reservation_days,
    };
    match state.board_games.create_board_game(&caller, game).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(ApiResponse::success(created)))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/board-games/{id}",
    tag = "BoardGames",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Board game ID")),
    request_body = UpdateBoardGameRequest,
    responses(
        (status = 200, description = "Board game updated"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_board_game(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateBoardGameRequest>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    if let Err(e) = request.validate() {
        return Err(err_response(DomainError::Validation(e.to_string())));
    }
    let game = BoardGame {
        id,
        name: request.name,
        description: request.description,
        image_url: request.image_url,
        category_id: request.category_id,
        players_min: request.players_min,
        players_max: request.players_max,
        note_internal: request.note_internal,
        owner_id: request.owner_id,
        in_stock: request.in_stock,
        unavailable: request.unavailable,
        visible: request.visible,
        default_reservation_days: request.default_reservation_days,
    };
    match state.board_games.update_board_game(&caller, game).await {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/board-games/{id}/stock",
    tag = "BoardGames",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Board game ID")),
    request_body = UpdateStockRequest,
    responses(
        (status = 200, description = "Stock updated"),
        (status = 422, description = "Stock invariant violated")
    )
)]
pub async fn update_board_game_stock(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateStockRequest>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .board_games
        .update_board_game_stock(
            &caller,
            id,
            request.in_stock,
            request.unavailable,
            request.visible,
        )
        .await
    {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(err_response(e)),
    }
}

// ── Categories ──────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/v1/board-games/categories",
    tag = "BoardGames",
    responses(
        (status = 200, description = "Category list", body = ApiResponse<Vec<CategoryDto>>)
    )
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CategoryDto>>>, (StatusCode, Json<ApiResponse<Vec<CategoryDto>>>)>
{
    match state.board_games.get_categories().await {
        Ok(categories) => Ok(Json(ApiResponse::success(categories))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/board-games/categories",
    tag = "BoardGames",
    security(("bearer_auth" = [])),
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryDto>),
        (status = 403, description = "Manager role required")
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(request): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryDto>>), (StatusCode, Json<ApiResponse<CategoryDto>>)>
{
    if let Err(e) = request.validate() {
        return Err(err_response(DomainError::Validation(e.to_string())));
    }
    match state
        .board_games
        .create_category(&caller, &request.name, &request.colour_hex)
        .await
    {
        Ok(category) => Ok((StatusCode::CREATED, Json(ApiResponse::success(category)))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/board-games/categories/{id}",
    tag = "BoardGames",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_category(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
    Json(request): Json<CategoryRequest>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    if let Err(e) = request.validate() {
        return Err(err_response(DomainError::Validation(e.to_string())));
    }
    match state
        .board_games
        .update_category(&caller, id, request.name, request.colour_hex)
        .await
    {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(err_response(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/board-games/categories/{id}",
    tag = "BoardGames",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 409, description = "Category still has board games"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.board_games.delete_category(&caller, id).await {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(err_response(e)),
    }
}
