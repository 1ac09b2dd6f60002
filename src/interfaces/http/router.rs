//! API router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::board_games::BoardGamesFacade;
use crate::application::club_state::ClubStateFacade;
use crate::application::users::{UserService, UsersFacade};
use crate::interfaces::http::middleware::{auth_middleware, optional_auth_middleware, AuthState};
use crate::interfaces::http::modules::metrics::middleware::http_metrics_middleware;
use crate::interfaces::http::modules::{
    auth, board_games, club_events, club_states, health, metrics, reservations, users,
};

/// Shared state for all routes
#[derive(Clone)]
pub struct AppState {
    pub board_games: Arc<BoardGamesFacade>,
    pub club_states: Arc<ClubStateFacade>,
    pub users: Arc<UsersFacade>,
    pub user_service: Arc<UserService>,
    pub auth: AuthState,
    pub prometheus: PrometheusHandle,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Auth
        auth::handlers::login,
        auth::handlers::me,
        // Users
        users::handlers::list_users,
        users::handlers::get_user,
        users::handlers::create_user,
        users::handlers::assign_role,
        users::handlers::revoke_role,
        // Board games
        board_games::handlers::list_board_games,
        board_games::handlers::get_board_game,
        board_games::handlers::create_board_game,
        board_games::handlers::update_board_game,
        board_games::handlers::update_board_game_stock,
        board_games::handlers::list_categories,
        board_games::handlers::create_category,
        board_games::handlers::update_category,
        board_games::handlers::delete_category,
        // Reservations
        reservations::handlers::list_all_reservations,
        reservations::handlers::list_user_reservations,
        reservations::handlers::get_reservation,
        reservations::handlers::create_reservation,
        reservations::handlers::manager_create_reservation,
        reservations::handlers::add_reservation_items,
        reservations::handlers::update_note,
        reservations::handlers::update_note_internal,
        reservations::handlers::update_item_state,
        reservations::handlers::extend_item,
        reservations::handlers::item_history,
        // Club states
        club_states::handlers::current_state,
        club_states::handlers::next_state,
        club_states::handlers::states_in_range,
        club_states::handlers::get_state,
        club_states::handlers::plan_state,
        club_states::handlers::modify_state,
        club_states::handlers::cancel_state,
        club_states::handlers::link_successor,
        club_states::handlers::list_repeating_states,
        club_states::handlers::create_repeating_state,
        club_states::handlers::delete_repeating_state,
        // Club events
        club_events::handlers::list_events,
        club_events::handlers::get_event,
        club_events::handlers::create_event,
        club_events::handlers::update_event,
        club_events::handlers::delete_event,
        // Monitoring
        metrics::handlers::metrics,
    ),
    components(schemas(
        crate::application::board_games::BoardGameDto,
        crate::application::board_games::ManagerBoardGameDto,
        crate::application::board_games::BoardGameView,
        crate::application::board_games::CategoryDto,
        crate::application::board_games::ReservationDto,
        crate::application::board_games::ManagerReservationDto,
        crate::application::board_games::ReservationView,
        crate::application::board_games::ReservationItemDto,
        crate::application::board_games::ItemEventDto,
        crate::application::club_state::CurrentStateDto,
        crate::application::club_state::PlannedStateDto,
        crate::application::club_state::RepeatingStateDto,
        crate::application::club_state::RepeatingStateCreatedDto,
        crate::application::club_state::ClubEventDto,
        crate::application::users::UserDto,
        crate::application::users::UserWithRolesDto,
        crate::application::users::RoleAssignmentDto,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Authentication"),
        (name = "Users", description = "User and role management"),
        (name = "BoardGames", description = "Board game catalog"),
        (name = "Reservations", description = "Board game reservations"),
        (name = "ClubStates", description = "Club state planning"),
        (name = "ClubEvents", description = "Club events"),
        (name = "Health", description = "Service health"),
        (name = "Monitoring", description = "Prometheus metrics")
    )
)]
struct ApiDoc;

/// Build the complete API router.
///
/// Routes are grouped by how they authenticate, never by who is
/// authorized - that decision belongs to the facades. Paths whose reads
/// are public carry the optional-auth layer on every method; anonymous
/// writes then fail in the facade with a 401/403.
pub fn create_api_router(state: AppState) -> Router {
    let auth_state = state.auth.clone();

    // Mixed-visibility resources: anonymous callers pass through as
    // `Caller::Anonymous`.
    let with_context = Router::new()
        .route(
            "/api/v1/board-games",
            get(board_games::handlers::list_board_games)
                .post(board_games::handlers::create_board_game),
        )
        .route(
            "/api/v1/board-games/categories",
            get(board_games::handlers::list_categories)
                .post(board_games::handlers::create_category),
        )
        .route(
            "/api/v1/board-games/categories/{id}",
            put(board_games::handlers::update_category)
                .delete(board_games::handlers::delete_category),
        )
        .route(
            "/api/v1/board-games/{id}",
            get(board_games::handlers::get_board_game)
                .put(board_games::handlers::update_board_game),
        )
        .route(
            "/api/v1/board-games/{id}/stock",
            put(board_games::handlers::update_board_game_stock),
        )
        .route(
            "/api/v1/club/state",
            get(club_states::handlers::current_state),
        )
        .route(
            "/api/v1/club/states",
            get(club_states::handlers::states_in_range)
                .post(club_states::handlers::plan_state),
        )
        .route(
            "/api/v1/club/states/next",
            get(club_states::handlers::next_state),
        )
        .route(
            "/api/v1/club/states/{id}",
            get(club_states::handlers::get_state)
                .put(club_states::handlers::modify_state)
                .delete(club_states::handlers::cancel_state),
        )
        .route(
            "/api/v1/club/states/{id}/successor",
            put(club_states::handlers::link_successor),
        )
        .route(
            "/api/v1/club/repeating-states",
            get(club_states::handlers::list_repeating_states)
                .post(club_states::handlers::create_repeating_state),
        )
        .route(
            "/api/v1/club/repeating-states/{id}",
            delete(club_states::handlers::delete_repeating_state),
        )
        .route(
            "/api/v1/club/events",
            get(club_events::handlers::list_events).post(club_events::handlers::create_event),
        )
        .route(
            "/api/v1/club/events/{id}",
            get(club_events::handlers::get_event)
                .put(club_events::handlers::update_event)
                .delete(club_events::handlers::delete_event),
        )
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            optional_auth_middleware,
        ));

    // Resources with no anonymous surface reject missing tokens up front.
    let protected = Router::new()
        .route("/api/v1/auth/me", get(auth::handlers::me))
        .route(
            "/api/v1/users",
            get(users::handlers::list_users).post(users::handlers::create_user),
        )
        .route("/api/v1/users/{id}", get(users::handlers::get_user))
        .route(
            "/api/v1/users/{id}/roles",
            post(users::handlers::assign_role).delete(users::handlers::revoke_role),
        )
        .route(
            "/api/v1/reservations",
            get(reservations::handlers::list_all_reservations)
                .post(reservations::handlers::create_reservation),
        )
        .route(
            "/api/v1/reservations/manager",
            post(reservations::handlers::manager_create_reservation),
        )
        .route(
            "/api/v1/reservations/user/{user_id}",
            get(reservations::handlers::list_user_reservations),
        )
        .route(
            "/api/v1/reservations/{id}",
            get(reservations::handlers::get_reservation),
        )
        .route(
            "/api/v1/reservations/{id}/items",
            post(reservations::handlers::add_reservation_items),
        )
        .route(
            "/api/v1/reservations/{id}/note",
            put(reservations::handlers::update_note),
        )
        .route(
            "/api/v1/reservations/{id}/note-internal",
            put(reservations::handlers::update_note_internal),
        )
        .route(
            "/api/v1/reservations/{id}/items/{item_id}/state",
            put(reservations::handlers::update_item_state),
        )
        .route(
            "/api/v1/reservations/{id}/items/{item_id}/extend",
            put(reservations::handlers::extend_item),
        )
        .route(
            "/api/v1/reservations/{id}/items/{item_id}/events",
            get(reservations::handlers::item_history),
        )
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    // Fully open endpoints: no caller context involved.
    let open = Router::new()
        .route("/api/v1/health", get(health::handlers::health_check))
        .route("/api/v1/auth/login", post(auth::handlers::login))
        .route("/metrics", get(metrics::handlers::metrics));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(with_context)
        .merge(protected)
        .merge(open)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
