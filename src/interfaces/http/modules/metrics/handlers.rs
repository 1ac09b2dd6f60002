//! Prometheus metrics endpoint

use axum::extract::State;

use crate::interfaces::http::router::AppState;

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Monitoring",
    responses((status = 200, description = "Prometheus exposition text"))
)]
pub async fn metrics(State(state): State<AppState>) -> String {
    state.prometheus.render()
}
