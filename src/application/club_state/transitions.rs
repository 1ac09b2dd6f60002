//! Club state transition handling
//!
//! A [`StateTransitionHandler`] reacts to a planned state starting or
//! ending. Handlers are best-effort: they report failures themselves and
//! must never prevent the transition.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::Duration;
use tracing::{debug, info, warn};

use super::service::ClubStateService;
use crate::domain::PlannedState;
use crate::shared::shutdown::ShutdownSignal;

#[async_trait]
pub trait StateTransitionHandler: Send + Sync {
    /// Called once when a planned state begins
    async fn perform_start_action(&self, state: &PlannedState);

    /// Called once when a planned state ends
    async fn perform_end_action(&self, state: &PlannedState);
}

/// Handler that only logs; used when no notification channel is configured.
pub struct LoggingTransitionHandler;

#[async_trait]
impl StateTransitionHandler for LoggingTransitionHandler {
    async fn perform_start_action(&self, state: &PlannedState) {
        debug!(state_id = state.id, kind = %state.kind, "State started");
    }

    async fn perform_end_action(&self, state: &PlannedState) {
        debug!(state_id = state.id, kind = %state.kind, "State ended");
    }
}

/// Start the background task that fires state transition handlers.
///
/// Checks every `check_interval_secs` for planned states whose start or
/// planned end has passed unhandled.
pub fn start_state_transition_task(
    service: Arc<ClubStateService>,
    handler: Arc<dyn StateTransitionHandler>,
    shutdown: ShutdownSignal,
    check_interval_secs: u64,
) {
    tokio::spawn(async move {
        info!(
            check_interval = check_interval_secs,
            "State transition task started"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(check_interval_secs));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match service.sweep_transitions(chrono::Utc::now(), handler.as_ref()).await {
                        Ok(fired) if fired > 0 => {
                            debug!(fired, "State transitions handled");
                        }
                        Ok(_) => {}
                        Err(e) => warn!(error = %e, "State transition sweep error"),
                    }
                }
                _ = shutdown.notified().wait() => {
                    info!("State transition task shutting down");
                    break;
                }
            }
        }
    });
}
