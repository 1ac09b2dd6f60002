//! Background task that expires overdue reservation items.
//!
//! Runs in a tokio::spawn loop, periodically moving items still in
//! `Reserved` past their `expires_on` into `Expired` (appending the audit
//! event as for any other transition).

use std::sync::Arc;

use tokio::time::Duration;
use tracing::{info, warn};

use crate::application::board_games::BoardGamesService;
use crate::shared::shutdown::ShutdownSignal;

pub fn start_item_expiry_task(
    service: Arc<BoardGamesService>,
    shutdown: ShutdownSignal,
    check_interval_secs: u64,
) {
    tokio::spawn(async move {
        info!(
            check_interval = check_interval_secs,
            "Reservation item expiry task started"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(check_interval_secs));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match service.expire_overdue_items(chrono::Utc::now()).await {
                        Ok(expired) if expired > 0 => {
                            info!(count = expired, "Expired overdue reservation items");
                        }
                        Ok(_) => {}
                        Err(e) => warn!(error = %e, "Item expiry check error"),
                    }
                }
                _ = shutdown.notified().wait() => {
                    info!("Reservation item expiry task shutting down");
                    break;
                }
            }
        }
    });
}
