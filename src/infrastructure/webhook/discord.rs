//! Discord webhook notifier
//!
//! Posts club state transitions to a configured Discord webhook. Delivery
//! is best-effort fire-and-forget: failures are logged and never block the
//! state transition that triggered them. Without a configured URL the
//! notifier degrades to logging only.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use crate::application::club_state::StateTransitionHandler;
use crate::domain::{PlannedState, StateKind};

/// Minimal Discord webhook client
#[derive(Clone)]
pub struct DiscordNotifier {
    webhook_url: Option<String>,
    timeout_secs: u64,
}

impl DiscordNotifier {
    pub fn new(webhook_url: Option<String>, timeout_secs: u64) -> Self {
        let webhook_url = webhook_url.filter(|url| !url.trim().is_empty());
        Self {
            webhook_url,
            timeout_secs: timeout_secs.max(3),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Send `content` to the webhook in a detached task.
    pub fn spawn_notify(&self, content: String) {
        let Some(url) = self.webhook_url.clone() else {
            debug!("No Discord webhook configured, skipping notification");
            return;
        };
        let timeout_secs = self.timeout_secs;
        tokio::spawn(async move {
            if let Err(err) = post_message(&url, timeout_secs, &content).await {
                warn!(error = %err, "Discord webhook delivery failed");
            }
        });
    }
}

async fn post_message(url: &str, timeout_secs: u64, content: &str) -> Result<(), reqwest::Error> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?;
    client
        .post(url)
        .json(&json!({ "content": content }))
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

/// Transition handler that notifies Discord about club state changes.
/// Composes the notifier rather than inheriting webhook plumbing.
pub struct DiscordTransitionHandler {
    notifier: DiscordNotifier,
}

impl DiscordTransitionHandler {
    pub fn new(notifier: DiscordNotifier) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl StateTransitionHandler for DiscordTransitionHandler {
    async fn perform_start_action(&self, state: &PlannedState) {
        debug!(state_id = state.id, kind = %state.kind, "State started");
        self.notifier.spawn_notify(start_message(state));
    }

    async fn perform_end_action(&self, state: &PlannedState) {
        debug!(state_id = state.id, kind = %state.kind, "State ended");
        self.notifier.spawn_notify(end_message(state));
    }
}

fn start_message(state: &PlannedState) -> String {
    match state.kind {
        StateKind::Open => format!(
            "The club is now open until {}.",
            state.planned_end.format("%H:%M (%Y-%m-%d)")
        ),
        StateKind::Closed => format!(
            "The club is closed until {}.",
            state.planned_end.format("%H:%M (%Y-%m-%d)")
        ),
    }
}

fn end_message(state: &PlannedState) -> String {
    match state.kind {
        StateKind::Open => "The club has closed. See you next time!".to_string(),
        StateKind::Closed => "The scheduled closure has ended.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;

    fn state(kind: StateKind) -> PlannedState {
        PlannedState {
            id: 1,
            kind,
            start: Utc.with_ymd_and_hms(2026, 3, 2, 16, 0, 0).unwrap(),
            planned_end: Utc.with_ymd_and_hms(2026, 3, 2, 22, 0, 0).unwrap(),
            note_internal: None,
            made_by_id: 1,
            repeating_state_id: None,
            associated_event_id: None,
            next_planned_state_id: None,
            start_handled: false,
            end_handled: false,
        }
    }

    #[test]
    fn open_start_message_mentions_closing_time() {
        let message = start_message(&state(StateKind::Open));
        assert!(message.contains("open"));
        assert!(message.contains("22:00"));
    }

    #[test]
    fn closed_end_message_differs_from_open() {
        assert_ne!(
            end_message(&state(StateKind::Open)),
            end_message(&state(StateKind::Closed))
        );
    }

    #[test]
    fn blank_webhook_url_counts_as_unconfigured() {
        let notifier = DiscordNotifier::new(Some("   ".to_string()), 5);
        assert!(!notifier.is_configured());
        let notifier = DiscordNotifier::new(None, 5);
        assert!(!notifier.is_configured());
        let notifier = DiscordNotifier::new(
            Some("https://discord.com/api/webhooks/1/abc".to_string()),
            5,
        );
        assert!(notifier.is_configured());
    }
}
