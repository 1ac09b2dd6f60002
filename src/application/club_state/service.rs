//! Club state planning service
//!
//! Owns the planning rules: interval validation, overlap checks, successor
//! linkage (unique, acyclic, end-consistent) and materialization of
//! repeating state templates.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::transitions::StateTransitionHandler;
use crate::domain::{
    ClubEvent, DomainError, DomainResult, NewClubEvent, NewPlannedState, NewRepeatingState,
    PlannedState, RepeatingState, RepositoryProvider, StateKind,
};

/// Changes applicable to a planned state
#[derive(Debug, Clone, Default)]
pub struct PlannedStateChanges {
    pub kind: Option<StateKind>,
    pub start: Option<DateTime<Utc>>,
    pub planned_end: Option<DateTime<Utc>>,
    pub note_internal: Option<Option<String>>,
    pub associated_event_id: Option<Option<i32>>,
}

pub struct ClubStateService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ClubStateService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Reads ───────────────────────────────────────────────────

    pub async fn current_state(&self, now: DateTime<Utc>) -> DomainResult<Option<PlannedState>> {
        self.repos.planned_states().find_current(now).await
    }

    pub async fn next_state(
        &self,
        now: DateTime<Utc>,
        kind: Option<StateKind>,
    ) -> DomainResult<Option<PlannedState>> {
        self.repos.planned_states().find_next(now, kind).await
    }

    pub async fn get_state(&self, id: i32) -> DomainResult<PlannedState> {
        self.require_state(id).await
    }

    pub async fn states_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<PlannedState>> {
        if to <= from {
            return Err(DomainError::Validation(
                "Range end must be after range start".to_string(),
            ));
        }
        self.repos.planned_states().find_in_range(from, to).await
    }

    // ── Planning ────────────────────────────────────────────────

    pub async fn plan_state(&self, state: NewPlannedState) -> DomainResult<PlannedState> {
        PlannedState::validate_interval(state.start, state.planned_end)?;
        self.ensure_no_overlap(state.start, state.planned_end, None)
            .await?;
        if let Some(event_id) = state.associated_event_id {
            self.require_event(event_id).await?;
        }
        let created = self.repos.planned_states().create(state).await?;
        info!(
            state_id = created.id,
            kind = %created.kind,
            start = %created.start,
            "Planned state created"
        );
        Ok(created)
    }

    pub async fn modify_state(
        &self,
        id: i32,
        changes: PlannedStateChanges,
    ) -> DomainResult<PlannedState> {
        let mut state = self.require_state(id).await?;
        let now = Utc::now();

        if let Some(start) = changes.start {
            if state.has_started(now) {
                return Err(DomainError::Validation(
                    "Cannot move the start of a state that already began".to_string(),
                ));
            }
            state.start = start;
        }
        if let Some(end) = changes.planned_end {
            state.planned_end = end;
        }
        if let Some(kind) = changes.kind {
            state.kind = kind;
        }
        if let Some(note) = changes.note_internal {
            state.note_internal = note;
        }
        if let Some(event_id) = changes.associated_event_id {
            if let Some(event_id) = event_id {
                self.require_event(event_id).await?;
            }
            state.associated_event_id = event_id;
        }

        PlannedState::validate_interval(state.start, state.planned_end)?;
        self.ensure_no_overlap(state.start, state.planned_end, Some(id))
            .await?;

        // Linked states keep their chain consistent: the successor starts
        // exactly when this state ends.
        if let Some(next_id) = state.next_planned_state_id {
            let next = self.require_state(next_id).await?;
            if next.start != state.planned_end {
                return Err(DomainError::Validation(
                    "Planned end must match the linked successor's start".to_string(),
                ));
            }
        }

        self.repos.planned_states().update(state.clone()).await?;
        Ok(state)
    }

    /// Remove a planned state that has not started yet. Started states can
    /// only be shortened via `modify_state`.
    pub async fn cancel_state(&self, id: i32) -> DomainResult<()> {
        let state = self.require_state(id).await?;
        if state.has_started(Utc::now()) {
            return Err(DomainError::Validation(
                "A started state cannot be cancelled; shorten its planned end instead"
                    .to_string(),
            ));
        }
        self.repos.planned_states().delete(id).await?;
        info!(state_id = id, "Planned state cancelled");
        Ok(())
    }

    /// Link `next_id` as the successor of `id`, or clear the link.
    ///
    /// Linking requires the successor to start exactly when the
    /// predecessor ends, rejects second predecessors (unique successor)
    /// and rejects chains that would loop back.
    pub async fn link_successor(&self, id: i32, next_id: Option<i32>) -> DomainResult<()> {
        let state = self.require_state(id).await?;
        let Some(next_id) = next_id else {
            return self.repos.planned_states().set_successor(id, None).await;
        };

        if next_id == id {
            return Err(DomainError::Validation(
                "A state cannot succeed itself".to_string(),
            ));
        }
        let next = self.require_state(next_id).await?;
        if next.start != state.planned_end {
            return Err(DomainError::Validation(
                "Successor must start exactly when the state ends".to_string(),
            ));
        }
        self.ensure_acyclic(id, next_id).await?;
        self.repos
            .planned_states()
            .set_successor(id, Some(next_id))
            .await
    }

    /// Walk the successor chain from `from`; reject when it reaches
    /// `origin`.
    async fn ensure_acyclic(&self, origin: i32, from: i32) -> DomainResult<()> {
        let mut cursor = Some(from);
        let mut hops = 0u32;
        while let Some(id) = cursor {
            if id == origin {
                return Err(DomainError::Validation(
                    "Successor chain would form a cycle".to_string(),
                ));
            }
            // Hop bound guards against a corrupted chain in storage.
            hops += 1;
            if hops > 1000 {
                return Err(DomainError::Storage(
                    "Successor chain too long".to_string(),
                ));
            }
            cursor = self
                .require_state(id)
                .await?
                .next_planned_state_id;
        }
        Ok(())
    }

    async fn ensure_no_overlap(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_id: Option<i32>,
    ) -> DomainResult<()> {
        let overlapping = self
            .repos
            .planned_states()
            .find_overlapping(start, end, exclude_id)
            .await?;
        if let Some(other) = overlapping.first() {
            return Err(DomainError::Conflict(format!(
                "Interval overlaps planned state {}",
                other.id
            )));
        }
        Ok(())
    }

    async fn require_state(&self, id: i32) -> DomainResult<PlannedState> {
        self.repos
            .planned_states()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("PlannedState", id))
    }

    // ── Repeating states ────────────────────────────────────────

    pub async fn list_repeating_states(&self) -> DomainResult<Vec<RepeatingState>> {
        self.repos.repeating_states().find_all().await
    }

    /// Create a repeating template and materialize its occurrences.
    /// Occurrences overlapping existing states are skipped and reported.
    pub async fn create_repeating_state(
        &self,
        template: NewRepeatingState,
    ) -> DomainResult<(RepeatingState, Vec<PlannedState>, Vec<DateTime<Utc>>)> {
        let created = self.repos.repeating_states().create(template).await?;
        created.validate()?;

        let mut planned = Vec::new();
        let mut skipped = Vec::new();
        for (start, end) in created.occurrences() {
            let overlapping = self
                .repos
                .planned_states()
                .find_overlapping(start, end, None)
                .await?;
            if !overlapping.is_empty() {
                skipped.push(start);
                continue;
            }
            let state = self
                .repos
                .planned_states()
                .create(NewPlannedState {
                    kind: created.kind,
                    start,
                    planned_end: end,
                    note_internal: created.note_internal.clone(),
                    made_by_id: created.made_by_id,
                    repeating_state_id: Some(created.id),
                    associated_event_id: None,
                })
                .await?;
            planned.push(state);
        }
        info!(
            template_id = created.id,
            created = planned.len(),
            skipped = skipped.len(),
            "Repeating state materialized"
        );
        Ok((created, planned, skipped))
    }

    pub async fn delete_repeating_state(&self, id: i32) -> DomainResult<()> {
        self.repos
            .repeating_states()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("RepeatingState", id))?;
        self.repos.repeating_states().delete(id).await
    }

    // ── Club events ─────────────────────────────────────────────

    pub async fn list_events(&self) -> DomainResult<Vec<ClubEvent>> {
        self.repos.club_events().find_all().await
    }

    pub async fn get_event(&self, id: i32) -> DomainResult<ClubEvent> {
        self.require_event(id).await
    }

    pub async fn create_event(&self, event: NewClubEvent) -> DomainResult<ClubEvent> {
        if event.to <= event.from {
            return Err(DomainError::Validation(
                "Event end must be after its start".to_string(),
            ));
        }
        self.repos.club_events().create(event).await
    }

    pub async fn update_event(
        &self,
        id: i32,
        name: String,
        place: Option<String>,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<()> {
        if to <= from {
            return Err(DomainError::Validation(
                "Event end must be after its start".to_string(),
            ));
        }
        let mut event = self.require_event(id).await?;
        event.name = name;
        event.place = place;
        event.from = from;
        event.to = to;
        self.repos.club_events().update(event).await
    }

    pub async fn delete_event(&self, id: i32) -> DomainResult<()> {
        self.require_event(id).await?;
        self.repos.club_events().delete(id).await
    }

    async fn require_event(&self, id: i32) -> DomainResult<ClubEvent> {
        self.repos
            .club_events()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("ClubEvent", id))
    }

    // ── Transition sweep ────────────────────────────────────────

    /// Fire start/end transition handlers for states whose edges have
    /// passed. Each edge fires at most once; handler failures are the
    /// handler's own concern and never block the sweep.
    pub async fn sweep_transitions(
        &self,
        now: DateTime<Utc>,
        handler: &dyn StateTransitionHandler,
    ) -> DomainResult<usize> {
        let mut fired = 0;

        for state in self.repos.planned_states().find_due_starts(now).await? {
            handler.perform_start_action(&state).await;
            if let Err(e) = self.repos.planned_states().mark_start_handled(state.id).await {
                warn!(state_id = state.id, error = %e, "Failed to mark state start handled");
                continue;
            }
            fired += 1;
        }

        for state in self.repos.planned_states().find_due_ends(now).await? {
            handler.perform_end_action(&state).await;
            if let Err(e) = self.repos.planned_states().mark_end_handled(state.id).await {
                warn!(state_id = state.id, error = %e, "Failed to mark state end handled");
                continue;
            }
            fired += 1;
        }

        Ok(fired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::InMemoryRepos;
    use async_trait::async_trait;
    use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Weekday};
    use std::sync::Mutex;

    fn service(repos: Arc<InMemoryRepos>) -> ClubStateService {
        ClubStateService::new(repos)
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, day, hour, 0, 0).unwrap()
    }

    fn new_state(start: DateTime<Utc>, end: DateTime<Utc>) -> NewPlannedState {
        NewPlannedState {
            kind: StateKind::Open,
            start,
            planned_end: end,
            note_internal: None,
            made_by_id: 1,
            repeating_state_id: None,
            associated_event_id: None,
        }
    }

    #[tokio::test]
    async fn overlapping_plans_are_rejected() {
        let service = service(InMemoryRepos::new());
        service.plan_state(new_state(at(6, 16), at(6, 22))).await.unwrap();
        let result = service.plan_state(new_state(at(6, 20), at(6, 23))).await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));
        // back-to-back is fine
        service.plan_state(new_state(at(6, 22), at(6, 23))).await.unwrap();
    }

    #[tokio::test]
    async fn successor_must_start_at_predecessor_end() {
        let service = service(InMemoryRepos::new());
        let a = service.plan_state(new_state(at(6, 16), at(6, 22))).await.unwrap();
        let b = service.plan_state(new_state(at(7, 16), at(7, 22))).await.unwrap();
        let result = service.link_successor(a.id, Some(b.id)).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));

        let c = service.plan_state(new_state(at(6, 22), at(6, 23))).await.unwrap();
        service.link_successor(a.id, Some(c.id)).await.unwrap();
    }

    #[tokio::test]
    async fn successor_chain_cannot_loop() {
        let repos = InMemoryRepos::new();
        let service = service(repos.clone());
        // Craft two mutually back-to-back states so both link directions
        // satisfy the boundary rule.
        let a = repos.seed_planned_state(1, at(6, 16), at(6, 22));
        let mut b = repos.seed_planned_state(2, at(6, 22), at(6, 16));
        // b "ends" where a starts (degenerate interval seeded directly)
        b.planned_end = a.start;
        repos.lock().planned_states[1] = b.clone();

        service.link_successor(a.id, Some(b.id)).await.unwrap();
        let result = service.link_successor(b.id, Some(a.id)).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn a_state_cannot_succeed_itself() {
        let repos = InMemoryRepos::new();
        let service = service(repos.clone());
        let a = repos.seed_planned_state(1, at(6, 16), at(6, 22));
        let result = service.link_successor(a.id, Some(a.id)).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn only_one_predecessor_per_successor() {
        let repos = InMemoryRepos::new();
        let service = service(repos.clone());
        let a = service.plan_state(new_state(at(6, 16), at(6, 22))).await.unwrap();
        let c = service.plan_state(new_state(at(6, 22), at(6, 23))).await.unwrap();
        service.link_successor(a.id, Some(c.id)).await.unwrap();

        // A second state ending exactly at c's start (seeded around the
        // overlap check) still cannot take c as its successor.
        let d = repos.seed_planned_state(40, at(6, 20), at(6, 22));
        let result = service.link_successor(d.id, Some(c.id)).await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn started_states_cannot_be_cancelled() {
        let repos = InMemoryRepos::new();
        let service = service(repos.clone());
        let now = Utc::now();
        repos.seed_planned_state(1, now - Duration::hours(1), now + Duration::hours(3));
        let result = service.cancel_state(1).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));

        repos.seed_planned_state(2, now + Duration::hours(5), now + Duration::hours(8));
        service.cancel_state(2).await.unwrap();
    }

    #[tokio::test]
    async fn repeating_state_skips_overlapping_occurrences() {
        let repos = InMemoryRepos::new();
        let service = service(repos.clone());
        // Occupy the second Wednesday evening of April 2026.
        repos.seed_planned_state(50, at(8, 15), at(8, 23));

        let (_, created, skipped) = service
            .create_repeating_state(NewRepeatingState {
                kind: StateKind::Open,
                day_of_week: Weekday::Wed,
                time_from: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
                time_to: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
                effective_from: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
                effective_to: NaiveDate::from_ymd_opt(2026, 4, 30).unwrap(),
                note_internal: None,
                made_by_id: 1,
            })
            .await
            .unwrap();

        // April 2026 has five Wednesdays; one is blocked.
        assert_eq!(created.len(), 4);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0], at(8, 16));
        for state in &created {
            assert_eq!(state.repeating_state_id, Some(1));
        }
    }

    struct RecordingHandler {
        starts: Mutex<Vec<i32>>,
        ends: Mutex<Vec<i32>>,
    }

    impl RecordingHandler {
        fn new() -> Self {
            Self {
                starts: Mutex::new(Vec::new()),
                ends: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl StateTransitionHandler for RecordingHandler {
        async fn perform_start_action(&self, state: &PlannedState) {
            self.starts.lock().unwrap().push(state.id);
        }

        async fn perform_end_action(&self, state: &PlannedState) {
            self.ends.lock().unwrap().push(state.id);
        }
    }

    #[tokio::test]
    async fn sweep_fires_each_edge_exactly_once() {
        let repos = InMemoryRepos::new();
        let service = service(repos.clone());
        let now = Utc::now();
        // Started but not ended.
        repos.seed_planned_state(1, now - Duration::hours(1), now + Duration::hours(3));
        // Started and ended.
        repos.seed_planned_state(2, now - Duration::hours(6), now - Duration::hours(2));
        // In the future: untouched.
        repos.seed_planned_state(3, now + Duration::hours(5), now + Duration::hours(8));

        let handler = RecordingHandler::new();
        let fired = service.sweep_transitions(now, &handler).await.unwrap();
        assert_eq!(fired, 3);
        assert_eq!(*handler.starts.lock().unwrap(), vec![1, 2]);
        assert_eq!(*handler.ends.lock().unwrap(), vec![2]);

        // Second sweep is a no-op.
        let fired = service.sweep_transitions(now, &handler).await.unwrap();
        assert_eq!(fired, 0);
        assert_eq!(handler.starts.lock().unwrap().len(), 2);
    }
}
