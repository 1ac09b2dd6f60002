//! Club state facade: authorization plus DTO conversion over the planning
//! service. Reads are public; all writes require the states manager role.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::dto::{
    ClubEventDto, CurrentStateDto, PlannedStateDto, RepeatingStateCreatedDto, RepeatingStateDto,
};
use super::service::{ClubStateService, PlannedStateChanges};
use crate::application::context::Caller;
use crate::domain::{
    DomainResult, NewClubEvent, NewPlannedState, NewRepeatingState, Role, StateKind,
};

pub struct ClubStateFacade {
    service: Arc<ClubStateService>,
}

impl ClubStateFacade {
    pub fn new(service: Arc<ClubStateService>) -> Self {
        Self { service }
    }

    // ── Public reads ────────────────────────────────────────────

    pub async fn get_current_state(&self) -> DomainResult<CurrentStateDto> {
        let now = Utc::now();
        let current = self.service.current_state(now).await?;
        let next = self.service.next_state(now, None).await?;
        let kind = current
            .as_ref()
            .map(|s| s.kind)
            .unwrap_or(StateKind::Closed);
        Ok(CurrentStateDto {
            kind: kind.as_str().to_string(),
            state: current.map(PlannedStateDto::from),
            next: next.map(PlannedStateDto::from),
        })
    }

    pub async fn get_state(&self, id: i32) -> DomainResult<PlannedStateDto> {
        Ok(self.service.get_state(id).await?.into())
    }

    pub async fn get_states_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<PlannedStateDto>> {
        let states = self.service.states_in_range(from, to).await?;
        Ok(states.into_iter().map(PlannedStateDto::from).collect())
    }

    pub async fn get_next_state(
        &self,
        kind: Option<StateKind>,
    ) -> DomainResult<Option<PlannedStateDto>> {
        let next = self.service.next_state(Utc::now(), kind).await?;
        Ok(next.map(PlannedStateDto::from))
    }

    // ── Planning (states manager) ───────────────────────────────

    pub async fn plan_state(
        &self,
        caller: &Caller,
        kind: StateKind,
        start: DateTime<Utc>,
        planned_end: DateTime<Utc>,
        note_internal: Option<String>,
        associated_event_id: Option<i32>,
    ) -> DomainResult<PlannedStateDto> {
        let ctx = caller.require_role(Role::StatesManager)?;
        let state = self
            .service
            .plan_state(NewPlannedState {
                kind,
                start,
                planned_end,
                note_internal,
                made_by_id: ctx.id,
                repeating_state_id: None,
                associated_event_id,
            })
            .await?;
        Ok(state.into())
    }

    pub async fn modify_state(
        &self,
        caller: &Caller,
        id: i32,
        changes: PlannedStateChanges,
    ) -> DomainResult<PlannedStateDto> {
        caller.require_role(Role::StatesManager)?;
        Ok(self.service.modify_state(id, changes).await?.into())
    }

    pub async fn cancel_state(&self, caller: &Caller, id: i32) -> DomainResult<()> {
        caller.require_role(Role::StatesManager)?;
        self.service.cancel_state(id).await
    }

    pub async fn link_successor(
        &self,
        caller: &Caller,
        id: i32,
        next_id: Option<i32>,
    ) -> DomainResult<()> {
        caller.require_role(Role::StatesManager)?;
        self.service.link_successor(id, next_id).await
    }

    // ── Repeating states ────────────────────────────────────────

    pub async fn get_repeating_states(&self) -> DomainResult<Vec<RepeatingStateDto>> {
        let templates = self.service.list_repeating_states().await?;
        Ok(templates.into_iter().map(RepeatingStateDto::from).collect())
    }

    pub async fn create_repeating_state(
        &self,
        caller: &Caller,
        kind: StateKind,
        day_of_week: chrono::Weekday,
        time_from: chrono::NaiveTime,
        time_to: chrono::NaiveTime,
        effective_from: chrono::NaiveDate,
        effective_to: chrono::NaiveDate,
        note_internal: Option<String>,
    ) -> DomainResult<RepeatingStateCreatedDto> {
        let ctx = caller.require_role(Role::StatesManager)?;
        let (template, created, skipped) = self
            .service
            .create_repeating_state(NewRepeatingState {
                kind,
                day_of_week,
                time_from,
                time_to,
                effective_from,
                effective_to,
                note_internal,
                made_by_id: ctx.id,
            })
            .await?;
        Ok(RepeatingStateCreatedDto {
            template: template.into(),
            created: created.into_iter().map(PlannedStateDto::from).collect(),
            skipped,
        })
    }

    pub async fn delete_repeating_state(&self, caller: &Caller, id: i32) -> DomainResult<()> {
        caller.require_role(Role::StatesManager)?;
        self.service.delete_repeating_state(id).await
    }

    // ── Club events ─────────────────────────────────────────────

    pub async fn get_events(&self) -> DomainResult<Vec<ClubEventDto>> {
        let events = self.service.list_events().await?;
        Ok(events.into_iter().map(ClubEventDto::from).collect())
    }

    pub async fn get_event(&self, id: i32) -> DomainResult<ClubEventDto> {
        Ok(self.service.get_event(id).await?.into())
    }

    pub async fn create_event(
        &self,
        caller: &Caller,
        name: String,
        place: Option<String>,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<ClubEventDto> {
        let ctx = caller.require_role(Role::StatesManager)?;
        let event = self
            .service
            .create_event(NewClubEvent {
                name,
                place,
                from,
                to,
                made_by_id: ctx.id,
            })
            .await?;
        Ok(event.into())
    }

    pub async fn update_event(
        &self,
        caller: &Caller,
        id: i32,
        name: String,
        place: Option<String>,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<()> {
        caller.require_role(Role::StatesManager)?;
        self.service.update_event(id, name, place, from, to).await
    }

    pub async fn delete_event(&self, caller: &Caller, id: i32) -> DomainResult<()> {
        caller.require_role(Role::StatesManager)?;
        self.service.delete_event(id).await
    }
}
