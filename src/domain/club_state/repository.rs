//! Club state, repeating state and club event repository interfaces

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{
    ClubEvent, NewClubEvent, NewPlannedState, NewRepeatingState, PlannedState, RepeatingState,
    StateKind,
};
use crate::domain::DomainResult;

#[async_trait]
pub trait PlannedStateRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<PlannedState>>;

    /// The state whose interval contains `now`, if any
    async fn find_current(&self, now: DateTime<Utc>) -> DomainResult<Option<PlannedState>>;

    /// The earliest state starting after `now`, optionally of one kind
    async fn find_next(
        &self,
        now: DateTime<Utc>,
        kind: Option<StateKind>,
    ) -> DomainResult<Option<PlannedState>>;

    /// States intersecting the given range, ordered by start
    async fn find_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<PlannedState>>;

    /// States overlapping the interval, optionally excluding one id
    async fn find_overlapping(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_id: Option<i32>,
    ) -> DomainResult<Vec<PlannedState>>;

    async fn create(&self, state: NewPlannedState) -> DomainResult<PlannedState>;

    async fn update(&self, state: PlannedState) -> DomainResult<()>;

    async fn delete(&self, id: i32) -> DomainResult<()>;

    /// Point a state at its successor (or clear the pointer). Fails with a
    /// conflict when another state already points at the same successor.
    async fn set_successor(&self, id: i32, next_id: Option<i32>) -> DomainResult<()>;

    /// States whose start has passed without the start handler running
    async fn find_due_starts(&self, now: DateTime<Utc>) -> DomainResult<Vec<PlannedState>>;

    /// States whose planned end has passed without the end handler running
    async fn find_due_ends(&self, now: DateTime<Utc>) -> DomainResult<Vec<PlannedState>>;

    async fn mark_start_handled(&self, id: i32) -> DomainResult<()>;

    async fn mark_end_handled(&self, id: i32) -> DomainResult<()>;
}

#[async_trait]
pub trait RepeatingStateRepository: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<RepeatingState>>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<RepeatingState>>;

    async fn create(&self, template: NewRepeatingState) -> DomainResult<RepeatingState>;

    async fn delete(&self, id: i32) -> DomainResult<()>;
}

#[async_trait]
pub trait ClubEventRepository: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<ClubEvent>>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ClubEvent>>;

    async fn create(&self, event: NewClubEvent) -> DomainResult<ClubEvent>;

    async fn update(&self, event: ClubEvent) -> DomainResult<()>;

    async fn delete(&self, id: i32) -> DomainResult<()>;
}
