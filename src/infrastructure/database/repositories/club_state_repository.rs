//! SeaORM implementations of PlannedStateRepository and
//! RepeatingStateRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc, Weekday};
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::club_state::{PlannedStateRepository, RepeatingStateRepository};
use crate::domain::{
    DomainError, DomainResult, NewPlannedState, NewRepeatingState, PlannedState, RepeatingState,
    StateKind,
};
use crate::infrastructure::database::entities::{planned_state, repeating_state};

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {e}"))
}

fn kind_from_str(s: &str) -> StateKind {
    StateKind::from_str(s).unwrap_or(StateKind::Closed)
}

// ── Planned states ──────────────────────────────────────────────

pub struct SeaOrmPlannedStateRepository {
    db: DatabaseConnection,
}

impl SeaOrmPlannedStateRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn state_to_domain(m: planned_state::Model) -> PlannedState {
    PlannedState {
        id: m.id,
        kind: kind_from_str(&m.kind),
        start: m.start,
        planned_end: m.planned_end,
        note_internal: m.note_internal,
        made_by_id: m.made_by_id,
        repeating_state_id: m.repeating_state_id,
        associated_event_id: m.associated_event_id,
        next_planned_state_id: m.next_planned_state_id,
        start_handled: m.start_handled,
        end_handled: m.end_handled,
    }
}

#[async_trait]
impl PlannedStateRepository for SeaOrmPlannedStateRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<PlannedState>> {
        let model = planned_state::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(state_to_domain))
    }

    async fn find_current(&self, now: DateTime<Utc>) -> DomainResult<Option<PlannedState>> {
        let model = planned_state::Entity::find()
            .filter(planned_state::Column::Start.lte(now))
            .filter(planned_state::Column::PlannedEnd.gt(now))
            .order_by_desc(planned_state::Column::Start)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(state_to_domain))
    }

    async fn find_next(
        &self,
        now: DateTime<Utc>,
        kind: Option<StateKind>,
    ) -> DomainResult<Option<PlannedState>> {
        let mut query = planned_state::Entity::find()
            .filter(planned_state::Column::Start.gt(now))
            .order_by_asc(planned_state::Column::Start);
        if let Some(kind) = kind {
            query = query.filter(planned_state::Column::Kind.eq(kind.as_str()));
        }
        let model = query.one(&self.db).await.map_err(db_err)?;
        Ok(model.map(state_to_domain))
    }

    async fn find_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<PlannedState>> {
        let models = planned_state::Entity::find()
            .filter(planned_state::Column::Start.lt(to))
            .filter(planned_state::Column::PlannedEnd.gt(from))
            .order_by_asc(planned_state::Column::Start)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(state_to_domain).collect())
    }

    async fn find_overlapping(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_id: Option<i32>,
    ) -> DomainResult<Vec<PlannedState>> {
        let mut query = planned_state::Entity::find()
            .filter(planned_state::Column::Start.lt(end))
            .filter(planned_state::Column::PlannedEnd.gt(start));
        if let Some(id) = exclude_id {
            query = query.filter(planned_state::Column::Id.ne(id));
        }
        let models = query.all(&self.db).await.map_err(db_err)?;
        Ok(models.into_iter().map(state_to_domain).collect())
    }

    async fn create(&self, state: NewPlannedState) -> DomainResult<PlannedState> {
        let model = planned_state::ActiveModel {
            kind: Set(state.kind.as_str().to_string()),
            start: Set(state.start),
            planned_end: Set(state.planned_end),
            note_internal: Set(state.note_internal),
            made_by_id: Set(state.made_by_id),
            repeating_state_id: Set(state.repeating_state_id),
            associated_event_id: Set(state.associated_event_id),
            next_planned_state_id: Set(None),
            start_handled: Set(false),
            end_handled: Set(false),
            ..Default::default()
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(state_to_domain(inserted))
    }

    async fn update(&self, state: PlannedState) -> DomainResult<()> {
        let model = planned_state::ActiveModel {
            id: Set(state.id),
            kind: Set(state.kind.as_str().to_string()),
            start: Set(state.start),
            planned_end: Set(state.planned_end),
            note_internal: Set(state.note_internal),
            made_by_id: Set(state.made_by_id),
            repeating_state_id: Set(state.repeating_state_id),
            associated_event_id: Set(state.associated_event_id),
            next_planned_state_id: Set(state.next_planned_state_id),
            start_handled: Set(state.start_handled),
            end_handled: Set(state.end_handled),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        planned_state::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn set_successor(&self, id: i32, next_id: Option<i32>) -> DomainResult<()> {
        if let Some(next_id) = next_id {
            // The unique index also guards this, but a pre-check yields a
            // readable conflict instead of a driver error.
            let taken = planned_state::Entity::find()
                .filter(planned_state::Column::NextPlannedStateId.eq(next_id))
                .filter(planned_state::Column::Id.ne(id))
                .one(&self.db)
                .await
                .map_err(db_err)?;
            if taken.is_some() {
                return Err(DomainError::Conflict(format!(
                    "State {next_id} already has a predecessor"
                )));
            }
        }

        planned_state::Entity::update_many()
            .filter(planned_state::Column::Id.eq(id))
            .col_expr(
                planned_state::Column::NextPlannedStateId,
                Expr::value(next_id),
            )
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn find_due_starts(&self, now: DateTime<Utc>) -> DomainResult<Vec<PlannedState>> {
        let models = planned_state::Entity::find()
            .filter(planned_state::Column::StartHandled.eq(false))
            .filter(planned_state::Column::Start.lte(now))
            .order_by_asc(planned_state::Column::Start)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(state_to_domain).collect())
    }

    async fn find_due_ends(&self, now: DateTime<Utc>) -> DomainResult<Vec<PlannedState>> {
        let models = planned_state::Entity::find()
            .filter(planned_state::Column::EndHandled.eq(false))
            .filter(planned_state::Column::PlannedEnd.lte(now))
            .order_by_asc(planned_state::Column::PlannedEnd)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(state_to_domain).collect())
    }

    async fn mark_start_handled(&self, id: i32) -> DomainResult<()> {
        planned_state::Entity::update_many()
            .filter(planned_state::Column::Id.eq(id))
            .col_expr(planned_state::Column::StartHandled, Expr::value(true))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn mark_end_handled(&self, id: i32) -> DomainResult<()> {
        planned_state::Entity::update_many()
            .filter(planned_state::Column::Id.eq(id))
            .col_expr(planned_state::Column::EndHandled, Expr::value(true))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

// ── Repeating states ────────────────────────────────────────────

pub struct SeaOrmRepeatingStateRepository {
    db: DatabaseConnection,
}

impl SeaOrmRepeatingStateRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn weekday_from_monday(n: i32) -> Weekday {
    match n {
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        6 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}

fn template_to_domain(m: repeating_state::Model) -> RepeatingState {
    RepeatingState {
        id: m.id,
        kind: kind_from_str(&m.kind),
        day_of_week: weekday_from_monday(m.day_of_week),
        time_from: m.time_from,
        time_to: m.time_to,
        effective_from: m.effective_from,
        effective_to: m.effective_to,
        note_internal: m.note_internal,
        made_by_id: m.made_by_id,
    }
}

#[async_trait]
impl RepeatingStateRepository for SeaOrmRepeatingStateRepository {
    async fn find_all(&self) -> DomainResult<Vec<RepeatingState>> {
        let models = repeating_state::Entity::find()
            .order_by_asc(repeating_state::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(template_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<RepeatingState>> {
        let model = repeating_state::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(template_to_domain))
    }

    async fn create(&self, template: NewRepeatingState) -> DomainResult<RepeatingState> {
        let model = repeating_state::ActiveModel {
            kind: Set(template.kind.as_str().to_string()),
            day_of_week: Set(template.day_of_week.number_from_monday() as i32),
            time_from: Set(template.time_from),
            time_to: Set(template.time_to),
            effective_from: Set(template.effective_from),
            effective_to: Set(template.effective_to),
            note_internal: Set(template.note_internal),
            made_by_id: Set(template.made_by_id),
            ..Default::default()
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(template_to_domain(inserted))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        repeating_state::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
