//! Planned state entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "planned_states")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// State kind: open, closed
    pub kind: String,
    pub start: DateTimeUtc,
    pub planned_end: DateTimeUtc,
    #[sea_orm(nullable)]
    pub note_internal: Option<String>,
    pub made_by_id: i32,
    #[sea_orm(nullable)]
    pub repeating_state_id: Option<i32>,
    #[sea_orm(nullable)]
    pub associated_event_id: Option<i32>,
    /// At most one successor per state, enforced by a unique index
    #[sea_orm(nullable)]
    pub next_planned_state_id: Option<i32>,
    pub start_handled: bool,
    pub end_handled: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::MadeById",
        to = "super::user::Column::Id"
    )]
    MadeBy,
    #[sea_orm(
        belongs_to = "super::repeating_state::Entity",
        from = "Column::RepeatingStateId",
        to = "super::repeating_state::Column::Id"
    )]
    RepeatingState,
    #[sea_orm(
        belongs_to = "super::club_event::Entity",
        from = "Column::AssociatedEventId",
        to = "super::club_event::Column::Id"
    )]
    AssociatedEvent,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::NextPlannedStateId",
        to = "Column::Id"
    )]
    NextPlannedState,
}

impl Related<super::club_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssociatedEvent.def()
    }
}

impl Related<super::repeating_state::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RepeatingState.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
