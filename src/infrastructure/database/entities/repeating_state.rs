//! Repeating state template entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "repeating_states")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// State kind: open, closed
    pub kind: String,
    /// ISO weekday number, Monday = 1
    pub day_of_week: i32,
    pub time_from: Time,
    pub time_to: Time,
    pub effective_from: Date,
    pub effective_to: Date,
    #[sea_orm(nullable)]
    pub note_internal: Option<String>,
    pub made_by_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::MadeById",
        to = "super::user::Column::Id"
    )]
    MadeBy,
    #[sea_orm(has_many = "super::planned_state::Entity")]
    PlannedStates,
}

impl Related<super::planned_state::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlannedStates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
