//! Club event entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "club_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(nullable)]
    pub place: Option<String>,
    pub from: DateTimeUtc,
    pub to: DateTimeUtc,
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
