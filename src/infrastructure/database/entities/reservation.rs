//! Board game reservation entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "board_game_reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub made_by_id: i32,
    pub made_on: DateTimeUtc,
    #[sea_orm(nullable)]
    pub note_user: Option<String>,
    #[sea_orm(nullable)]
    pub note_internal: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::MadeById",
        to = "super::user::Column::Id"
    )]
    MadeBy,
    #[sea_orm(has_many = "super::reservation_item::Entity")]
    Items,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MadeBy.def()
    }
}

impl Related<super::reservation_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
