//! Board game entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "board_games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(nullable)]
    pub description: Option<String>,
    #[sea_orm(nullable)]
    pub image_url: Option<String>,
    pub category_id: i32,
    #[sea_orm(nullable)]
    pub players_min: Option<i32>,
    #[sea_orm(nullable)]
    pub players_max: Option<i32>,
    #[sea_orm(nullable)]
    pub note_internal: Option<String>,
    /// Member who lent the game to the club, if not club-owned
    #[sea_orm(nullable)]
    pub owner_id: Option<i32>,
    pub in_stock: i32,
    pub unavailable: i32,
    pub visible: bool,
    pub default_reservation_days: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::board_game_category::Entity",
        from = "Column::CategoryId",
        to = "super::board_game_category::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id"
    )]
    Owner,
    #[sea_orm(has_many = "super::reservation_item::Entity")]
    ReservationItems,
}

impl Related<super::board_game_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::reservation_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReservationItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
