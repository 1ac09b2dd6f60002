//! Reservation item entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "board_game_reservation_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub reservation_id: i32,
    pub board_game_id: i32,
    pub expires_on: DateTimeUtc,
    /// Lifecycle state: Reserved, HandedOver, Returned, Cancelled, Expired
    pub state: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::reservation::Entity",
        from = "Column::ReservationId",
        to = "super::reservation::Column::Id"
    )]
    Reservation,
    #[sea_orm(
        belongs_to = "super::board_game::Entity",
        from = "Column::BoardGameId",
        to = "super::board_game::Column::Id"
    )]
    BoardGame,
    #[sea_orm(has_many = "super::reservation_item_event::Entity")]
    Events,
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservation.def()
    }
}

impl Related<super::board_game::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BoardGame.def()
    }
}

impl Related<super::reservation_item_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
