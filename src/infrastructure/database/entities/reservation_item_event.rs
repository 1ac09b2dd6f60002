//! Reservation item event entity
//!
//! Append-only audit log keyed by `(reservation_item_id, made_on)`.
//! Rows are only ever inserted, and removed solely by the cascade when
//! their item is deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "board_game_reservation_item_events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub reservation_item_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub made_on: DateTimeUtc,
    /// Null when the system performed the change (expiry sweep)
    #[sea_orm(nullable)]
    pub made_by_id: Option<i32>,
    pub event_type: String,
    #[sea_orm(nullable)]
    pub new_state: Option<String>,
    #[sea_orm(nullable)]
    pub new_expires_on: Option<DateTimeUtc>,
    #[sea_orm(nullable)]
    pub note_internal: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::reservation_item::Entity",
        from = "Column::ReservationItemId",
        to = "super::reservation_item::Column::Id"
    )]
    Item,
}

impl Related<super::reservation_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
