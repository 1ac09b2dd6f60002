//! SeaORM entities, one per table.

pub mod board_game;
pub mod board_game_category;
pub mod club_event;
pub mod planned_state;
pub mod repeating_state;
pub mod reservation;
pub mod reservation_item;
pub mod reservation_item_event;
pub mod role;
pub mod user;
pub mod user_role;
