//! Board games transport DTOs
//!
//! Facades convert domain models into these shapes. Members and managers
//! receive different views of the same entities.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    BoardGame, Category, ItemEvent, Reservation, ReservationItem,
};

/// Category as shown to any caller
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub colour_hex: String,
}

impl From<Category> for CategoryDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            colour_hex: c.colour_hex,
        }
    }
}

/// Board game as shown to members and anonymous visitors
#[derive(Debug, Serialize, ToSchema)]
pub struct BoardGameDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_id: i32,
    pub players_min: Option<i32>,
    pub players_max: Option<i32>,
    /// Whether at least one copy can be reserved right now
    pub available: bool,
    pub default_reservation_days: i32,
}

impl BoardGameDto {
    pub fn from_game(game: &BoardGame, available: i64) -> Self {
        Self {
            id: game.id,
            name: game.name.clone(),
            description: game.description.clone(),
            image_url: game.image_url.clone(),
            category_id: game.category_id,
            players_min: game.players_min,
            players_max: game.players_max,
            available: available > 0,
            default_reservation_days: game.default_reservation_days,
        }
    }
}

/// Board game as shown to board games managers
#[derive(Debug, Serialize, ToSchema)]
pub struct ManagerBoardGameDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_id: i32,
    pub players_min: Option<i32>,
    pub players_max: Option<i32>,
    pub note_internal: Option<String>,
    pub owner_id: Option<i32>,
    pub in_stock: i32,
    pub unavailable: i32,
    /// Copies reservable right now
    pub available: i64,
    pub visible: bool,
    pub default_reservation_days: i32,
}

impl ManagerBoardGameDto {
    pub fn from_game(game: &BoardGame, available: i64) -> Self {
        Self {
            id: game.id,
            name: game.name.clone(),
            description: game.description.clone(),
            image_url: game.image_url.clone(),
            category_id: game.category_id,
            players_min: game.players_min,
            players_max: game.players_max,
            note_internal: game.note_internal.clone(),
            owner_id: game.owner_id,
            in_stock: game.in_stock,
            unavailable: game.unavailable,
            available,
            visible: game.visible,
            default_reservation_days: game.default_reservation_days,
        }
    }
}

/// Caller-dependent board game view
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum BoardGameView {
    User(BoardGameDto),
    Manager(ManagerBoardGameDto),
}

/// Reservation item as shown to its owner
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationItemDto {
    pub id: i32,
    pub board_game_id: i32,
    pub expires_on: DateTime<Utc>,
    pub state: String,
}

impl From<&ReservationItem> for ReservationItemDto {
    fn from(item: &ReservationItem) -> Self {
        Self {
            id: item.id,
            board_game_id: item.board_game_id,
            expires_on: item.expires_on,
            state: item.state.as_str().to_string(),
        }
    }
}

/// Reservation as shown to its owner
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationDto {
    pub id: i32,
    pub made_by_id: i32,
    pub made_on: DateTime<Utc>,
    pub note_user: Option<String>,
    pub items: Vec<ReservationItemDto>,
}

impl ReservationDto {
    pub fn from_parts(reservation: &Reservation, items: &[ReservationItem]) -> Self {
        Self {
            id: reservation.id,
            made_by_id: reservation.made_by_id,
            made_on: reservation.made_on,
            note_user: reservation.note_user.clone(),
            items: items.iter().map(ReservationItemDto::from).collect(),
        }
    }
}

/// Reservation as shown to board games managers (adds the internal note)
#[derive(Debug, Serialize, ToSchema)]
pub struct ManagerReservationDto {
    pub id: i32,
    pub made_by_id: i32,
    pub made_on: DateTime<Utc>,
    pub note_user: Option<String>,
    pub note_internal: Option<String>,
    pub items: Vec<ReservationItemDto>,
}

impl ManagerReservationDto {
    pub fn from_parts(reservation: &Reservation, items: &[ReservationItem]) -> Self {
        Self {
            id: reservation.id,
            made_by_id: reservation.made_by_id,
            made_on: reservation.made_on,
            note_user: reservation.note_user.clone(),
            note_internal: reservation.note_internal.clone(),
            items: items.iter().map(ReservationItemDto::from).collect(),
        }
    }
}

/// Caller-dependent reservation view
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ReservationView {
    User(ReservationDto),
    Manager(ManagerReservationDto),
}

impl ReservationView {
    pub fn id(&self) -> i32 {
        match self {
            Self::User(dto) => dto.id,
            Self::Manager(dto) => dto.id,
        }
    }
}

/// One audit log entry of a reservation item
#[derive(Debug, Serialize, ToSchema)]
pub struct ItemEventDto {
    pub made_by_id: Option<i32>,
    pub made_on: DateTime<Utc>,
    pub event_type: String,
    pub new_state: Option<String>,
    pub new_expires_on: Option<DateTime<Utc>>,
    pub note_internal: Option<String>,
}

impl From<&ItemEvent> for ItemEventDto {
    fn from(e: &ItemEvent) -> Self {
        Self {
            made_by_id: e.made_by_id,
            made_on: e.made_on,
            event_type: e.event_type.as_str().to_string(),
            new_state: e.new_state.map(|s| s.as_str().to_string()),
            new_expires_on: e.new_expires_on,
            note_internal: e.note_internal.clone(),
        }
    }
}
