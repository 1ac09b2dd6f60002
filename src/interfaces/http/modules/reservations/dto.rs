//! Reservation DTOs (requests; responses live in the application layer)

use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Create reservation request (caller reserves for themselves)
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateReservationRequest {
    pub note: Option<String>,
    /// One entry per requested copy; a game listed twice reserves two copies
    #[validate(length(min = 1))]
    pub board_game_ids: Vec<i32>,
}

/// Manager-created reservation on behalf of another member
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ManagerCreateReservationRequest {
    pub user_id: i32,
    pub note_internal: Option<String>,
    #[validate(length(min = 1))]
    pub board_game_ids: Vec<i32>,
}

/// Add items to an existing reservation
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AddItemsRequest {
    #[validate(length(min = 1))]
    pub board_game_ids: Vec<i32>,
}

/// Note update request
#[derive(Debug, Deserialize, ToSchema)]
pub struct NoteRequest {
    pub note: Option<String>,
}

/// Item state change request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ItemStateRequest {
    /// Target state: HandedOver, Returned or Cancelled
    pub state: String,
    pub note_internal: Option<String>,
}

/// Item expiry extension request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ExtendItemRequest {
    pub new_expires_on: DateTime<Utc>,
    pub note_internal: Option<String>,
}
