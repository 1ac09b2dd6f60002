//! Board game catalog DTOs (requests; responses live in the application
//! layer)

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Category create/update request
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    /// Display colour as a hex string without the leading `#`
    #[validate(length(min = 6, max = 6))]
    pub colour_hex: String,
}

/// Create board game request
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateBoardGameRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_id: i32,
    pub players_min: Option<i32>,
    pub players_max: Option<i32>,
    pub note_internal: Option<String>,
    pub owner_id: Option<i32>,
    #[serde(default)]
    pub in_stock: i32,
    #[serde(default)]
    pub unavailable: i32,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default = "default_reservation_days")]
    pub default_reservation_days: i32,
}

fn default_visible() -> bool {
    true
}

fn default_reservation_days() -> i32 {
    14
}

/// Update board game request (full replacement)
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateBoardGameRequest {
    #[validate(length(min = 1, max = 128))]
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
    pub visible: bool,
    pub default_reservation_days: i32,
}

/// Stock-only update request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStockRequest {
    pub in_stock: i32,
    pub unavailable: i32,
    pub visible: bool,
}

/// List board games query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListBoardGamesParams {
    /// Visibility filter; only honoured for board games managers
    pub visible: Option<bool>,
    pub category_id: Option<i32>,
    /// Only games playable by this many players
    pub players: Option<i32>,
}
