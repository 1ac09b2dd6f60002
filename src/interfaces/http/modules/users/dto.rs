//! User management DTOs

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Create user request
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub nickname: Option<String>,
}

/// Role assignment request
#[derive(Debug, Deserialize, ToSchema)]
pub struct RoleRequest {
    /// Role name (member, board-games-manager, states-manager, admin)
    pub role: String,
}

/// List users query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListUsersParams {
    /// Substring matched against username and nickname
    pub search: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}
fn default_page_size() -> u32 {
    20
}
