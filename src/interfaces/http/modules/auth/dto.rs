//! Auth DTOs

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::application::users::UserDto;

/// Login request
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Login response with the issued bearer token
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserDto,
    pub roles: Vec<String>,
}
