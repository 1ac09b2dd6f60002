//! Club event DTOs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Create or update a club event
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ClubEventRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub place: Option<String>,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}
