//! Club state DTOs (requests; responses live in the application layer)

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Deserializer};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{DomainError, DomainResult, StateKind};

/// Distinguishes an absent field (keep) from an explicit null (clear).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Plan a new club state
#[derive(Debug, Deserialize, ToSchema)]
pub struct PlanStateRequest {
    /// State kind: open, closed
    pub kind: String,
    pub start: DateTime<Utc>,
    pub planned_end: DateTime<Utc>,
    pub note_internal: Option<String>,
    pub associated_event_id: Option<i32>,
}

/// Modify a planned state; omitted fields stay unchanged
#[derive(Debug, Deserialize, ToSchema)]
pub struct ModifyStateRequest {
    pub kind: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub planned_end: Option<DateTime<Utc>>,
    /// Absent = keep the current note, explicit null = clear it
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub note_internal: Option<Option<String>>,
    /// Absent = keep the current link, explicit null = clear it
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub associated_event_id: Option<Option<i32>>,
}

/// Link (or clear) a planned state's successor
#[derive(Debug, Deserialize, ToSchema)]
pub struct LinkSuccessorRequest {
    pub next_id: Option<i32>,
}

/// Create a repeating state template
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRepeatingStateRequest {
    /// State kind: open, closed
    pub kind: String,
    /// ISO weekday number, Monday = 1
    pub day_of_week: u32,
    pub time_from: NaiveTime,
    pub time_to: NaiveTime,
    pub effective_from: NaiveDate,
    pub effective_to: NaiveDate,
    pub note_internal: Option<String>,
}

/// Range query parameters for state listings
#[derive(Debug, Deserialize, IntoParams)]
pub struct StateRangeParams {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// Query parameters for the next planned state
#[derive(Debug, Deserialize, IntoParams)]
pub struct NextStateParams {
    /// Optional kind filter: open, closed
    pub kind: Option<String>,
}

pub fn parse_kind(s: &str) -> DomainResult<StateKind> {
    StateKind::from_str(s).ok_or_else(|| DomainError::Validation(format!("Unknown state kind '{s}'")))
}

pub fn parse_weekday(n: u32) -> DomainResult<Weekday> {
    match n {
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        7 => Ok(Weekday::Sun),
        _ => Err(DomainError::Validation(format!(
            "Day of week must be 1-7, got {n}"
        ))),
    }
}
