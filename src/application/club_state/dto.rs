//! Club state transport DTOs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{ClubEvent, PlannedState, RepeatingState};

/// Planned state in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct PlannedStateDto {
    pub id: i32,
    pub kind: String,
    pub start: DateTime<Utc>,
    pub planned_end: DateTime<Utc>,
    pub note_internal: Option<String>,
    pub made_by_id: i32,
    pub repeating_state_id: Option<i32>,
    pub associated_event_id: Option<i32>,
    pub next_planned_state_id: Option<i32>,
}

impl From<PlannedState> for PlannedStateDto {
    fn from(s: PlannedState) -> Self {
        Self {
            id: s.id,
            kind: s.kind.as_str().to_string(),
            start: s.start,
            planned_end: s.planned_end,
            note_internal: s.note_internal,
            made_by_id: s.made_by_id,
            repeating_state_id: s.repeating_state_id,
            associated_event_id: s.associated_event_id,
            next_planned_state_id: s.next_planned_state_id,
        }
    }
}

/// Current club state summary
#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentStateDto {
    /// `open` or `closed`; closed when nothing is planned right now
    pub kind: String,
    pub state: Option<PlannedStateDto>,
    /// Next planned state after now, if any
    pub next: Option<PlannedStateDto>,
}

/// Repeating state template in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct RepeatingStateDto {
    pub id: i32,
    pub kind: String,
    /// ISO weekday number, Monday = 1
    pub day_of_week: u32,
    pub time_from: NaiveTime,
    pub time_to: NaiveTime,
    pub effective_from: NaiveDate,
    pub effective_to: NaiveDate,
    pub note_internal: Option<String>,
    pub made_by_id: i32,
}

impl From<RepeatingState> for RepeatingStateDto {
    fn from(t: RepeatingState) -> Self {
        Self {
            id: t.id,
            kind: t.kind.as_str().to_string(),
            day_of_week: t.day_of_week.number_from_monday(),
            time_from: t.time_from,
            time_to: t.time_to,
            effective_from: t.effective_from,
            effective_to: t.effective_to,
            note_internal: t.note_internal,
            made_by_id: t.made_by_id,
        }
    }
}

/// Result of materializing a repeating state template
#[derive(Debug, Serialize, ToSchema)]
pub struct RepeatingStateCreatedDto {
    pub template: RepeatingStateDto,
    pub created: Vec<PlannedStateDto>,
    /// Occurrence starts skipped because they overlapped existing states
    pub skipped: Vec<DateTime<Utc>>,
}

/// Club event in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ClubEventDto {
    pub id: i32,
    pub name: String,
    pub place: Option<String>,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub made_by_id: i32,
}

impl From<ClubEvent> for ClubEventDto {
    fn from(e: ClubEvent) -> Self {
        Self {
            id: e.id,
            name: e.name,
            place: e.place,
            from: e.from,
            to: e.to,
            made_by_id: e.made_by_id,
        }
    }
}
