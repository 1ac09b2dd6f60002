//! Club state planning entities
//!
//! A planned state is a scheduled interval during which the club is open or
//! closed. States may chain: at most one successor per state, and the chain
//! must stay acyclic. Repeating states are weekly templates materialized
//! into planned states.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};

use crate::domain::{DomainError, DomainResult};

/// Whether the club is open or closed during a planned interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    Open,
    Closed,
}

impl StateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

impl std::fmt::Display for StateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A scheduled club open/closed interval
#[derive(Debug, Clone)]
pub struct PlannedState {
    pub id: i32,
    pub kind: StateKind,
    pub start: DateTime<Utc>,
    pub planned_end: DateTime<Utc>,
    pub note_internal: Option<String>,
    pub made_by_id: i32,
    /// Template this state was generated from, if any
    pub repeating_state_id: Option<i32>,
    /// Club event this state belongs to, if any
    pub associated_event_id: Option<i32>,
    /// At most one successor; starts when this state ends
    pub next_planned_state_id: Option<i32>,
    /// Whether the start transition handler already ran
    pub start_handled: bool,
    /// Whether the end transition handler already ran
    pub end_handled: bool,
}

impl PlannedState {
    pub fn validate_interval(
        start: DateTime<Utc>,
        planned_end: DateTime<Utc>,
    ) -> DomainResult<()> {
        if planned_end <= start {
            return Err(DomainError::Validation(
                "Planned end must be after start".to_string(),
            ));
        }
        Ok(())
    }

    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.start <= now
    }

    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.planned_end <= now
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.has_started(now) && !self.has_ended(now)
    }

    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && start < self.planned_end
    }
}

/// Data for planning a new state
#[derive(Debug, Clone)]
pub struct NewPlannedState {
    pub kind: StateKind,
    pub start: DateTime<Utc>,
    pub planned_end: DateTime<Utc>,
    pub note_internal: Option<String>,
    pub made_by_id: i32,
    pub repeating_state_id: Option<i32>,
    pub associated_event_id: Option<i32>,
}

/// Weekly template from which planned states are generated
#[derive(Debug, Clone)]
pub struct RepeatingState {
    pub id: i32,
    pub kind: StateKind,
    pub day_of_week: Weekday,
    pub time_from: NaiveTime,
    pub time_to: NaiveTime,
    pub effective_from: NaiveDate,
    pub effective_to: NaiveDate,
    pub note_internal: Option<String>,
    pub made_by_id: i32,
}

impl RepeatingState {
    pub fn validate(&self) -> DomainResult<()> {
        if self.effective_to < self.effective_from {
            return Err(DomainError::Validation(
                "Effective range end precedes its start".to_string(),
            ));
        }
        Ok(())
    }

    /// Concrete (start, end) intervals inside the effective range, one per
    /// matching weekday. A `time_to` at or before `time_from` spills into
    /// the next day.
    pub fn occurrences(&self) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
        let mut result = Vec::new();
        let mut date = self.effective_from;
        while date <= self.effective_to {
            if date.weekday() == self.day_of_week {
                let start = date.and_time(self.time_from).and_utc();
                let mut end = date.and_time(self.time_to).and_utc();
                if end <= start {
                    end += Duration::days(1);
                }
                result.push((start, end));
            }
            date += Duration::days(1);
        }
        result
    }
}

/// Data for creating a repeating state template
#[derive(Debug, Clone)]
pub struct NewRepeatingState {
    pub kind: StateKind,
    pub day_of_week: Weekday,
    pub time_from: NaiveTime,
    pub time_to: NaiveTime,
    pub effective_from: NaiveDate,
    pub effective_to: NaiveDate,
    pub note_internal: Option<String>,
    pub made_by_id: i32,
}

/// A club event (tournament, games night) planned states may link to
#[derive(Debug, Clone)]
pub struct ClubEvent {
    pub id: i32,
    pub name: String,
    pub place: Option<String>,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub made_by_id: i32,
}

/// Data for creating a club event
#[derive(Debug, Clone)]
pub struct NewClubEvent {
    pub name: String,
    pub place: Option<String>,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub made_by_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn state(start_h: u32, end_h: u32) -> PlannedState {
        PlannedState {
            id: 1,
            kind: StateKind::Open,
            start: Utc.with_ymd_and_hms(2026, 3, 2, start_h, 0, 0).unwrap(),
            planned_end: Utc.with_ymd_and_hms(2026, 3, 2, end_h, 0, 0).unwrap(),
            note_internal: None,
            made_by_id: 1,
            repeating_state_id: None,
            associated_event_id: None,
            next_planned_state_id: None,
            start_handled: false,
            end_handled: false,
        }
    }

    #[test]
    fn interval_must_be_forward() {
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 16, 0, 0).unwrap();
        assert!(PlannedState::validate_interval(start, start).is_err());
        assert!(
            PlannedState::validate_interval(start, start + Duration::hours(4)).is_ok()
        );
    }

    #[test]
    fn active_within_interval_only() {
        let s = state(16, 22);
        let before = Utc.with_ymd_and_hms(2026, 3, 2, 15, 59, 0).unwrap();
        let during = Utc.with_ymd_and_hms(2026, 3, 2, 18, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2026, 3, 2, 22, 0, 0).unwrap();
        assert!(!s.is_active(before));
        assert!(s.is_active(during));
        assert!(!s.is_active(after));
    }

    #[test]
    fn overlap_excludes_touching_intervals() {
        let s = state(16, 22);
        let day = |h| Utc.with_ymd_and_hms(2026, 3, 2, h, 0, 0).unwrap();
        assert!(s.overlaps(day(15), day(17)));
        assert!(s.overlaps(day(17), day(18)));
        // back-to-back states do not overlap
        assert!(!s.overlaps(day(22), day(23)));
        assert!(!s.overlaps(day(14), day(16)));
    }

    fn template() -> RepeatingState {
        RepeatingState {
            id: 1,
            kind: StateKind::Open,
            day_of_week: Weekday::Wed,
            time_from: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            time_to: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            // 2026-03-01 is a Sunday; the range holds four Wednesdays
            effective_from: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            effective_to: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            note_internal: None,
            made_by_id: 1,
        }
    }

    #[test]
    fn occurrences_fall_on_the_template_weekday() {
        let occurrences = template().occurrences();
        assert_eq!(occurrences.len(), 4);
        for (start, end) in occurrences {
            assert_eq!(start.weekday(), Weekday::Wed);
            assert_eq!(end - start, Duration::hours(6));
        }
    }

    #[test]
    fn overnight_template_spills_into_next_day() {
        let mut t = template();
        t.time_from = NaiveTime::from_hms_opt(20, 0, 0).unwrap();
        t.time_to = NaiveTime::from_hms_opt(2, 0, 0).unwrap();
        let (start, end) = t.occurrences()[0];
        assert_eq!(end - start, Duration::hours(6));
        assert_eq!(end.weekday(), Weekday::Thu);
    }

    #[test]
    fn inverted_effective_range_rejected() {
        let mut t = template();
        t.effective_to = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        assert!(t.validate().is_err());
    }
}
