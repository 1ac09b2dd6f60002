//! Reservation aggregate and reservation item state machine
//!
//! A reservation groups items, one per reserved board game copy. Each item
//! moves through a small lifecycle; every transition appends an immutable
//! event row rather than mutating history.

use chrono::{DateTime, Utc};

use crate::domain::{DomainError, DomainResult};

/// Lifecycle state of a single reserved copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    /// Reserved, waiting to be picked up
    Reserved,
    /// Picked up by the member
    HandedOver,
    /// Returned to the club (terminal)
    Returned,
    /// Cancelled before return (terminal)
    Cancelled,
    /// Not picked up before `expires_on`; late pickup still possible
    Expired,
}

impl ItemState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved => "Reserved",
            Self::HandedOver => "HandedOver",
            Self::Returned => "Returned",
            Self::Cancelled => "Cancelled",
            Self::Expired => "Expired",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Reserved" => Some(Self::Reserved),
            "HandedOver" => Some(Self::HandedOver),
            "Returned" => Some(Self::Returned),
            "Cancelled" => Some(Self::Cancelled),
            "Expired" => Some(Self::Expired),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Returned | Self::Cancelled)
    }

    /// Whether an item in this state still occupies a physical copy
    pub fn holds_copy(&self) -> bool {
        !self.is_terminal()
    }

    pub fn can_transition_to(&self, to: ItemState) -> bool {
        use ItemState::*;
        matches!(
            (self, to),
            (Reserved, HandedOver)
                | (Reserved, Cancelled)
                | (Reserved, Expired)
                | (HandedOver, Returned)
                | (Expired, HandedOver)
                | (Expired, Cancelled)
        )
    }

    /// The audit event type recorded when entering this state
    fn entry_event(&self) -> ItemEventType {
        match self {
            Self::Reserved => ItemEventType::Created,
            Self::HandedOver => ItemEventType::HandedOver,
            Self::Returned => ItemEventType::Returned,
            Self::Cancelled => ItemEventType::Cancelled,
            Self::Expired => ItemEventType::Expired,
        }
    }
}

impl std::fmt::Display for ItemState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of audit event appended to a reservation item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEventType {
    Created,
    HandedOver,
    Returned,
    Cancelled,
    Expired,
    ExtensionGranted,
    NoteChanged,
}

impl ItemEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::HandedOver => "HandedOver",
            Self::Returned => "Returned",
            Self::Cancelled => "Cancelled",
            Self::Expired => "Expired",
            Self::ExtensionGranted => "ExtensionGranted",
            Self::NoteChanged => "NoteChanged",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Created" => Some(Self::Created),
            "HandedOver" => Some(Self::HandedOver),
            "Returned" => Some(Self::Returned),
            "Cancelled" => Some(Self::Cancelled),
            "Expired" => Some(Self::Expired),
            "ExtensionGranted" => Some(Self::ExtensionGranted),
            "NoteChanged" => Some(Self::NoteChanged),
            _ => None,
        }
    }
}

/// A reservation made by a single member
#[derive(Debug, Clone)]
pub struct Reservation {
    pub id: i32,
    pub made_by_id: i32,
    pub made_on: DateTime<Utc>,
    /// Note visible to the member who made the reservation
    pub note_user: Option<String>,
    /// Note visible only to board games managers
    pub note_internal: Option<String>,
}

/// One reserved board game copy inside a reservation
#[derive(Debug, Clone)]
pub struct ReservationItem {
    pub id: i32,
    pub reservation_id: i32,
    pub board_game_id: i32,
    pub expires_on: DateTime<Utc>,
    pub state: ItemState,
}

impl ReservationItem {
    /// Apply a state transition, producing the audit event to persist.
    ///
    /// `made_by_id` is `None` for system-driven transitions (expiry sweep).
    pub fn transition(
        &mut self,
        to: ItemState,
        made_by_id: Option<i32>,
        note_internal: Option<String>,
    ) -> DomainResult<ItemEvent> {
        if !self.state.can_transition_to(to) {
            return Err(DomainError::InvalidTransition {
                from: self.state.as_str(),
                to: to.as_str(),
            });
        }
        self.state = to;
        Ok(ItemEvent {
            reservation_item_id: self.id,
            made_by_id,
            made_on: Utc::now(),
            event_type: to.entry_event(),
            new_state: Some(to),
            new_expires_on: None,
            note_internal,
        })
    }

    /// Grant an expiry extension. An already expired item returns to
    /// `Reserved`; handed-over or terminal items cannot be extended.
    pub fn grant_extension(
        &mut self,
        new_expires_on: DateTime<Utc>,
        made_by_id: Option<i32>,
        note_internal: Option<String>,
    ) -> DomainResult<ItemEvent> {
        match self.state {
            ItemState::Reserved | ItemState::Expired => {
                self.state = ItemState::Reserved;
                self.expires_on = new_expires_on;
                Ok(ItemEvent {
                    reservation_item_id: self.id,
                    made_by_id,
                    made_on: Utc::now(),
                    event_type: ItemEventType::ExtensionGranted,
                    new_state: Some(ItemState::Reserved),
                    new_expires_on: Some(new_expires_on),
                    note_internal,
                })
            }
            other => Err(DomainError::InvalidTransition {
                from: other.as_str(),
                to: ItemState::Reserved.as_str(),
            }),
        }
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.state == ItemState::Reserved && self.expires_on < now
    }
}

/// Immutable audit record of a change applied to a reservation item.
/// Keyed by `(reservation_item_id, made_on)`; never updated or deleted.
#[derive(Debug, Clone)]
pub struct ItemEvent {
    pub reservation_item_id: i32,
    /// `None` when the system performed the change
    pub made_by_id: Option<i32>,
    pub made_on: DateTime<Utc>,
    pub event_type: ItemEventType,
    pub new_state: Option<ItemState>,
    pub new_expires_on: Option<DateTime<Utc>>,
    pub note_internal: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_item(state: ItemState) -> ReservationItem {
        ReservationItem {
            id: 1,
            reservation_id: 1,
            board_game_id: 7,
            expires_on: Utc::now() + Duration::days(14),
            state,
        }
    }

    #[test]
    fn reserved_can_be_handed_over() {
        let mut item = sample_item(ItemState::Reserved);
        let event = item.transition(ItemState::HandedOver, Some(3), None).unwrap();
        assert_eq!(item.state, ItemState::HandedOver);
        assert_eq!(event.event_type, ItemEventType::HandedOver);
        assert_eq!(event.new_state, Some(ItemState::HandedOver));
        assert_eq!(event.made_by_id, Some(3));
    }

    #[test]
    fn handed_over_can_only_be_returned() {
        let mut item = sample_item(ItemState::HandedOver);
        assert!(item.transition(ItemState::Cancelled, Some(3), None).is_err());
        assert!(item.transition(ItemState::Expired, None, None).is_err());
        assert!(item.transition(ItemState::Returned, Some(3), None).is_ok());
    }

    #[test]
    fn terminal_states_accept_nothing() {
        for terminal in [ItemState::Returned, ItemState::Cancelled] {
            let mut item = sample_item(terminal);
            for target in [
                ItemState::Reserved,
                ItemState::HandedOver,
                ItemState::Returned,
                ItemState::Cancelled,
                ItemState::Expired,
            ] {
                assert!(
                    item.transition(target, Some(1), None).is_err(),
                    "{terminal} -> {target} must be rejected"
                );
            }
        }
    }

    #[test]
    fn expired_item_allows_late_pickup() {
        let mut item = sample_item(ItemState::Expired);
        assert!(item.transition(ItemState::HandedOver, Some(3), None).is_ok());
    }

    #[test]
    fn extension_resets_expired_to_reserved() {
        let mut item = sample_item(ItemState::Expired);
        let new_expiry = Utc::now() + Duration::days(7);
        let event = item.grant_extension(new_expiry, Some(3), None).unwrap();
        assert_eq!(item.state, ItemState::Reserved);
        assert_eq!(item.expires_on, new_expiry);
        assert_eq!(event.event_type, ItemEventType::ExtensionGranted);
        assert_eq!(event.new_expires_on, Some(new_expiry));
    }

    #[test]
    fn handed_over_item_cannot_be_extended() {
        let mut item = sample_item(ItemState::HandedOver);
        assert!(item
            .grant_extension(Utc::now() + Duration::days(7), Some(3), None)
            .is_err());
    }

    #[test]
    fn overdue_only_while_reserved() {
        let mut item = sample_item(ItemState::Reserved);
        item.expires_on = Utc::now() - Duration::hours(1);
        assert!(item.is_overdue(Utc::now()));

        item.state = ItemState::HandedOver;
        assert!(!item.is_overdue(Utc::now()));
    }

    #[test]
    fn state_str_roundtrip() {
        for state in [
            ItemState::Reserved,
            ItemState::HandedOver,
            ItemState::Returned,
            ItemState::Cancelled,
            ItemState::Expired,
        ] {
            assert_eq!(ItemState::from_str(state.as_str()), Some(state));
        }
        assert_eq!(ItemState::from_str("Lost"), None);
    }

    #[test]
    fn terminal_items_release_their_copy() {
        assert!(ItemState::Reserved.holds_copy());
        assert!(ItemState::HandedOver.holds_copy());
        assert!(ItemState::Expired.holds_copy());
        assert!(!ItemState::Returned.holds_copy());
        assert!(!ItemState::Cancelled.holds_copy());
    }
}
