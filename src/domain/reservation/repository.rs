//! Reservation repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{ItemEvent, Reservation, ReservationItem};
use crate::domain::DomainResult;

/// Data for creating a new reservation
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub made_by_id: i32,
    pub note_user: Option<String>,
    pub note_internal: Option<String>,
}

/// Data for one item of a new reservation
#[derive(Debug, Clone)]
pub struct NewReservationItem {
    pub board_game_id: i32,
    pub expires_on: DateTime<Utc>,
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>>;

    /// Reservations made by one user, ordered by `made_on` descending
    async fn list_by_user(&self, user_id: i32) -> DomainResult<Vec<Reservation>>;

    /// All reservations, ordered by `made_on` descending
    async fn list_all(&self) -> DomainResult<Vec<Reservation>>;

    /// Atomically create a reservation, its items (initial state
    /// `Reserved`) and one `Created` event per item. Nothing is persisted
    /// when any step fails.
    async fn create_with_items(
        &self,
        reservation: NewReservation,
        items: Vec<NewReservationItem>,
    ) -> DomainResult<(Reservation, Vec<ReservationItem>)>;

    /// Atomically append items (plus their `Created` events) to an
    /// existing reservation.
    async fn add_items(
        &self,
        reservation_id: i32,
        items: Vec<NewReservationItem>,
        made_by_id: i32,
    ) -> DomainResult<Vec<ReservationItem>>;

    async fn items_of(&self, reservation_id: i32) -> DomainResult<Vec<ReservationItem>>;

    /// Items of many reservations in a single query (avoids per-reservation
    /// round trips when listing)
    async fn items_of_many(
        &self,
        reservation_ids: &[i32],
    ) -> DomainResult<Vec<ReservationItem>>;

    async fn find_item(
        &self,
        reservation_id: i32,
        item_id: i32,
    ) -> DomainResult<Option<ReservationItem>>;

    /// Atomically persist an item's new state/expiry together with its
    /// audit event
    async fn save_item_with_event(
        &self,
        item: &ReservationItem,
        event: &ItemEvent,
    ) -> DomainResult<()>;

    /// Audit log of one item, oldest first
    async fn events_of_item(&self, item_id: i32) -> DomainResult<Vec<ItemEvent>>;

    /// Items in state `Reserved` whose expiry has passed
    async fn find_overdue_items(
        &self,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<ReservationItem>>;

    async fn update_note_user(&self, id: i32, note: Option<String>) -> DomainResult<()>;

    async fn update_note_internal(&self, id: i32, note: Option<String>) -> DomainResult<()>;
}
