//! SeaORM implementation of ReservationRepository
//!
//! Multi-row operations (reservation + items + events, item update +
//! event append) run inside a transaction so partial writes never land.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::debug;

use crate::domain::reservation::{
    NewReservation, NewReservationItem, ReservationRepository,
};
use crate::domain::{
    DomainError, DomainResult, ItemEvent, ItemEventType, ItemState, Reservation, ReservationItem,
};
use crate::infrastructure::database::entities::{
    reservation, reservation_item, reservation_item_event,
};

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn reservation_to_domain(m: reservation::Model) -> Reservation {
    Reservation {
        id: m.id,
        made_by_id: m.made_by_id,
        made_on: m.made_on,
        note_user: m.note_user,
        note_internal: m.note_internal,
    }
}

fn item_to_domain(m: reservation_item::Model) -> ReservationItem {
    ReservationItem {
        id: m.id,
        reservation_id: m.reservation_id,
        board_game_id: m.board_game_id,
        // Unknown state strings are treated as cancelled rather than
        // resurrecting the copy.
        state: ItemState::from_str(&m.state).unwrap_or(ItemState::Cancelled),
        expires_on: m.expires_on,
    }
}

fn event_to_domain(m: reservation_item_event::Model) -> ItemEvent {
    ItemEvent {
        reservation_item_id: m.reservation_item_id,
        made_by_id: m.made_by_id,
        made_on: m.made_on,
        event_type: ItemEventType::from_str(&m.event_type).unwrap_or(ItemEventType::NoteChanged),
        new_state: m.new_state.as_deref().and_then(ItemState::from_str),
        new_expires_on: m.new_expires_on,
        note_internal: m.note_internal,
    }
}

fn event_to_active(e: &ItemEvent) -> reservation_item_event::ActiveModel {
    reservation_item_event::ActiveModel {
        reservation_item_id: Set(e.reservation_item_id),
        made_on: Set(e.made_on),
        made_by_id: Set(e.made_by_id),
        event_type: Set(e.event_type.as_str().to_string()),
        new_state: Set(e.new_state.map(|s| s.as_str().to_string())),
        new_expires_on: Set(e.new_expires_on),
        note_internal: Set(e.note_internal.clone()),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {e}"))
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(reservation_to_domain))
    }

    async fn list_by_user(&self, user_id: i32) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::MadeById.eq(user_id))
            .order_by_desc(reservation::Column::MadeOn)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(reservation_to_domain).collect())
    }

    async fn list_all(&self) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .order_by_desc(reservation::Column::MadeOn)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(reservation_to_domain).collect())
    }

    async fn create_with_items(
        &self,
        new: NewReservation,
        items: Vec<NewReservationItem>,
    ) -> DomainResult<(Reservation, Vec<ReservationItem>)> {
        debug!(user_id = new.made_by_id, items = items.len(), "Creating reservation");
        let txn = self.db.begin().await.map_err(db_err)?;

        let made_by_id = new.made_by_id;
        let reservation = reservation::ActiveModel {
            made_by_id: Set(new.made_by_id),
            made_on: Set(Utc::now()),
            note_user: Set(new.note_user),
            note_internal: Set(new.note_internal),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let inserted = reservation_item::ActiveModel {
                reservation_id: Set(reservation.id),
                board_game_id: Set(item.board_game_id),
                expires_on: Set(item.expires_on),
                state: Set(ItemState::Reserved.as_str().to_string()),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;

            event_to_active(&ItemEvent {
                reservation_item_id: inserted.id,
                made_by_id: Some(made_by_id),
                made_on: Utc::now(),
                event_type: ItemEventType::Created,
                new_state: Some(ItemState::Reserved),
                new_expires_on: None,
                note_internal: None,
            })
            .insert(&txn)
            .await
            .map_err(db_err)?;

            created.push(item_to_domain(inserted));
        }

        txn.commit().await.map_err(db_err)?;
        Ok((reservation_to_domain(reservation), created))
    }

    async fn add_items(
        &self,
        reservation_id: i32,
        items: Vec<NewReservationItem>,
        made_by_id: i32,
    ) -> DomainResult<Vec<ReservationItem>> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let inserted = reservation_item::ActiveModel {
                reservation_id: Set(reservation_id),
                board_game_id: Set(item.board_game_id),
                expires_on: Set(item.expires_on),
                state: Set(ItemState::Reserved.as_str().to_string()),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;

            event_to_active(&ItemEvent {
                reservation_item_id: inserted.id,
                made_by_id: Some(made_by_id),
                made_on: Utc::now(),
                event_type: ItemEventType::Created,
                new_state: Some(ItemState::Reserved),
                new_expires_on: None,
                note_internal: None,
            })
            .insert(&txn)
            .await
            .map_err(db_err)?;

            created.push(item_to_domain(inserted));
        }

        txn.commit().await.map_err(db_err)?;
        Ok(created)
    }

    async fn items_of(&self, reservation_id: i32) -> DomainResult<Vec<ReservationItem>> {
        let models = reservation_item::Entity::find()
            .filter(reservation_item::Column::ReservationId.eq(reservation_id))
            .order_by_asc(reservation_item::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(item_to_domain).collect())
    }

    async fn items_of_many(
        &self,
        reservation_ids: &[i32],
    ) -> DomainResult<Vec<ReservationItem>> {
        if reservation_ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = reservation_item::Entity::find()
            .filter(reservation_item::Column::ReservationId.is_in(reservation_ids.to_vec()))
            .order_by_asc(reservation_item::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(item_to_domain).collect())
    }

    async fn find_item(
        &self,
        reservation_id: i32,
        item_id: i32,
    ) -> DomainResult<Option<ReservationItem>> {
        let model = reservation_item::Entity::find_by_id(item_id)
            .filter(reservation_item::Column::ReservationId.eq(reservation_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(item_to_domain))
    }

    async fn save_item_with_event(
        &self,
        item: &ReservationItem,
        event: &ItemEvent,
    ) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let existing = reservation_item::Entity::find_by_id(item.id)
            .one(&txn)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("ReservationItem", item.id));
        }

        reservation_item::ActiveModel {
            id: Set(item.id),
            reservation_id: Set(item.reservation_id),
            board_game_id: Set(item.board_game_id),
            expires_on: Set(item.expires_on),
            state: Set(item.state.as_str().to_string()),
        }
        .update(&txn)
        .await
        .map_err(db_err)?;

        event_to_active(event).insert(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }

    async fn events_of_item(&self, item_id: i32) -> DomainResult<Vec<ItemEvent>> {
        let models = reservation_item_event::Entity::find()
            .filter(reservation_item_event::Column::ReservationItemId.eq(item_id))
            .order_by_asc(reservation_item_event::Column::MadeOn)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(event_to_domain).collect())
    }

    async fn find_overdue_items(
        &self,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<ReservationItem>> {
        let models = reservation_item::Entity::find()
            .filter(reservation_item::Column::State.eq(ItemState::Reserved.as_str()))
            .filter(reservation_item::Column::ExpiresOn.lt(now))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(item_to_domain).collect())
    }

    async fn update_note_user(&self, id: i32, note: Option<String>) -> DomainResult<()> {
        reservation::Entity::update_many()
            .filter(reservation::Column::Id.eq(id))
            .col_expr(reservation::Column::NoteUser, Expr::value(note))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn update_note_internal(&self, id: i32, note: Option<String>) -> DomainResult<()> {
        reservation::Entity::update_many()
            .filter(reservation::Column::Id.eq(id))
            .col_expr(reservation::Column::NoteInternal, Expr::value(note))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
