//! Board games domain service
//!
//! Owns the business rules of the catalog and reservation lifecycle:
//! stock invariants, availability checks, atomic reservation creation and
//! item state transitions. Authorization lives in the facade above.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::domain::{
    BoardGame, BoardGameFilter, Category, DomainError, DomainResult, ItemState, NewBoardGame,
    NewReservation, NewReservationItem, Reservation, ReservationItem, RepositoryProvider,
};

/// A board game together with its current availability
#[derive(Debug, Clone)]
pub struct GameWithAvailability {
    pub game: BoardGame,
    /// Copies reservable right now (may be negative after stock shrinks)
    pub available: i64,
}

pub struct BoardGamesService {
    repos: Arc<dyn RepositoryProvider>,
}

impl BoardGamesService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Categories ──────────────────────────────────────────────

    pub async fn list_categories(&self) -> DomainResult<Vec<Category>> {
        self.repos.categories().find_all().await
    }

    pub async fn create_category(&self, name: &str, colour_hex: &str) -> DomainResult<Category> {
        let category = self.repos.categories().create(name, colour_hex).await?;
        info!(category_id = category.id, name, "Category created");
        Ok(category)
    }

    pub async fn update_category(&self, category: Category) -> DomainResult<()> {
        self.require_category(category.id).await?;
        self.repos.categories().update(category).await
    }

    /// Delete a category; blocked while any board game references it.
    pub async fn delete_category(&self, id: i32) -> DomainResult<()> {
        self.require_category(id).await?;
        let games = self.repos.categories().count_board_games(id).await?;
        if games > 0 {
            return Err(DomainError::CategoryHasBoardGames(id));
        }
        self.repos.categories().delete(id).await?;
        info!(category_id = id, "Category deleted");
        Ok(())
    }

    async fn require_category(&self, id: i32) -> DomainResult<Category> {
        self.repos
            .categories()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", id))
    }

    // ── Board games ─────────────────────────────────────────────

    pub async fn list_games(
        &self,
        filter: BoardGameFilter,
    ) -> DomainResult<Vec<GameWithAvailability>> {
        let games = self.repos.board_games().find(filter).await?;
        let ids: Vec<i32> = games.iter().map(|g| g.id).collect();
        let held: HashMap<i32, i64> = self
            .repos
            .board_games()
            .held_counts(&ids)
            .await?
            .into_iter()
            .collect();
        Ok(games
            .into_iter()
            .map(|game| {
                let available = game.available(held.get(&game.id).copied().unwrap_or(0));
                GameWithAvailability { game, available }
            })
            .collect())
    }

    pub async fn get_game(&self, id: i32) -> DomainResult<GameWithAvailability> {
        let game = self.require_game(id).await?;
        let held = self
            .repos
            .board_games()
            .held_counts(&[id])
            .await?
            .into_iter()
            .next()
            .map(|(_, n)| n)
            .unwrap_or(0);
        let available = game.available(held);
        Ok(GameWithAvailability { game, available })
    }

    pub async fn create_game(&self, game: NewBoardGame) -> DomainResult<BoardGame> {
        BoardGame::validate_stock(game.in_stock, game.unavailable)?;
        self.require_category(game.category_id).await?;
        if let Some(owner_id) = game.owner_id {
            self.require_user(owner_id).await?;
        }
        let created = self.repos.board_games().create(game).await?;
        info!(game_id = created.id, name = %created.name, "Board game created");
        Ok(created)
    }

    pub async fn update_game(&self, game: BoardGame) -> DomainResult<()> {
        BoardGame::validate_stock(game.in_stock, game.unavailable)?;
        self.require_game(game.id).await?;
        self.require_category(game.category_id).await?;
        if let Some(owner_id) = game.owner_id {
            self.require_user(owner_id).await?;
        }
        self.repos.board_games().update(game).await
    }

    pub async fn update_stock(
        &self,
        id: i32,
        in_stock: i32,
        unavailable: i32,
        visible: bool,
    ) -> DomainResult<()> {
        BoardGame::validate_stock(in_stock, unavailable)?;
        let mut game = self.require_game(id).await?;
        game.in_stock = in_stock;
        game.unavailable = unavailable;
        game.visible = visible;
        self.repos.board_games().update(game).await
    }

    async fn require_game(&self, id: i32) -> DomainResult<BoardGame> {
        self.repos
            .board_games()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("BoardGame", id))
    }

    async fn require_user(&self, id: i32) -> DomainResult<()> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    // ── Reservations ────────────────────────────────────────────

    /// Create a reservation for `made_by_id` covering one copy of each
    /// listed game. Fails with `GamesUnavailable` (persisting nothing)
    /// when any requested copy cannot be satisfied.
    pub async fn create_reservation(
        &self,
        made_by_id: i32,
        note_user: Option<String>,
        note_internal: Option<String>,
        game_ids: &[i32],
    ) -> DomainResult<(Reservation, Vec<ReservationItem>)> {
        if game_ids.is_empty() {
            return Err(DomainError::Validation(
                "A reservation needs at least one board game".to_string(),
            ));
        }
        self.require_user(made_by_id).await?;
        let items = self.build_items(game_ids).await?;

        let (reservation, items) = self
            .repos
            .reservations()
            .create_with_items(
                NewReservation {
                    made_by_id,
                    note_user,
                    note_internal,
                },
                items,
            )
            .await?;
        info!(
            reservation_id = reservation.id,
            user_id = made_by_id,
            items = items.len(),
            "Reservation created"
        );
        Ok((reservation, items))
    }

    pub async fn add_items(
        &self,
        reservation_id: i32,
        game_ids: &[i32],
        made_by_id: i32,
    ) -> DomainResult<Vec<ReservationItem>> {
        if game_ids.is_empty() {
            return Err(DomainError::Validation(
                "No board games to add".to_string(),
            ));
        }
        self.require_reservation(reservation_id).await?;
        let items = self.build_items(game_ids).await?;
        self.repos
            .reservations()
            .add_items(reservation_id, items, made_by_id)
            .await
    }

    /// Availability check plus expiry computation for each requested copy.
    /// Requesting a game twice requires two free copies.
    async fn build_items(&self, game_ids: &[i32]) -> DomainResult<Vec<NewReservationItem>> {
        let mut requested: HashMap<i32, i64> = HashMap::new();
        for id in game_ids {
            *requested.entry(*id).or_insert(0) += 1;
        }

        let unique_ids: Vec<i32> = requested.keys().copied().collect();
        let mut games = HashMap::new();
        for id in &unique_ids {
            games.insert(*id, self.require_game(*id).await?);
        }
        let held: HashMap<i32, i64> = self
            .repos
            .board_games()
            .held_counts(&unique_ids)
            .await?
            .into_iter()
            .collect();

        let mut unavailable = Vec::new();
        for (id, wanted) in &requested {
            let game = &games[id];
            if game.available(held.get(id).copied().unwrap_or(0)) < *wanted {
                unavailable.push(*id);
            }
        }
        if !unavailable.is_empty() {
            unavailable.sort_unstable();
            debug!(games = ?unavailable, "Reservation rejected, games unavailable");
            return Err(DomainError::GamesUnavailable(unavailable));
        }

        let now = Utc::now();
        Ok(game_ids
            .iter()
            .map(|id| {
                let game = &games[id];
                NewReservationItem {
                    board_game_id: *id,
                    expires_on: now + Duration::days(i64::from(game.default_reservation_days)),
                }
            })
            .collect())
    }

    pub async fn get_reservation(
        &self,
        id: i32,
    ) -> DomainResult<(Reservation, Vec<ReservationItem>)> {
        let reservation = self.require_reservation(id).await?;
        let items = self.repos.reservations().items_of(id).await?;
        Ok((reservation, items))
    }

    /// List a user's reservations with items attached via one batched query.
    pub async fn list_user_reservations(
        &self,
        user_id: i32,
    ) -> DomainResult<Vec<(Reservation, Vec<ReservationItem>)>> {
        let reservations = self.repos.reservations().list_by_user(user_id).await?;
        self.attach_items(reservations).await
    }

    pub async fn list_all_reservations(
        &self,
    ) -> DomainResult<Vec<(Reservation, Vec<ReservationItem>)>> {
        let reservations = self.repos.reservations().list_all().await?;
        self.attach_items(reservations).await
    }

    async fn attach_items(
        &self,
        reservations: Vec<Reservation>,
    ) -> DomainResult<Vec<(Reservation, Vec<ReservationItem>)>> {
        let ids: Vec<i32> = reservations.iter().map(|r| r.id).collect();
        let mut by_reservation: HashMap<i32, Vec<ReservationItem>> = HashMap::new();
        for item in self.repos.reservations().items_of_many(&ids).await? {
            by_reservation
                .entry(item.reservation_id)
                .or_default()
                .push(item);
        }
        Ok(reservations
            .into_iter()
            .map(|r| {
                let items = by_reservation.remove(&r.id).unwrap_or_default();
                (r, items)
            })
            .collect())
    }

    async fn require_reservation(&self, id: i32) -> DomainResult<Reservation> {
        self.repos
            .reservations()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reservation", id))
    }

    pub async fn update_note_user(&self, id: i32, note: Option<String>) -> DomainResult<()> {
        self.require_reservation(id).await?;
        self.repos.reservations().update_note_user(id, note).await
    }

    pub async fn update_note_internal(&self, id: i32, note: Option<String>) -> DomainResult<()> {
        self.require_reservation(id).await?;
        self.repos
            .reservations()
            .update_note_internal(id, note)
            .await
    }

    // ── Item lifecycle ──────────────────────────────────────────

    pub async fn transition_item(
        &self,
        reservation_id: i32,
        item_id: i32,
        target: ItemState,
        made_by_id: i32,
        note_internal: Option<String>,
    ) -> DomainResult<ReservationItem> {
        let mut item = self.require_item(reservation_id, item_id).await?;
        let event = item.transition(target, Some(made_by_id), note_internal)?;
        self.repos
            .reservations()
            .save_item_with_event(&item, &event)
            .await?;
        info!(
            item_id,
            state = %item.state,
            by = made_by_id,
            "Reservation item transitioned"
        );
        Ok(item)
    }

    pub async fn extend_item(
        &self,
        reservation_id: i32,
        item_id: i32,
        new_expires_on: DateTime<Utc>,
        made_by_id: i32,
        note_internal: Option<String>,
    ) -> DomainResult<ReservationItem> {
        if new_expires_on <= Utc::now() {
            return Err(DomainError::Validation(
                "New expiry must lie in the future".to_string(),
            ));
        }
        let mut item = self.require_item(reservation_id, item_id).await?;
        let event = item.grant_extension(new_expires_on, Some(made_by_id), note_internal)?;
        self.repos
            .reservations()
            .save_item_with_event(&item, &event)
            .await?;
        Ok(item)
    }

    pub async fn item_history(
        &self,
        reservation_id: i32,
        item_id: i32,
    ) -> DomainResult<Vec<crate::domain::ItemEvent>> {
        self.require_item(reservation_id, item_id).await?;
        self.repos.reservations().events_of_item(item_id).await
    }

    async fn require_item(
        &self,
        reservation_id: i32,
        item_id: i32,
    ) -> DomainResult<ReservationItem> {
        self.repos
            .reservations()
            .find_item(reservation_id, item_id)
            .await?
            .ok_or_else(|| DomainError::not_found("ReservationItem", item_id))
    }

    /// Mark overdue reserved items as expired. Returns how many items
    /// were expired. Called by the background sweep.
    pub async fn expire_overdue_items(&self, now: DateTime<Utc>) -> DomainResult<usize> {
        let overdue = self.repos.reservations().find_overdue_items(now).await?;
        let mut expired = 0;
        for mut item in overdue {
            let event = item.transition(ItemState::Expired, None, None)?;
            self.repos
                .reservations()
                .save_item_with_event(&item, &event)
                .await?;
            expired += 1;
        }
        Ok(expired)
    }
}
