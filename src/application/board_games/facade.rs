//! Board games facade
//!
//! Authorization-aware layer over [`BoardGamesService`]: checks the caller
//! context, then converts domain models into caller-appropriate DTOs.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::dto::{
    BoardGameDto, BoardGameView, CategoryDto, ItemEventDto, ManagerBoardGameDto,
    ManagerReservationDto, ReservationDto, ReservationView,
};
use super::service::BoardGamesService;
use crate::application::context::Caller;
use crate::domain::{
    BoardGame, BoardGameFilter, DomainError, DomainResult, ItemState, NewBoardGame, Reservation,
    ReservationItem, Role,
};

pub struct BoardGamesFacade {
    service: Arc<BoardGamesService>,
}

impl BoardGamesFacade {
    pub fn new(service: Arc<BoardGamesService>) -> Self {
        Self { service }
    }

    // ── Catalog reads ───────────────────────────────────────────

    /// List board games. Non-managers always see only visible games, no
    /// matter what visibility filter they request.
    pub async fn get_board_games(
        &self,
        caller: &Caller,
        visible: Option<bool>,
        category_id: Option<i32>,
        players: Option<i32>,
    ) -> DomainResult<Vec<BoardGameView>> {
        let is_manager = caller.is_board_games_manager();
        let filter = BoardGameFilter {
            visible: if is_manager { visible } else { Some(true) },
            category_id,
            players,
        };
        let games = self.service.list_games(filter).await?;
        Ok(games
            .into_iter()
            .map(|g| Self::game_view(&g.game, g.available, is_manager))
            .collect())
    }

    pub async fn get_board_game(&self, caller: &Caller, id: i32) -> DomainResult<BoardGameView> {
        let found = self.service.get_game(id).await?;
        if !found.game.visible && !caller.is_board_games_manager() {
            // Hidden games: anonymous callers are asked to sign in,
            // signed-in members are refused outright.
            return match caller.user() {
                None => Err(DomainError::NotAuthenticated),
                Some(_) => Err(DomainError::MissingRole(Role::BoardGamesManager.as_str())),
            };
        }
        Ok(Self::game_view(
            &found.game,
            found.available,
            caller.is_board_games_manager(),
        ))
    }

    fn game_view(game: &BoardGame, available: i64, manager: bool) -> BoardGameView {
        if manager {
            BoardGameView::Manager(ManagerBoardGameDto::from_game(game, available))
        } else {
            BoardGameView::User(BoardGameDto::from_game(game, available))
        }
    }

    // ── Categories ──────────────────────────────────────────────

    pub async fn get_categories(&self) -> DomainResult<Vec<CategoryDto>> {
        let categories = self.service.list_categories().await?;
        Ok(categories.into_iter().map(CategoryDto::from).collect())
    }

    pub async fn create_category(
        &self,
        caller: &Caller,
        name: &str,
        colour_hex: &str,
    ) -> DomainResult<CategoryDto> {
        caller.require_role(Role::BoardGamesManager)?;
        let category = self.service.create_category(name, colour_hex).await?;
        Ok(category.into())
    }

    pub async fn update_category(
        &self,
        caller: &Caller,
        id: i32,
        name: String,
        colour_hex: String,
    ) -> DomainResult<()> {
        caller.require_role(Role::BoardGamesManager)?;
        self.service
            .update_category(crate::domain::Category {
                id,
                name,
                colour_hex,
            })
            .await
    }

    pub async fn delete_category(&self, caller: &Caller, id: i32) -> DomainResult<()> {
        caller.require_role(Role::BoardGamesManager)?;
        self.service.delete_category(id).await
    }

    // ── Catalog writes ──────────────────────────────────────────

    pub async fn create_board_game(
        &self,
        caller: &Caller,
        game: NewBoardGame,
    ) -> DomainResult<ManagerBoardGameDto> {
        caller.require_role(Role::BoardGamesManager)?;
        let created = self.service.create_game(game).await?;
        Ok(ManagerBoardGameDto::from_game(&created, 0))
    }

    pub async fn update_board_game(&self, caller: &Caller, game: BoardGame) -> DomainResult<()> {
        caller.require_role(Role::BoardGamesManager)?;
        self.service.update_game(game).await
    }

    pub async fn update_board_game_stock(
        &self,
        caller: &Caller,
        id: i32,
        in_stock: i32,
        unavailable: i32,
        visible: bool,
    ) -> DomainResult<()> {
        caller.require_role(Role::BoardGamesManager)?;
        self.service
            .update_stock(id, in_stock, unavailable, visible)
            .await
    }

    // ── Reservation reads ───────────────────────────────────────

    /// Reservations of one user. Members may only list their own.
    pub async fn get_user_reservations(
        &self,
        caller: &Caller,
        user_id: i32,
    ) -> DomainResult<Vec<ReservationView>> {
        let ctx = caller.require_user()?;
        if ctx.id != user_id {
            caller.require_role(Role::BoardGamesManager)?;
        }
        let listed = self.service.list_user_reservations(user_id).await?;
        Ok(self.reservation_views(caller, listed))
    }

    pub async fn get_all_reservations(&self, caller: &Caller) -> DomainResult<Vec<ReservationView>> {
        caller.require_role(Role::BoardGamesManager)?;
        let listed = self.service.list_all_reservations().await?;
        Ok(self.reservation_views(caller, listed))
    }

    /// Fetch one reservation. Managers see any reservation as the manager
    /// view; members only their own.
    pub async fn get_reservation(&self, caller: &Caller, id: i32) -> DomainResult<ReservationView> {
        let ctx = caller.require_user()?;
        let (reservation, items) = self.service.get_reservation(id).await?;
        if caller.is_board_games_manager() {
            return Ok(ReservationView::Manager(ManagerReservationDto::from_parts(
                &reservation,
                &items,
            )));
        }
        if reservation.made_by_id != ctx.id {
            return Err(DomainError::MissingRole(Role::BoardGamesManager.as_str()));
        }
        Ok(ReservationView::User(ReservationDto::from_parts(
            &reservation,
            &items,
        )))
    }

    fn reservation_views(
        &self,
        caller: &Caller,
        listed: Vec<(Reservation, Vec<ReservationItem>)>,
    ) -> Vec<ReservationView> {
        let manager = caller.is_board_games_manager();
        listed
            .into_iter()
            .map(|(r, items)| {
                if manager {
                    ReservationView::Manager(ManagerReservationDto::from_parts(&r, &items))
                } else {
                    ReservationView::User(ReservationDto::from_parts(&r, &items))
                }
            })
            .collect()
    }

    // ── Reservation writes ──────────────────────────────────────

    pub async fn create_reservation(
        &self,
        caller: &Caller,
        note_user: Option<String>,
        game_ids: &[i32],
    ) -> DomainResult<ReservationView> {
        let ctx = caller.require_user()?;
        let (reservation, items) = self
            .service
            .create_reservation(ctx.id, note_user, None, game_ids)
            .await?;
        Ok(ReservationView::User(ReservationDto::from_parts(
            &reservation,
            &items,
        )))
    }

    /// Manager-created reservation on behalf of another member.
    pub async fn manager_create_reservation(
        &self,
        caller: &Caller,
        target_user_id: i32,
        note_internal: Option<String>,
        game_ids: &[i32],
    ) -> DomainResult<ReservationView> {
        caller.require_role(Role::BoardGamesManager)?;
        let (reservation, items) = self
            .service
            .create_reservation(target_user_id, None, note_internal, game_ids)
            .await?;
        Ok(ReservationView::Manager(ManagerReservationDto::from_parts(
            &reservation,
            &items,
        )))
    }

    /// Add items to a reservation; owners extend their own, managers any.
    pub async fn add_reservation_items(
        &self,
        caller: &Caller,
        reservation_id: i32,
        game_ids: &[i32],
    ) -> DomainResult<ReservationView> {
        let ctx = caller.require_user()?;
        let (reservation, _) = self.service.get_reservation(reservation_id).await?;
        if reservation.made_by_id != ctx.id {
            caller.require_role(Role::BoardGamesManager)?;
        }
        self.service
            .add_items(reservation_id, game_ids, ctx.id)
            .await?;
        self.get_reservation(caller, reservation_id).await
    }

    /// Update the user-facing note; only the reservation owner may do so.
    pub async fn update_reservation_note(
        &self,
        caller: &Caller,
        reservation_id: i32,
        note: Option<String>,
    ) -> DomainResult<()> {
        let ctx = caller.require_user()?;
        let (reservation, _) = self.service.get_reservation(reservation_id).await?;
        if reservation.made_by_id != ctx.id {
            return Err(DomainError::ReservationAccessDenied);
        }
        self.service.update_note_user(reservation_id, note).await
    }

    pub async fn update_reservation_note_internal(
        &self,
        caller: &Caller,
        reservation_id: i32,
        note: Option<String>,
    ) -> DomainResult<()> {
        caller.require_role(Role::BoardGamesManager)?;
        self.service
            .update_note_internal(reservation_id, note)
            .await
    }

    // ── Item lifecycle (manager operations) ─────────────────────

    /// Drive an item through its lifecycle (hand over, return, cancel).
    /// `Reserved` and `Expired` are system-managed and cannot be targeted.
    pub async fn update_item_state(
        &self,
        caller: &Caller,
        reservation_id: i32,
        item_id: i32,
        target: ItemState,
        note_internal: Option<String>,
    ) -> DomainResult<ReservationView> {
        let ctx = caller.require_role(Role::BoardGamesManager)?;
        if matches!(target, ItemState::Reserved | ItemState::Expired) {
            return Err(DomainError::Validation(format!(
                "State {target} cannot be set directly"
            )));
        }
        self.service
            .transition_item(reservation_id, item_id, target, ctx.id, note_internal)
            .await?;
        self.get_reservation(caller, reservation_id).await
    }

    pub async fn extend_item(
        &self,
        caller: &Caller,
        reservation_id: i32,
        item_id: i32,
        new_expires_on: DateTime<Utc>,
        note_internal: Option<String>,
    ) -> DomainResult<ReservationView> {
        let ctx = caller.require_role(Role::BoardGamesManager)?;
        self.service
            .extend_item(reservation_id, item_id, new_expires_on, ctx.id, note_internal)
            .await?;
        self.get_reservation(caller, reservation_id).await
    }

    pub async fn item_history(
        &self,
        caller: &Caller,
        reservation_id: i32,
        item_id: i32,
    ) -> DomainResult<Vec<ItemEventDto>> {
        caller.require_role(Role::BoardGamesManager)?;
        let events = self.service.item_history(reservation_id, item_id).await?;
        Ok(events.iter().map(ItemEventDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::context::UserContext;
    use crate::application::testing::InMemoryRepos;
    use crate::domain::ItemEventType;
    use std::sync::Arc;

    fn facade(repos: Arc<InMemoryRepos>) -> BoardGamesFacade {
        BoardGamesFacade::new(Arc::new(BoardGamesService::new(repos)))
    }

    fn member(id: i32) -> Caller {
        Caller::User(UserContext {
            id,
            username: format!("user{id}"),
            roles: vec![Role::Member],
        })
    }

    fn manager(id: i32) -> Caller {
        Caller::User(UserContext {
            id,
            username: format!("manager{id}"),
            roles: vec![Role::Member, Role::BoardGamesManager],
        })
    }

    fn seeded() -> Arc<InMemoryRepos> {
        let repos = InMemoryRepos::new();
        repos.seed_user(42, "alice", &[Role::Member]);
        repos.seed_user(99, "bob", &[Role::Member]);
        repos.seed_user(7, "carol", &[Role::Member, Role::BoardGamesManager]);
        repos.seed_category(1, "Strategy");
        repos.seed_game(1, "Catan", 3, true);
        repos.seed_game(2, "Gloomhaven", 0, true);
        repos.seed_game(3, "Secret prototype", 1, false);
        repos
    }

    #[tokio::test]
    async fn invisible_game_requires_sign_in() {
        let facade = facade(seeded());
        let result = facade.get_board_game(&Caller::Anonymous, 3).await;
        assert!(matches!(result, Err(DomainError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn invisible_game_refused_for_members() {
        let facade = facade(seeded());
        let result = facade.get_board_game(&member(42), 3).await;
        assert!(matches!(
            result,
            Err(DomainError::MissingRole("board-games-manager"))
        ));
    }

    #[tokio::test]
    async fn invisible_game_shown_to_managers() {
        let facade = facade(seeded());
        let view = facade.get_board_game(&manager(7), 3).await.unwrap();
        assert!(matches!(view, BoardGameView::Manager(_)));
    }

    #[tokio::test]
    async fn member_listing_ignores_visibility_filter() {
        let facade = facade(seeded());
        // Asking for hidden games explicitly must still yield only visible ones.
        let views = facade
            .get_board_games(&member(42), Some(false), None, None)
            .await
            .unwrap();
        assert_eq!(views.len(), 2);
        for view in views {
            match view {
                BoardGameView::User(dto) => assert_ne!(dto.id, 3),
                BoardGameView::Manager(_) => panic!("member got a manager view"),
            }
        }
    }

    #[tokio::test]
    async fn manager_listing_can_target_hidden_games() {
        let facade = facade(seeded());
        let views = facade
            .get_board_games(&manager(7), Some(false), None, None)
            .await
            .unwrap();
        assert_eq!(views.len(), 1);
        assert!(matches!(views[0], BoardGameView::Manager(_)));
    }

    #[tokio::test]
    async fn category_delete_blocked_while_games_reference_it() {
        let repos = seeded();
        let facade = facade(repos.clone());
        let result = facade.delete_category(&manager(7), 1).await;
        assert!(matches!(result, Err(DomainError::CategoryHasBoardGames(1))));

        repos.seed_category(2, "Empty shelf");
        facade.delete_category(&manager(7), 2).await.unwrap();
        assert!(repos.lock().categories.iter().all(|c| c.id != 2));
    }

    #[tokio::test]
    async fn unavailable_game_fails_reservation_without_persisting() {
        let repos = seeded();
        let facade = facade(repos.clone());
        // Game 2 has zero copies in stock.
        let result = facade
            .create_reservation(&member(42), None, &[1, 2])
            .await;
        assert!(matches!(
            result,
            Err(DomainError::GamesUnavailable(ref ids)) if ids == &vec![2]
        ));
        let store = repos.lock();
        assert!(store.reservations.is_empty());
        assert!(store.items.is_empty());
        assert!(store.item_events.is_empty());
    }

    #[tokio::test]
    async fn duplicate_game_ids_need_that_many_copies() {
        let repos = seeded();
        let facade = facade(repos.clone());
        repos.seed_game(4, "Single copy", 1, true);
        let result = facade
            .create_reservation(&member(42), None, &[4, 4])
            .await;
        assert!(matches!(
            result,
            Err(DomainError::GamesUnavailable(ref ids)) if ids == &vec![4]
        ));
    }

    #[tokio::test]
    async fn owner_fetches_own_reservation_with_items() {
        let repos = seeded();
        let facade = facade(repos.clone());
        repos.seed_reservation(7, 42, &[1]);

        match facade.get_reservation(&member(42), 7).await.unwrap() {
            ReservationView::User(dto) => {
                assert_eq!(dto.id, 7);
                assert_eq!(dto.items.len(), 1);
                assert_eq!(dto.items[0].board_game_id, 1);
            }
            ReservationView::Manager(_) => panic!("owner got a manager view"),
        }
    }

    #[tokio::test]
    async fn stranger_cannot_fetch_foreign_reservation() {
        let repos = seeded();
        let facade = facade(repos.clone());
        repos.seed_reservation(7, 42, &[1]);

        let result = facade.get_reservation(&member(99), 7).await;
        assert!(matches!(
            result,
            Err(DomainError::MissingRole("board-games-manager"))
        ));
    }

    #[tokio::test]
    async fn manager_fetches_any_reservation_as_manager_view() {
        let repos = seeded();
        let facade = facade(repos.clone());
        repos.seed_reservation(7, 42, &[1]);

        let view = facade.get_reservation(&manager(7), 7).await.unwrap();
        assert!(matches!(view, ReservationView::Manager(_)));
    }

    #[tokio::test]
    async fn member_cannot_list_foreign_reservations() {
        let facade = facade(seeded());
        let result = facade.get_user_reservations(&member(99), 42).await;
        assert!(matches!(
            result,
            Err(DomainError::MissingRole("board-games-manager"))
        ));
    }

    #[tokio::test]
    async fn user_note_editable_by_owner_only() {
        let repos = seeded();
        let facade = facade(repos.clone());
        repos.seed_reservation(7, 42, &[1]);

        let result = facade
            .update_reservation_note(&member(99), 7, Some("mine now".to_string()))
            .await;
        assert!(matches!(result, Err(DomainError::ReservationAccessDenied)));

        facade
            .update_reservation_note(&member(42), 7, Some("pick up friday".to_string()))
            .await
            .unwrap();
        assert_eq!(
            repos.lock().reservations[0].note_user.as_deref(),
            Some("pick up friday")
        );
    }

    #[tokio::test]
    async fn internal_note_is_manager_only() {
        let repos = seeded();
        let facade = facade(repos.clone());
        repos.seed_reservation(7, 42, &[1]);

        let result = facade
            .update_reservation_note_internal(&member(42), 7, Some("vip".to_string()))
            .await;
        assert!(matches!(result, Err(DomainError::MissingRole(_))));

        facade
            .update_reservation_note_internal(&manager(7), 7, Some("vip".to_string()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn item_lifecycle_appends_audit_events() {
        let repos = seeded();
        let facade = facade(repos.clone());
        repos.seed_reservation(7, 42, &[1]);
        let item_id = repos.lock().items[0].id;

        facade
            .update_item_state(&manager(7), 7, item_id, ItemState::HandedOver, None)
            .await
            .unwrap();
        facade
            .update_item_state(&manager(7), 7, item_id, ItemState::Returned, None)
            .await
            .unwrap();

        let store = repos.lock();
        assert_eq!(store.items[0].state, ItemState::Returned);
        let types: Vec<ItemEventType> = store
            .item_events
            .iter()
            .map(|e| e.event_type)
            .collect();
        assert_eq!(
            types,
            vec![ItemEventType::HandedOver, ItemEventType::Returned]
        );
    }

    #[tokio::test]
    async fn expired_cannot_be_targeted_directly() {
        let repos = seeded();
        let facade = facade(repos.clone());
        repos.seed_reservation(7, 42, &[1]);
        let item_id = repos.lock().items[0].id;

        let result = facade
            .update_item_state(&manager(7), 7, item_id, ItemState::Expired, None)
            .await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn member_cannot_drive_item_lifecycle() {
        let repos = seeded();
        let facade = facade(repos.clone());
        repos.seed_reservation(7, 42, &[1]);
        let item_id = repos.lock().items[0].id;

        let result = facade
            .update_item_state(&member(42), 7, item_id, ItemState::HandedOver, None)
            .await;
        assert!(matches!(result, Err(DomainError::MissingRole(_))));
    }

    #[tokio::test]
    async fn released_copy_becomes_reservable_again() {
        let repos = seeded();
        let facade = facade(repos.clone());
        repos.seed_game(5, "Last copy", 1, true);

        let first = facade
            .create_reservation(&member(42), None, &[5])
            .await
            .unwrap();
        assert!(matches!(
            facade.create_reservation(&member(99), None, &[5]).await,
            Err(DomainError::GamesUnavailable(_))
        ));

        let item_id = repos.lock().items[0].id;
        facade
            .update_item_state(&manager(7), first.id(), item_id, ItemState::Cancelled, None)
            .await
            .unwrap();

        facade
            .create_reservation(&member(99), None, &[5])
            .await
            .unwrap();
    }
}
