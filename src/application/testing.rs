//! In-memory repository fakes for application-layer tests.
//!
//! Backed by a single mutex-protected store so multi-entity operations
//! (reservation + items + events) stay atomic, mirroring the transactional
//! behavior of the real repositories.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::board_game::{BoardGameFilter, BoardGameRepository, CategoryRepository};
use crate::domain::club_state::{
    ClubEventRepository, PlannedStateRepository, RepeatingStateRepository,
};
use crate::domain::reservation::{
    NewReservation, NewReservationItem, ReservationRepository,
};
use crate::domain::user::{UserFilter, UserRepository};
use crate::domain::{
    BoardGame, Category, ClubEvent, DomainError, DomainResult, ItemEvent, ItemEventType,
    ItemState, NewBoardGame, NewClubEvent, NewPlannedState, NewRepeatingState, NewUser,
    PlannedState, RepeatingState, Reservation, ReservationItem, RepositoryProvider, Role,
    RoleAssignment, StateKind, User, UserWithRoles,
};

#[derive(Default)]
pub struct Store {
    pub users: Vec<User>,
    pub user_roles: Vec<(i32, Role, Option<i32>, DateTime<Utc>)>,
    pub categories: Vec<Category>,
    pub games: Vec<BoardGame>,
    pub reservations: Vec<Reservation>,
    pub items: Vec<ReservationItem>,
    pub item_events: Vec<ItemEvent>,
    pub planned_states: Vec<PlannedState>,
    pub repeating_states: Vec<RepeatingState>,
    pub club_events: Vec<ClubEvent>,
}

fn next_id<T>(items: &[T], id_of: impl Fn(&T) -> i32) -> i32 {
    items.iter().map(id_of).max().unwrap_or(0) + 1
}

pub struct InMemoryRepos {
    store: Arc<Mutex<Store>>,
    users: UsersRepo,
    categories: CategoriesRepo,
    games: GamesRepo,
    reservations: ReservationsRepo,
    planned: PlannedStatesRepo,
    repeating: RepeatingStatesRepo,
    events: ClubEventsRepo,
}

impl InMemoryRepos {
    pub fn new() -> Arc<Self> {
        let store = Arc::new(Mutex::new(Store::default()));
        Arc::new(Self {
            users: UsersRepo(store.clone()),
            categories: CategoriesRepo(store.clone()),
            games: GamesRepo(store.clone()),
            reservations: ReservationsRepo(store.clone()),
            planned: PlannedStatesRepo(store.clone()),
            repeating: RepeatingStatesRepo(store.clone()),
            events: ClubEventsRepo(store.clone()),
            store,
        })
    }

    pub fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap()
    }

    pub fn seed_user(&self, id: i32, username: &str, roles: &[Role]) {
        let mut store = self.lock();
        store.users.push(User {
            id,
            username: username.to_string(),
            email: format!("{username}@club.test"),
            password_hash: String::new(),
            nickname: None,
            is_active: true,
            created_at: Utc::now(),
            last_login_at: None,
        });
        for role in roles {
            store.user_roles.push((id, *role, None, Utc::now()));
        }
    }

    pub fn seed_category(&self, id: i32, name: &str) {
        self.lock().categories.push(Category {
            id,
            name: name.to_string(),
            colour_hex: "1f6f43".to_string(),
        });
    }

    pub fn seed_game(&self, id: i32, name: &str, in_stock: i32, visible: bool) {
        self.lock().games.push(BoardGame {
            id,
            name: name.to_string(),
            description: None,
            image_url: None,
            category_id: 1,
            players_min: Some(2),
            players_max: Some(4),
            note_internal: None,
            owner_id: None,
            in_stock,
            unavailable: 0,
            visible,
            default_reservation_days: 14,
        });
    }

    pub fn seed_reservation(&self, id: i32, made_by_id: i32, game_ids: &[i32]) {
        let mut store = self.lock();
        store.reservations.push(Reservation {
            id,
            made_by_id,
            made_on: Utc::now(),
            note_user: None,
            note_internal: None,
        });
        for game_id in game_ids {
            let item_id = next_id(&store.items, |i| i.id);
            store.items.push(ReservationItem {
                id: item_id,
                reservation_id: id,
                board_game_id: *game_id,
                expires_on: Utc::now() + chrono::Duration::days(14),
                state: ItemState::Reserved,
            });
        }
    }

    pub fn seed_planned_state(
        &self,
        id: i32,
        start: DateTime<Utc>,
        planned_end: DateTime<Utc>,
    ) -> PlannedState {
        let state = PlannedState {
            id,
            kind: StateKind::Open,
            start,
            planned_end,
            note_internal: None,
            made_by_id: 1,
            repeating_state_id: None,
            associated_event_id: None,
            next_planned_state_id: None,
            start_handled: false,
            end_handled: false,
        };
        self.lock().planned_states.push(state.clone());
        state
    }
}

impl RepositoryProvider for InMemoryRepos {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }
    fn categories(&self) -> &dyn CategoryRepository {
        &self.categories
    }
    fn board_games(&self) -> &dyn BoardGameRepository {
        &self.games
    }
    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }
    fn planned_states(&self) -> &dyn PlannedStateRepository {
        &self.planned
    }
    fn repeating_states(&self) -> &dyn RepeatingStateRepository {
        &self.repeating
    }
    fn club_events(&self) -> &dyn ClubEventRepository {
        &self.events
    }
}

struct UsersRepo(Arc<Mutex<Store>>);

#[async_trait]
impl UserRepository for UsersRepo {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        Ok(self.0.lock().unwrap().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_with_roles(&self, id: i32) -> DomainResult<Option<UserWithRoles>> {
        let store = self.0.lock().unwrap();
        let Some(user) = store.users.iter().find(|u| u.id == id).cloned() else {
            return Ok(None);
        };
        let roles = store
            .user_roles
            .iter()
            .filter(|(uid, ..)| *uid == id)
            .map(|(_, role, by, at)| RoleAssignment {
                role: *role,
                assigned_by_id: *by,
                assigned_at: *at,
            })
            .collect();
        Ok(Some(UserWithRoles { user, roles }))
    }

    async fn roles_of(&self, user_id: i32) -> DomainResult<Vec<Role>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .user_roles
            .iter()
            .filter(|(uid, ..)| *uid == user_id)
            .map(|(_, role, ..)| *role)
            .collect())
    }

    async fn list(&self, filter: UserFilter) -> DomainResult<(Vec<User>, u64)> {
        let store = self.0.lock().unwrap();
        let matching: Vec<User> = store
            .users
            .iter()
            .filter(|u| match &filter.name_fragment {
                Some(fragment) => {
                    u.username.contains(fragment.as_str())
                        || u.nickname
                            .as_deref()
                            .is_some_and(|n| n.contains(fragment.as_str()))
                }
                None => true,
            })
            .cloned()
            .collect();
        let total = matching.len() as u64;
        Ok((matching, total))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.0.lock().unwrap().users.len() as u64)
    }

    async fn create(&self, user: NewUser) -> DomainResult<User> {
        let mut store = self.0.lock().unwrap();
        let id = next_id(&store.users, |u| u.id);
        let user = User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            nickname: user.nickname,
            is_active: true,
            created_at: Utc::now(),
            last_login_at: None,
        };
        store.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> DomainResult<()> {
        let mut store = self.0.lock().unwrap();
        match store.users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => {
                *existing = user;
                Ok(())
            }
            None => Err(DomainError::not_found("User", user.id)),
        }
    }

    async fn assign_role(
        &self,
        user_id: i32,
        role: Role,
        assigned_by_id: Option<i32>,
    ) -> DomainResult<()> {
        let mut store = self.0.lock().unwrap();
        if !store
            .user_roles
            .iter()
            .any(|(uid, r, ..)| *uid == user_id && *r == role)
        {
            store
                .user_roles
                .push((user_id, role, assigned_by_id, Utc::now()));
        }
        Ok(())
    }

    async fn revoke_role(&self, user_id: i32, role: Role) -> DomainResult<()> {
        self.0
            .lock()
            .unwrap()
            .user_roles
            .retain(|(uid, r, ..)| !(*uid == user_id && *r == role));
        Ok(())
    }

    async fn touch_last_login(&self, user_id: i32) -> DomainResult<()> {
        let mut store = self.0.lock().unwrap();
        if let Some(user) = store.users.iter_mut().find(|u| u.id == user_id) {
            user.last_login_at = Some(Utc::now());
        }
        Ok(())
    }
}

struct CategoriesRepo(Arc<Mutex<Store>>);

#[async_trait]
impl CategoryRepository for CategoriesRepo {
    async fn find_all(&self) -> DomainResult<Vec<Category>> {
        Ok(self.0.lock().unwrap().categories.clone())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Category>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn create(&self, name: &str, colour_hex: &str) -> DomainResult<Category> {
        let mut store = self.0.lock().unwrap();
        let category = Category {
            id: next_id(&store.categories, |c| c.id),
            name: name.to_string(),
            colour_hex: colour_hex.to_string(),
        };
        store.categories.push(category.clone());
        Ok(category)
    }

    async fn update(&self, category: Category) -> DomainResult<()> {
        let mut store = self.0.lock().unwrap();
        match store.categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => {
                *existing = category;
                Ok(())
            }
            None => Err(DomainError::not_found("Category", category.id)),
        }
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.0.lock().unwrap().categories.retain(|c| c.id != id);
        Ok(())
    }

    async fn count_board_games(&self, id: i32) -> DomainResult<u64> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .games
            .iter()
            .filter(|g| g.category_id == id)
            .count() as u64)
    }
}

struct GamesRepo(Arc<Mutex<Store>>);

#[async_trait]
impl BoardGameRepository for GamesRepo {
    async fn find(&self, filter: BoardGameFilter) -> DomainResult<Vec<BoardGame>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .games
            .iter()
            .filter(|g| filter.visible.map_or(true, |v| g.visible == v))
            .filter(|g| filter.category_id.map_or(true, |c| g.category_id == c))
            .filter(|g| {
                filter.players.map_or(true, |p| {
                    g.players_min.map_or(true, |min| min <= p)
                        && g.players_max.map_or(true, |max| p <= max)
                })
            })
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<BoardGame>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .games
            .iter()
            .find(|g| g.id == id)
            .cloned())
    }

    async fn create(&self, game: NewBoardGame) -> DomainResult<BoardGame> {
        let mut store = self.0.lock().unwrap();
        let game = BoardGame {
            id: next_id(&store.games, |g| g.id),
            name: game.name,
            description: game.description,
            image_url: game.image_url,
            category_id: game.category_id,
            players_min: game.players_min,
            players_max: game.players_max,
            note_internal: game.note_internal,
            owner_id: game.owner_id,
            in_stock: game.in_stock,
            unavailable: game.unavailable,
            visible: game.visible,
            default_reservation_days: game.default_reservation_days,
        };
        store.games.push(game.clone());
        Ok(game)
    }

    async fn update(&self, game: BoardGame) -> DomainResult<()> {
        let mut store = self.0.lock().unwrap();
        match store.games.iter_mut().find(|g| g.id == game.id) {
            Some(existing) => {
                *existing = game;
                Ok(())
            }
            None => Err(DomainError::not_found("BoardGame", game.id)),
        }
    }

    async fn held_counts(&self, game_ids: &[i32]) -> DomainResult<Vec<(i32, i64)>> {
        let store = self.0.lock().unwrap();
        Ok(game_ids
            .iter()
            .map(|id| {
                let held = store
                    .items
                    .iter()
                    .filter(|i| i.board_game_id == *id && i.state.holds_copy())
                    .count() as i64;
                (*id, held)
            })
            .collect())
    }
}

struct ReservationsRepo(Arc<Mutex<Store>>);

#[async_trait]
impl ReservationRepository for ReservationsRepo {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .reservations
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn list_by_user(&self, user_id: i32) -> DomainResult<Vec<Reservation>> {
        let mut listed: Vec<Reservation> = self
            .0
            .lock()
            .unwrap()
            .reservations
            .iter()
            .filter(|r| r.made_by_id == user_id)
            .cloned()
            .collect();
        listed.sort_by(|a, b| b.made_on.cmp(&a.made_on));
        Ok(listed)
    }

    async fn list_all(&self) -> DomainResult<Vec<Reservation>> {
        let mut listed = self.0.lock().unwrap().reservations.clone();
        listed.sort_by(|a, b| b.made_on.cmp(&a.made_on));
        Ok(listed)
    }

    async fn create_with_items(
        &self,
        reservation: NewReservation,
        items: Vec<NewReservationItem>,
    ) -> DomainResult<(Reservation, Vec<ReservationItem>)> {
        let mut store = self.0.lock().unwrap();
        let reservation_id = next_id(&store.reservations, |r| r.id);
        let reservation = Reservation {
            id: reservation_id,
            made_by_id: reservation.made_by_id,
            made_on: Utc::now(),
            note_user: reservation.note_user,
            note_internal: reservation.note_internal,
        };
        store.reservations.push(reservation.clone());
        let mut created = Vec::new();
        for item in items {
            let item_id = next_id(&store.items, |i| i.id);
            let item = ReservationItem {
                id: item_id,
                reservation_id,
                board_game_id: item.board_game_id,
                expires_on: item.expires_on,
                state: ItemState::Reserved,
            };
            store.item_events.push(ItemEvent {
                reservation_item_id: item_id,
                made_by_id: Some(reservation.made_by_id),
                made_on: Utc::now(),
                event_type: ItemEventType::Created,
                new_state: Some(ItemState::Reserved),
                new_expires_on: None,
                note_internal: None,
            });
            store.items.push(item.clone());
            created.push(item);
        }
        Ok((reservation, created))
    }

    async fn add_items(
        &self,
        reservation_id: i32,
        items: Vec<NewReservationItem>,
        made_by_id: i32,
    ) -> DomainResult<Vec<ReservationItem>> {
        let mut store = self.0.lock().unwrap();
        let mut created = Vec::new();
        for item in items {
            let item_id = next_id(&store.items, |i| i.id);
            let item = ReservationItem {
                id: item_id,
                reservation_id,
                board_game_id: item.board_game_id,
                expires_on: item.expires_on,
                state: ItemState::Reserved,
            };
            store.item_events.push(ItemEvent {
                reservation_item_id: item_id,
                made_by_id: Some(made_by_id),
                made_on: Utc::now(),
                event_type: ItemEventType::Created,
                new_state: Some(ItemState::Reserved),
                new_expires_on: None,
                note_internal: None,
            });
            store.items.push(item.clone());
            created.push(item);
        }
        Ok(created)
    }

    async fn items_of(&self, reservation_id: i32) -> DomainResult<Vec<ReservationItem>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .items
            .iter()
            .filter(|i| i.reservation_id == reservation_id)
            .cloned()
            .collect())
    }

    async fn items_of_many(
        &self,
        reservation_ids: &[i32],
    ) -> DomainResult<Vec<ReservationItem>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .items
            .iter()
            .filter(|i| reservation_ids.contains(&i.reservation_id))
            .cloned()
            .collect())
    }

    async fn find_item(
        &self,
        reservation_id: i32,
        item_id: i32,
    ) -> DomainResult<Option<ReservationItem>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .items
            .iter()
            .find(|i| i.reservation_id == reservation_id && i.id == item_id)
            .cloned())
    }

    async fn save_item_with_event(
        &self,
        item: &ReservationItem,
        event: &ItemEvent,
    ) -> DomainResult<()> {
        let mut store = self.0.lock().unwrap();
        match store.items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => {
                *existing = item.clone();
                store.item_events.push(event.clone());
                Ok(())
            }
            None => Err(DomainError::not_found("ReservationItem", item.id)),
        }
    }

    async fn events_of_item(&self, item_id: i32) -> DomainResult<Vec<ItemEvent>> {
        let mut events: Vec<ItemEvent> = self
            .0
            .lock()
            .unwrap()
            .item_events
            .iter()
            .filter(|e| e.reservation_item_id == item_id)
            .cloned()
            .collect();
        events.sort_by(|a, b| a.made_on.cmp(&b.made_on));
        Ok(events)
    }

    async fn find_overdue_items(
        &self,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<ReservationItem>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .items
            .iter()
            .filter(|i| i.is_overdue(now))
            .cloned()
            .collect())
    }

    async fn update_note_user(&self, id: i32, note: Option<String>) -> DomainResult<()> {
        let mut store = self.0.lock().unwrap();
        match store.reservations.iter_mut().find(|r| r.id == id) {
            Some(r) => {
                r.note_user = note;
                Ok(())
            }
            None => Err(DomainError::not_found("Reservation", id)),
        }
    }

    async fn update_note_internal(&self, id: i32, note: Option<String>) -> DomainResult<()> {
        let mut store = self.0.lock().unwrap();
        match store.reservations.iter_mut().find(|r| r.id == id) {
            Some(r) => {
                r.note_internal = note;
                Ok(())
            }
            None => Err(DomainError::not_found("Reservation", id)),
        }
    }
}

struct PlannedStatesRepo(Arc<Mutex<Store>>);

#[async_trait]
impl PlannedStateRepository for PlannedStatesRepo {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<PlannedState>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .planned_states
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn find_current(&self, now: DateTime<Utc>) -> DomainResult<Option<PlannedState>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .planned_states
            .iter()
            .find(|s| s.is_active(now))
            .cloned())
    }

    async fn find_next(
        &self,
        now: DateTime<Utc>,
        kind: Option<StateKind>,
    ) -> DomainResult<Option<PlannedState>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .planned_states
            .iter()
            .filter(|s| s.start > now && kind.map_or(true, |k| s.kind == k))
            .min_by_key(|s| s.start)
            .cloned())
    }

    async fn find_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<PlannedState>> {
        let mut states: Vec<PlannedState> = self
            .0
            .lock()
            .unwrap()
            .planned_states
            .iter()
            .filter(|s| s.overlaps(from, to))
            .cloned()
            .collect();
        states.sort_by_key(|s| s.start);
        Ok(states)
    }

    async fn find_overlapping(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_id: Option<i32>,
    ) -> DomainResult<Vec<PlannedState>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .planned_states
            .iter()
            .filter(|s| exclude_id != Some(s.id) && s.overlaps(start, end))
            .cloned()
            .collect())
    }

    async fn create(&self, state: NewPlannedState) -> DomainResult<PlannedState> {
        let mut store = self.0.lock().unwrap();
        let state = PlannedState {
            id: next_id(&store.planned_states, |s| s.id),
            kind: state.kind,
            start: state.start,
            planned_end: state.planned_end,
            note_internal: state.note_internal,
            made_by_id: state.made_by_id,
            repeating_state_id: state.repeating_state_id,
            associated_event_id: state.associated_event_id,
            next_planned_state_id: None,
            start_handled: false,
            end_handled: false,
        };
        store.planned_states.push(state.clone());
        Ok(state)
    }

    async fn update(&self, state: PlannedState) -> DomainResult<()> {
        let mut store = self.0.lock().unwrap();
        match store.planned_states.iter_mut().find(|s| s.id == state.id) {
            Some(existing) => {
                *existing = state;
                Ok(())
            }
            None => Err(DomainError::not_found("PlannedState", state.id)),
        }
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.0
            .lock()
            .unwrap()
            .planned_states
            .retain(|s| s.id != id);
        Ok(())
    }

    async fn set_successor(&self, id: i32, next_id: Option<i32>) -> DomainResult<()> {
        let mut store = self.0.lock().unwrap();
        if let Some(next) = next_id {
            if store
                .planned_states
                .iter()
                .any(|s| s.id != id && s.next_planned_state_id == Some(next))
            {
                return Err(DomainError::Conflict(format!(
                    "State {next} already has a predecessor"
                )));
            }
        }
        match store.planned_states.iter_mut().find(|s| s.id == id) {
            Some(state) => {
                state.next_planned_state_id = next_id;
                Ok(())
            }
            None => Err(DomainError::not_found("PlannedState", id)),
        }
    }

    async fn find_due_starts(&self, now: DateTime<Utc>) -> DomainResult<Vec<PlannedState>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .planned_states
            .iter()
            .filter(|s| s.has_started(now) && !s.start_handled)
            .cloned()
            .collect())
    }

    async fn find_due_ends(&self, now: DateTime<Utc>) -> DomainResult<Vec<PlannedState>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .planned_states
            .iter()
            .filter(|s| s.has_ended(now) && !s.end_handled)
            .cloned()
            .collect())
    }

    async fn mark_start_handled(&self, id: i32) -> DomainResult<()> {
        let mut store = self.0.lock().unwrap();
        match store.planned_states.iter_mut().find(|s| s.id == id) {
            Some(state) => {
                state.start_handled = true;
                Ok(())
            }
            None => Err(DomainError::not_found("PlannedState", id)),
        }
    }

    async fn mark_end_handled(&self, id: i32) -> DomainResult<()> {
        let mut store = self.0.lock().unwrap();
        match store.planned_states.iter_mut().find(|s| s.id == id) {
            Some(state) => {
                state.end_handled = true;
                Ok(())
            }
            None => Err(DomainError::not_found("PlannedState", id)),
        }
    }
}

struct RepeatingStatesRepo(Arc<Mutex<Store>>);

#[async_trait]
impl RepeatingStateRepository for RepeatingStatesRepo {
    async fn find_all(&self) -> DomainResult<Vec<RepeatingState>> {
        Ok(self.0.lock().unwrap().repeating_states.clone())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<RepeatingState>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .repeating_states
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn create(&self, template: NewRepeatingState) -> DomainResult<RepeatingState> {
        let mut store = self.0.lock().unwrap();
        let template = RepeatingState {
            id: next_id(&store.repeating_states, |t| t.id),
            kind: template.kind,
            day_of_week: template.day_of_week,
            time_from: template.time_from,
            time_to: template.time_to,
            effective_from: template.effective_from,
            effective_to: template.effective_to,
            note_internal: template.note_internal,
            made_by_id: template.made_by_id,
        };
        store.repeating_states.push(template.clone());
        Ok(template)
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.0
            .lock()
            .unwrap()
            .repeating_states
            .retain(|t| t.id != id);
        Ok(())
    }
}

struct ClubEventsRepo(Arc<Mutex<Store>>);

#[async_trait]
impl ClubEventRepository for ClubEventsRepo {
    async fn find_all(&self) -> DomainResult<Vec<ClubEvent>> {
        Ok(self.0.lock().unwrap().club_events.clone())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ClubEvent>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .club_events
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn create(&self, event: NewClubEvent) -> DomainResult<ClubEvent> {
        let mut store = self.0.lock().unwrap();
        let event = ClubEvent {
            id: next_id(&store.club_events, |e| e.id),
            name: event.name,
            place: event.place,
            from: event.from,
            to: event.to,
            made_by_id: event.made_by_id,
        };
        store.club_events.push(event.clone());
        Ok(event)
    }

    async fn update(&self, event: ClubEvent) -> DomainResult<()> {
        let mut store = self.0.lock().unwrap();
        match store.club_events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => {
                *existing = event;
                Ok(())
            }
            None => Err(DomainError::not_found("ClubEvent", event.id)),
        }
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.0.lock().unwrap().club_events.retain(|e| e.id != id);
        Ok(())
    }
}
