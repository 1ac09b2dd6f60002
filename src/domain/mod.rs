//! Core domain: entities, state machines, repository traits and errors.

pub mod board_game;
pub mod club_state;
pub mod error;
pub mod reservation;
pub mod user;

pub use board_game::{BoardGame, BoardGameFilter, Category, NewBoardGame};
pub use club_state::{
    ClubEvent, NewClubEvent, NewPlannedState, NewRepeatingState, PlannedState, RepeatingState,
    StateKind,
};
pub use error::{DomainError, DomainResult};
pub use reservation::{
    ItemEvent, ItemEventType, ItemState, NewReservation, NewReservationItem, Reservation,
    ReservationItem,
};
pub use user::{NewUser, Role, RoleAssignment, User, UserFilter, UserWithRoles};

use board_game::{BoardGameRepository, CategoryRepository};
use club_state::{ClubEventRepository, PlannedStateRepository, RepeatingStateRepository};
use reservation::ReservationRepository;
use user::UserRepository;

/// Bundles all repositories behind one injection point.
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn categories(&self) -> &dyn CategoryRepository;
    fn board_games(&self) -> &dyn BoardGameRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
    fn planned_states(&self) -> &dyn PlannedStateRepository;
    fn repeating_states(&self) -> &dyn RepeatingStateRepository;
    fn club_events(&self) -> &dyn ClubEventRepository;
}
