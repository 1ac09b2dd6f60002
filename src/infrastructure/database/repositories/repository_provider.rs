//! SeaORM-backed repository provider

use sea_orm::DatabaseConnection;

use super::board_game_repository::{SeaOrmBoardGameRepository, SeaOrmCategoryRepository};
use super::club_event_repository::SeaOrmClubEventRepository;
use super::club_state_repository::{SeaOrmPlannedStateRepository, SeaOrmRepeatingStateRepository};
use super::reservation_repository::SeaOrmReservationRepository;
use super::user_repository::SeaOrmUserRepository;
use crate::domain::board_game::{BoardGameRepository, CategoryRepository};
use crate::domain::club_state::{
    ClubEventRepository, PlannedStateRepository, RepeatingStateRepository,
};
use crate::domain::reservation::ReservationRepository;
use crate::domain::user::UserRepository;
use crate::domain::RepositoryProvider;

/// Bundles the SeaORM repositories over one shared connection pool.
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    categories: SeaOrmCategoryRepository,
    board_games: SeaOrmBoardGameRepository,
    reservations: SeaOrmReservationRepository,
    planned_states: SeaOrmPlannedStateRepository,
    repeating_states: SeaOrmRepeatingStateRepository,
    club_events: SeaOrmClubEventRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            categories: SeaOrmCategoryRepository::new(db.clone()),
            board_games: SeaOrmBoardGameRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db.clone()),
            planned_states: SeaOrmPlannedStateRepository::new(db.clone()),
            repeating_states: SeaOrmRepeatingStateRepository::new(db.clone()),
            club_events: SeaOrmClubEventRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn categories(&self) -> &dyn CategoryRepository {
        &self.categories
    }

    fn board_games(&self) -> &dyn BoardGameRepository {
        &self.board_games
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn planned_states(&self) -> &dyn PlannedStateRepository {
        &self.planned_states
    }

    fn repeating_states(&self) -> &dyn RepeatingStateRepository {
        &self.repeating_states
    }

    fn club_events(&self) -> &dyn ClubEventRepository {
        &self.club_events
    }
}
