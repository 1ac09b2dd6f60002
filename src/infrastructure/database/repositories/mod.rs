pub mod board_game_repository;
pub mod club_event_repository;
pub mod club_state_repository;
pub mod repository_provider;
pub mod reservation_repository;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;
