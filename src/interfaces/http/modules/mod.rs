pub mod auth;
pub mod board_games;
pub mod club_events;
pub mod club_states;
pub mod health;
pub mod metrics;
pub mod reservations;
pub mod users;
