//! Database migrations

use sea_orm_migration::prelude::*;

mod m20260101_000001_create_users;
mod m20260101_000002_create_board_games;
mod m20260101_000003_create_reservations;
mod m20260101_000004_create_club_events;
mod m20260101_000005_create_planned_states;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_users::Migration),
            Box::new(m20260101_000002_create_board_games::Migration),
            Box::new(m20260101_000003_create_reservations::Migration),
            Box::new(m20260101_000004_create_club_events::Migration),
            Box::new(m20260101_000005_create_planned_states::Migration),
        ]
    }
}
