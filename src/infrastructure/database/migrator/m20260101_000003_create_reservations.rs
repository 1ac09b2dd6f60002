//! Create reservation tables
//!
//! Deleting a reservation cascades to its items, which cascade to their
//! events. The event log itself is append-only; its primary key is
//! `(reservation_item_id, made_on)`.

use sea_orm_migration::prelude::*;

use super::m20260101_000001_create_users::Users;
use super::m20260101_000002_create_board_games::BoardGames;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BoardGameReservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BoardGameReservations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BoardGameReservations::MadeById)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BoardGameReservations::MadeOn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BoardGameReservations::NoteUser).string())
                    .col(ColumnDef::new(BoardGameReservations::NoteInternal).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_made_by")
                            .from(
                                BoardGameReservations::Table,
                                BoardGameReservations::MadeById,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_made_by")
                    .table(BoardGameReservations::Table)
                    .col(BoardGameReservations::MadeById)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_made_on")
                    .table(BoardGameReservations::Table)
                    .col(BoardGameReservations::MadeOn)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BoardGameReservationItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BoardGameReservationItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BoardGameReservationItems::ReservationId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BoardGameReservationItems::BoardGameId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BoardGameReservationItems::ExpiresOn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BoardGameReservationItems::State)
                            .string()
                            .not_null()
                            .default("Reserved"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_items_reservation")
                            .from(
                                BoardGameReservationItems::Table,
                                BoardGameReservationItems::ReservationId,
                            )
                            .to(BoardGameReservations::Table, BoardGameReservations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_items_board_game")
                            .from(
                                BoardGameReservationItems::Table,
                                BoardGameReservationItems::BoardGameId,
                            )
                            .to(BoardGames::Table, BoardGames::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_items_reservation")
                    .table(BoardGameReservationItems::Table)
                    .col(BoardGameReservationItems::ReservationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_items_state")
                    .table(BoardGameReservationItems::Table)
                    .col(BoardGameReservationItems::State)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_items_expiry")
                    .table(BoardGameReservationItems::Table)
                    .col(BoardGameReservationItems::ExpiresOn)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BoardGameReservationItemEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BoardGameReservationItemEvents::ReservationItemId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BoardGameReservationItemEvents::MadeOn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BoardGameReservationItemEvents::MadeById).integer())
                    .col(
                        ColumnDef::new(BoardGameReservationItemEvents::EventType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BoardGameReservationItemEvents::NewState).string())
                    .col(
                        ColumnDef::new(BoardGameReservationItemEvents::NewExpiresOn)
                            .timestamp_with_time_zone(),
                    )
                    .col(
                        ColumnDef::new(BoardGameReservationItemEvents::NoteInternal).string(),
                    )
                    .primary_key(
                        Index::create()
                            .col(BoardGameReservationItemEvents::ReservationItemId)
                            .col(BoardGameReservationItemEvents::MadeOn),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_item_events_item")
                            .from(
                                BoardGameReservationItemEvents::Table,
                                BoardGameReservationItemEvents::ReservationItemId,
                            )
                            .to(
                                BoardGameReservationItems::Table,
                                BoardGameReservationItems::Id,
                            )
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_item_events_made_by")
                            .from(
                                BoardGameReservationItemEvents::Table,
                                BoardGameReservationItemEvents::MadeById,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(BoardGameReservationItemEvents::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(BoardGameReservationItems::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(BoardGameReservations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum BoardGameReservations {
    Table,
    Id,
    MadeById,
    MadeOn,
    NoteUser,
    NoteInternal,
}

#[derive(Iden)]
pub enum BoardGameReservationItems {
    Table,
    Id,
    ReservationId,
    BoardGameId,
    ExpiresOn,
    State,
}

#[derive(Iden)]
pub enum BoardGameReservationItemEvents {
    Table,
    ReservationItemId,
    MadeOn,
    MadeById,
    EventType,
    NewState,
    NewExpiresOn,
    NoteInternal,
}
