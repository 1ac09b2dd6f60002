//! Create board game catalog tables
//!
//! Category deletion is restricted while games reference it; game owners
//! are restrict-delete to keep lending history intact.

use sea_orm_migration::prelude::*;

use super::m20260101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BoardGameCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BoardGameCategories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BoardGameCategories::Name)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BoardGameCategories::ColourHex)
                            .string()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BoardGames::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BoardGames::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BoardGames::Name).string().not_null())
                    .col(ColumnDef::new(BoardGames::Description).string())
                    .col(ColumnDef::new(BoardGames::ImageUrl).string())
                    .col(ColumnDef::new(BoardGames::CategoryId).integer().not_null())
                    .col(ColumnDef::new(BoardGames::PlayersMin).integer())
                    .col(ColumnDef::new(BoardGames::PlayersMax).integer())
                    .col(ColumnDef::new(BoardGames::NoteInternal).string())
                    .col(ColumnDef::new(BoardGames::OwnerId).integer())
                    .col(
                        ColumnDef::new(BoardGames::InStock)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(BoardGames::Unavailable)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(BoardGames::Visible)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(BoardGames::DefaultReservationDays)
                            .integer()
                            .not_null()
                            .default(14),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_board_games_category")
                            .from(BoardGames::Table, BoardGames::CategoryId)
                            .to(BoardGameCategories::Table, BoardGameCategories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_board_games_owner")
                            .from(BoardGames::Table, BoardGames::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_board_games_category")
                    .table(BoardGames::Table)
                    .col(BoardGames::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_board_games_visible")
                    .table(BoardGames::Table)
                    .col(BoardGames::Visible)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BoardGames::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BoardGameCategories::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum BoardGameCategories {
    Table,
    Id,
    Name,
    ColourHex,
}

#[derive(Iden)]
pub enum BoardGames {
    Table,
    Id,
    Name,
    Description,
    ImageUrl,
    CategoryId,
    PlayersMin,
    PlayersMax,
    NoteInternal,
    OwnerId,
    InStock,
    Unavailable,
    Visible,
    DefaultReservationDays,
}
