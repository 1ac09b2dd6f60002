//! Create club events table

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
                    .table(ClubEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClubEvents::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClubEvents::Name).string().not_null())
                    .col(ColumnDef::new(ClubEvents::Place).string())
                    .col(
                        ColumnDef::new(ClubEvents::From)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClubEvents::To)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClubEvents::MadeById).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_club_events_made_by")
                            .from(ClubEvents::Table, ClubEvents::MadeById)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_club_events_from")
                    .table(ClubEvents::Table)
                    .col(ClubEvents::From)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClubEvents::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ClubEvents {
    Table,
    Id,
    Name,
    Place,
    From,
    To,
    MadeById,
}
