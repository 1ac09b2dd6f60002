//! Create repeating state and planned state tables
//!
//! The unique index on `next_planned_state_id` enforces at most one
//! successor per planned state at the schema level.

use sea_orm_migration::prelude::*;

use super::m20260101_000001_create_users::Users;
use super::m20260101_000004_create_club_events::ClubEvents;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RepeatingStates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RepeatingStates::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RepeatingStates::Kind).string().not_null())
                    .col(
                        ColumnDef::new(RepeatingStates::DayOfWeek)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RepeatingStates::TimeFrom).time().not_null())
                    .col(ColumnDef::new(RepeatingStates::TimeTo).time().not_null())
                    .col(
                        ColumnDef::new(RepeatingStates::EffectiveFrom)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RepeatingStates::EffectiveTo)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RepeatingStates::NoteInternal).string())
                    .col(
                        ColumnDef::new(RepeatingStates::MadeById)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_repeating_states_made_by")
                            .from(RepeatingStates::Table, RepeatingStates::MadeById)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PlannedStates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlannedStates::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PlannedStates::Kind).string().not_null())
                    .col(
                        ColumnDef::new(PlannedStates::Start)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlannedStates::PlannedEnd)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PlannedStates::NoteInternal).string())
                    .col(ColumnDef::new(PlannedStates::MadeById).integer().not_null())
                    .col(ColumnDef::new(PlannedStates::RepeatingStateId).integer())
                    .col(ColumnDef::new(PlannedStates::AssociatedEventId).integer())
                    .col(ColumnDef::new(PlannedStates::NextPlannedStateId).integer())
                    .col(
                        ColumnDef::new(PlannedStates::StartHandled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PlannedStates::EndHandled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_planned_states_made_by")
                            .from(PlannedStates::Table, PlannedStates::MadeById)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_planned_states_repeating_state")
                            .from(PlannedStates::Table, PlannedStates::RepeatingStateId)
                            .to(RepeatingStates::Table, RepeatingStates::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_planned_states_event")
                            .from(PlannedStates::Table, PlannedStates::AssociatedEventId)
                            .to(ClubEvents::Table, ClubEvents::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_planned_states_next")
                            .from(PlannedStates::Table, PlannedStates::NextPlannedStateId)
                            .to(PlannedStates::Table, PlannedStates::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_planned_states_start")
                    .table(PlannedStates::Table)
                    .col(PlannedStates::Start)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_planned_states_planned_end")
                    .table(PlannedStates::Table)
                    .col(PlannedStates::PlannedEnd)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_planned_states_next")
                    .table(PlannedStates::Table)
                    .col(PlannedStates::NextPlannedStateId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PlannedStates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RepeatingStates::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum RepeatingStates {
    Table,
    Id,
    Kind,
    DayOfWeek,
    TimeFrom,
    TimeTo,
    EffectiveFrom,
    EffectiveTo,
    NoteInternal,
    MadeById,
}

#[derive(Iden)]
pub enum PlannedStates {
    Table,
    Id,
    Kind,
    Start,
    PlannedEnd,
    NoteInternal,
    MadeById,
    RepeatingStateId,
    AssociatedEventId,
    NextPlannedStateId,
    StartHandled,
    EndHandled,
}
