//! Create `police_officer` table.
//!
//! Each officer owns exactly one login account and belongs to one station.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PoliceOfficer::Table)
                    .if_not_exists()
                    .col(uuid(PoliceOfficer::Id).primary_key())
                    .col(uuid(PoliceOfficer::UserId).unique_key().not_null())
                    .col(uuid(PoliceOfficer::StationId).not_null())
                    .col(string_len(PoliceOfficer::BadgeNumber, 32).unique_key().not_null())
                    .col(string_len(PoliceOfficer::FullName, 128).not_null())
                    .col(string_len(PoliceOfficer::Cnic, 15).unique_key().not_null())
                    .col(string_len(PoliceOfficer::Rank, 64).not_null())
                    .col(ColumnDef::new(PoliceOfficer::ContactNumber).string_len(32).null())
                    .col(boolean(PoliceOfficer::IsInvestigationOfficer).not_null())
                    .col(timestamp_with_time_zone(PoliceOfficer::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_police_officer_user")
                            .from(PoliceOfficer::Table, PoliceOfficer::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_police_officer_station")
                            .from(PoliceOfficer::Table, PoliceOfficer::StationId)
                            .to(PoliceStation::Table, PoliceStation::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PoliceOfficer::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PoliceOfficer { Table, Id, UserId, StationId, BadgeNumber, FullName, Cnic, Rank, ContactNumber, IsInvestigationOfficer, CreatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum PoliceStation { Table, Id }
