//! Create `challan` table.
//!
//! A citation links officer, accused, vehicle, violation and (optionally)
//! the emission report that evidenced it. An emission report backs at most
//! one challan.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Challan::Table)
                    .if_not_exists()
                    .col(uuid(Challan::Id).primary_key())
                    .col(string_len(Challan::ChallanNumber, 32).unique_key().not_null())
                    .col(uuid(Challan::OfficerId).not_null())
                    .col(uuid(Challan::AccusedId).not_null())
                    .col(uuid(Challan::VehicleId).not_null())
                    .col(uuid(Challan::ViolationId).not_null())
                    .col(ColumnDef::new(Challan::EmissionReportId).uuid().unique_key().null())
                    .col(big_integer(Challan::PenaltyAmount).not_null())
                    .col(ColumnDef::new(Challan::Location).string_len(255).null())
                    .col(ColumnDef::new(Challan::EvidencePath).string_len(512).null())
                    .col(string_len(Challan::Status, 16).not_null())
                    .col(timestamp_with_time_zone(Challan::IssuedAt).not_null())
                    .col(timestamp_with_time_zone(Challan::DueDate).not_null())
                    .col(ColumnDef::new(Challan::PaidAt).timestamp_with_time_zone().null())
                    .col(string_len(Challan::DigitalSignature, 64).not_null())
                    .col(timestamp_with_time_zone(Challan::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Challan::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_challan_officer")
                            .from(Challan::Table, Challan::OfficerId)
                            .to(PoliceOfficer::Table, PoliceOfficer::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_challan_accused")
                            .from(Challan::Table, Challan::AccusedId)
                            .to(Accused::Table, Accused::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_challan_vehicle")
                            .from(Challan::Table, Challan::VehicleId)
                            .to(Vehicle::Table, Vehicle::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_challan_violation")
                            .from(Challan::Table, Challan::ViolationId)
                            .to(Violation::Table, Violation::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_challan_emission_report")
                            .from(Challan::Table, Challan::EmissionReportId)
                            .to(EmissionReport::Table, EmissionReport::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Challan::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Challan {
    Table,
    Id,
    ChallanNumber,
    OfficerId,
    AccusedId,
    VehicleId,
    ViolationId,
    EmissionReportId,
    PenaltyAmount,
    Location,
    EvidencePath,
    Status,
    IssuedAt,
    DueDate,
    PaidAt,
    DigitalSignature,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PoliceOfficer { Table, Id }

#[derive(DeriveIden)]
enum Accused { Table, Id }

#[derive(DeriveIden)]
enum Vehicle { Table, Id }

#[derive(DeriveIden)]
enum Violation { Table, Id }

#[derive(DeriveIden)]
enum EmissionReport { Table, Id }
