//! Create `emission_report` table.
//!
//! Readings captured from an IoT device, sealed with a digital signature.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmissionReport::Table)
                    .if_not_exists()
                    .col(uuid(EmissionReport::Id).primary_key())
                    .col(uuid(EmissionReport::DeviceId).not_null())
                    .col(ColumnDef::new(EmissionReport::OfficerId).uuid().null())
                    .col(string_len(EmissionReport::VehiclePlate, 32).not_null())
                    .col(double(EmissionReport::SoundLevelDb).not_null())
                    .col(ColumnDef::new(EmissionReport::CoLevel).double().null())
                    .col(ColumnDef::new(EmissionReport::Co2Level).double().null())
                    .col(ColumnDef::new(EmissionReport::HcLevel).double().null())
                    .col(ColumnDef::new(EmissionReport::NoxLevel).double().null())
                    .col(string_len(EmissionReport::Classification, 16).not_null())
                    .col(timestamp_with_time_zone(EmissionReport::MeasuredAt).not_null())
                    .col(string_len(EmissionReport::DigitalSignature, 64).not_null())
                    .col(timestamp_with_time_zone(EmissionReport::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_emission_report_device")
                            .from(EmissionReport::Table, EmissionReport::DeviceId)
                            .to(IotDevice::Table, IotDevice::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_emission_report_officer")
                            .from(EmissionReport::Table, EmissionReport::OfficerId)
                            .to(PoliceOfficer::Table, PoliceOfficer::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(EmissionReport::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum EmissionReport {
    Table,
    Id,
    DeviceId,
    OfficerId,
    VehiclePlate,
    SoundLevelDb,
    CoLevel,
    Co2Level,
    HcLevel,
    NoxLevel,
    Classification,
    MeasuredAt,
    DigitalSignature,
    CreatedAt,
}

#[derive(DeriveIden)]
enum IotDevice { Table, Id }

#[derive(DeriveIden)]
enum PoliceOfficer { Table, Id }
