//! Create `iot_device` table for roadside sound meters and gas analyzers.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(IotDevice::Table)
                    .if_not_exists()
                    .col(uuid(IotDevice::Id).primary_key())
                    .col(ColumnDef::new(IotDevice::StationId).uuid().null())
                    .col(string_len(IotDevice::DeviceName, 128).not_null())
                    .col(string_len(IotDevice::SerialNumber, 64).unique_key().not_null())
                    .col(string_len(IotDevice::DeviceType, 32).not_null())
                    .col(boolean(IotDevice::IsActive).not_null())
                    .col(ColumnDef::new(IotDevice::CalibratedUntil).timestamp_with_time_zone().null())
                    .col(timestamp_with_time_zone(IotDevice::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_iot_device_station")
                            .from(IotDevice::Table, IotDevice::StationId)
                            .to(PoliceStation::Table, PoliceStation::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(IotDevice::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum IotDevice { Table, Id, StationId, DeviceName, SerialNumber, DeviceType, IsActive, CalibratedUntil, CreatedAt }

#[derive(DeriveIden)]
enum PoliceStation { Table, Id }
