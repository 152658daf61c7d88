//! Create `vehicle` table with optional owner FK to `accused`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicle::Table)
                    .if_not_exists()
                    .col(uuid(Vehicle::Id).primary_key())
                    .col(string_len(Vehicle::PlateNumber, 32).unique_key().not_null())
                    .col(ColumnDef::new(Vehicle::Make).string_len(64).null())
                    .col(ColumnDef::new(Vehicle::Color).string_len(32).null())
                    .col(ColumnDef::new(Vehicle::ChassisNumber).string_len(64).null())
                    .col(ColumnDef::new(Vehicle::EngineNumber).string_len(64).null())
                    .col(ColumnDef::new(Vehicle::RegistrationYear).integer().null())
                    .col(ColumnDef::new(Vehicle::OwnerId).uuid().null())
                    .col(timestamp_with_time_zone(Vehicle::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicle_owner")
                            .from(Vehicle::Table, Vehicle::OwnerId)
                            .to(Accused::Table, Accused::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Vehicle::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Vehicle { Table, Id, PlateNumber, Make, Color, ChassisNumber, EngineNumber, RegistrationYear, OwnerId, CreatedAt }

#[derive(DeriveIden)]
enum Accused { Table, Id }
