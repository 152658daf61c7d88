//! Create `police_station` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PoliceStation::Table)
                    .if_not_exists()
                    .col(uuid(PoliceStation::Id).primary_key())
                    .col(string_len(PoliceStation::Name, 128).not_null())
                    .col(string_len(PoliceStation::StationCode, 16).unique_key().not_null())
                    .col(string_len(PoliceStation::District, 64).not_null())
                    .col(string_len(PoliceStation::Province, 64).not_null())
                    .col(ColumnDef::new(PoliceStation::Address).string_len(255).null())
                    .col(ColumnDef::new(PoliceStation::ContactNumber).string_len(32).null())
                    .col(timestamp_with_time_zone(PoliceStation::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PoliceStation::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PoliceStation { Table, Id, Name, StationCode, District, Province, Address, ContactNumber, CreatedAt }
