//! Create `court` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Court::Table)
                    .if_not_exists()
                    .col(uuid(Court::Id).primary_key())
                    .col(string_len(Court::Name, 128).not_null())
                    .col(string_len(Court::CourtType, 64).not_null())
                    .col(string_len(Court::District, 64).not_null())
                    .col(ColumnDef::new(Court::Address).string_len(255).null())
                    .col(timestamp_with_time_zone(Court::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Court::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Court { Table, Id, Name, CourtType, District, Address, CreatedAt }
