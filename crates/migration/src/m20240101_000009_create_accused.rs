//! Create `accused` table, keyed for lookups by normalized CNIC.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accused::Table)
                    .if_not_exists()
                    .col(uuid(Accused::Id).primary_key())
                    .col(string_len(Accused::FullName, 128).not_null())
                    .col(string_len(Accused::Cnic, 15).unique_key().not_null())
                    .col(ColumnDef::new(Accused::Address).string_len(255).null())
                    .col(ColumnDef::new(Accused::ContactNumber).string_len(32).null())
                    .col(ColumnDef::new(Accused::Email).string_len(255).null())
                    .col(timestamp_with_time_zone(Accused::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Accused::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Accused { Table, Id, FullName, Cnic, Address, ContactNumber, Email, CreatedAt }
