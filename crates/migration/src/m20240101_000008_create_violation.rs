//! Create `violation` table: the catalogue of offences and their penalties.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Violation::Table)
                    .if_not_exists()
                    .col(uuid(Violation::Id).primary_key())
                    .col(string_len(Violation::ViolationType, 128).unique_key().not_null())
                    .col(text(Violation::Description).not_null())
                    .col(big_integer(Violation::PenaltyAmount).not_null())
                    .col(string_len(Violation::SectionOfLaw, 64).not_null())
                    .col(boolean(Violation::IsCognizable).not_null())
                    .col(ColumnDef::new(Violation::NoiseThresholdDb).double().null())
                    .col(timestamp_with_time_zone(Violation::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Violation::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Violation { Table, Id, ViolationType, Description, PenaltyAmount, SectionOfLaw, IsCognizable, NoiseThresholdDb, CreatedAt }
