//! Create `otp_token` table.
//!
//! Holds digests of one-time codes for password reset and public status
//! lookup. Codes themselves are never stored.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OtpToken::Table)
                    .if_not_exists()
                    .col(uuid(OtpToken::Id).primary_key())
                    .col(string_len(OtpToken::Email, 255).not_null())
                    .col(ColumnDef::new(OtpToken::Subject).string_len(64).null())
                    .col(string_len(OtpToken::Purpose, 32).not_null())
                    .col(string_len(OtpToken::CodeHash, 64).not_null())
                    .col(integer(OtpToken::Attempts).not_null())
                    .col(timestamp_with_time_zone(OtpToken::ExpiresAt).not_null())
                    .col(ColumnDef::new(OtpToken::ConsumedAt).timestamp_with_time_zone().null())
                    .col(timestamp_with_time_zone(OtpToken::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(OtpToken::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum OtpToken { Table, Id, Email, Subject, Purpose, CodeHash, Attempts, ExpiresAt, ConsumedAt, CreatedAt }
