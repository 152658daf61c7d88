//! Create `case_statement` table; statements are removed with their case.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CaseStatement::Table)
                    .if_not_exists()
                    .col(uuid(CaseStatement::Id).primary_key())
                    .col(uuid(CaseStatement::CaseId).not_null())
                    .col(string_len(CaseStatement::StatementBy, 128).not_null())
                    .col(text(CaseStatement::StatementText).not_null())
                    .col(timestamp_with_time_zone(CaseStatement::StatementDate).not_null())
                    .col(ColumnDef::new(CaseStatement::RecordedBy).uuid().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_case_statement_case")
                            .from(CaseStatement::Table, CaseStatement::CaseId)
                            .to(CourtCase::Table, CourtCase::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_case_statement_recorded_by")
                            .from(CaseStatement::Table, CaseStatement::RecordedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CaseStatement::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CaseStatement { Table, Id, CaseId, StatementBy, StatementText, StatementDate, RecordedBy }

#[derive(DeriveIden)]
enum CourtCase { Table, Id }

#[derive(DeriveIden)]
enum User { Table, Id }
