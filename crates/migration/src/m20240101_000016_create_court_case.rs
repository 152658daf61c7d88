//! Create `court_case` table. One case per FIR.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CourtCase::Table)
                    .if_not_exists()
                    .col(uuid(CourtCase::Id).primary_key())
                    .col(string_len(CourtCase::CaseNumber, 32).unique_key().not_null())
                    .col(uuid(CourtCase::FirId).unique_key().not_null())
                    .col(uuid(CourtCase::CourtId).not_null())
                    .col(ColumnDef::new(CourtCase::JudgeId).uuid().null())
                    .col(string_len(CourtCase::CaseType, 64).not_null())
                    .col(string_len(CourtCase::Status, 16).not_null())
                    .col(ColumnDef::new(CourtCase::HearingDate).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(CourtCase::Verdict).text().null())
                    .col(ColumnDef::new(CourtCase::VerdictDate).timestamp_with_time_zone().null())
                    .col(timestamp_with_time_zone(CourtCase::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(CourtCase::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_court_case_fir")
                            .from(CourtCase::Table, CourtCase::FirId)
                            .to(Fir::Table, Fir::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_court_case_court")
                            .from(CourtCase::Table, CourtCase::CourtId)
                            .to(Court::Table, Court::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_court_case_judge")
                            .from(CourtCase::Table, CourtCase::JudgeId)
                            .to(Judge::Table, Judge::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CourtCase::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CourtCase { Table, Id, CaseNumber, FirId, CourtId, JudgeId, CaseType, Status, HearingDate, Verdict, VerdictDate, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Fir { Table, Id }

#[derive(DeriveIden)]
enum Court { Table, Id }

#[derive(DeriveIden)]
enum Judge { Table, Id }
