//! Create `fir` table. One FIR per challan.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Fir::Table)
                    .if_not_exists()
                    .col(uuid(Fir::Id).primary_key())
                    .col(string_len(Fir::FirNumber, 48).unique_key().not_null())
                    .col(uuid(Fir::StationId).not_null())
                    .col(uuid(Fir::ChallanId).unique_key().not_null())
                    .col(uuid(Fir::InformantOfficerId).not_null())
                    .col(text(Fir::Description).not_null())
                    .col(ColumnDef::new(Fir::InvestigationReport).text().null())
                    .col(string_len(Fir::Status, 24).not_null())
                    .col(timestamp_with_time_zone(Fir::FiledAt).not_null())
                    .col(timestamp_with_time_zone(Fir::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fir_station")
                            .from(Fir::Table, Fir::StationId)
                            .to(PoliceStation::Table, PoliceStation::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fir_challan")
                            .from(Fir::Table, Fir::ChallanId)
                            .to(Challan::Table, Challan::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fir_informant")
                            .from(Fir::Table, Fir::InformantOfficerId)
                            .to(PoliceOfficer::Table, PoliceOfficer::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Fir::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Fir { Table, Id, FirNumber, StationId, ChallanId, InformantOfficerId, Description, InvestigationReport, Status, FiledAt, UpdatedAt }

#[derive(DeriveIden)]
enum PoliceStation { Table, Id }

#[derive(DeriveIden)]
enum Challan { Table, Id }

#[derive(DeriveIden)]
enum PoliceOfficer { Table, Id }
