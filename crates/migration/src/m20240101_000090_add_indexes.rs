use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: &[&str] = &[
    "idx_user_role",
    "idx_otp_email_purpose",
    "idx_officer_station",
    "idx_emission_plate",
    "idx_emission_device",
    "idx_challan_officer",
    "idx_challan_accused",
    "idx_challan_status",
    "idx_fir_station_filed",
    "idx_case_court",
    "idx_case_judge",
    "idx_statement_case",
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(Index::create().name("idx_user_role").table(User::Table).col(User::RoleId).to_owned())
            .await?;

        // OTP lookups always filter by (email, purpose)
        manager
            .create_index(
                Index::create()
                    .name("idx_otp_email_purpose")
                    .table(OtpToken::Table)
                    .col(OtpToken::Email)
                    .col(OtpToken::Purpose)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_officer_station")
                    .table(PoliceOfficer::Table)
                    .col(PoliceOfficer::StationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_emission_plate")
                    .table(EmissionReport::Table)
                    .col(EmissionReport::VehiclePlate)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_emission_device")
                    .table(EmissionReport::Table)
                    .col(EmissionReport::DeviceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(Index::create().name("idx_challan_officer").table(Challan::Table).col(Challan::OfficerId).to_owned())
            .await?;
        manager
            .create_index(Index::create().name("idx_challan_accused").table(Challan::Table).col(Challan::AccusedId).to_owned())
            .await?;
        manager
            .create_index(Index::create().name("idx_challan_status").table(Challan::Table).col(Challan::Status).to_owned())
            .await?;

        // FIR numbering counts per station and year
        manager
            .create_index(
                Index::create()
                    .name("idx_fir_station_filed")
                    .table(Fir::Table)
                    .col(Fir::StationId)
                    .col(Fir::FiledAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(Index::create().name("idx_case_court").table(CourtCase::Table).col(CourtCase::CourtId).to_owned())
            .await?;
        manager
            .create_index(Index::create().name("idx_case_judge").table(CourtCase::Table).col(CourtCase::JudgeId).to_owned())
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_statement_case")
                    .table(CaseStatement::Table)
                    .col(CaseStatement::CaseId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in INDEXES {
            manager.drop_index(Index::drop().name(*name).to_owned()).await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum User { Table, RoleId }

#[derive(DeriveIden)]
enum OtpToken { Table, Email, Purpose }

#[derive(DeriveIden)]
enum PoliceOfficer { Table, StationId }

#[derive(DeriveIden)]
enum EmissionReport { Table, VehiclePlate, DeviceId }

#[derive(DeriveIden)]
enum Challan { Table, OfficerId, AccusedId, Status }

#[derive(DeriveIden)]
enum Fir { Table, StationId, FiledAt }

#[derive(DeriveIden)]
enum CourtCase { Table, CourtId, JudgeId }

#[derive(DeriveIden)]
enum CaseStatement { Table, CaseId }
