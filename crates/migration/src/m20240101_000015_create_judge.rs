//! Create `judge` table with FKs to `user` and `court`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Judge::Table)
                    .if_not_exists()
                    .col(uuid(Judge::Id).primary_key())
                    .col(uuid(Judge::UserId).unique_key().not_null())
                    .col(uuid(Judge::CourtId).not_null())
                    .col(string_len(Judge::FullName, 128).not_null())
                    .col(string_len(Judge::Cnic, 15).unique_key().not_null())
                    .col(string_len(Judge::Designation, 64).not_null())
                    .col(boolean(Judge::IsActive).not_null())
                    .col(timestamp_with_time_zone(Judge::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_judge_user")
                            .from(Judge::Table, Judge::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_judge_court")
                            .from(Judge::Table, Judge::CourtId)
                            .to(Court::Table, Court::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Judge::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Judge { Table, Id, UserId, CourtId, FullName, Cnic, Designation, IsActive, CreatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum Court { Table, Id }
