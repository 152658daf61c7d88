//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_role;
mod m20240101_000002_create_user;
mod m20240101_000003_create_user_credentials;
mod m20240101_000004_create_otp_token;
mod m20240101_000005_create_police_station;
mod m20240101_000006_create_police_officer;
mod m20240101_000007_create_iot_device;
mod m20240101_000008_create_violation;
mod m20240101_000009_create_accused;
mod m20240101_000010_create_vehicle;
mod m20240101_000011_create_emission_report;
mod m20240101_000012_create_challan;
mod m20240101_000013_create_fir;
mod m20240101_000014_create_court;
mod m20240101_000015_create_judge;
mod m20240101_000016_create_court_case;
mod m20240101_000017_create_case_statement;
mod m20240101_000090_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_role::Migration),
            Box::new(m20240101_000002_create_user::Migration),
            Box::new(m20240101_000003_create_user_credentials::Migration),
            Box::new(m20240101_000004_create_otp_token::Migration),
            Box::new(m20240101_000005_create_police_station::Migration),
            Box::new(m20240101_000006_create_police_officer::Migration),
            Box::new(m20240101_000007_create_iot_device::Migration),
            Box::new(m20240101_000008_create_violation::Migration),
            Box::new(m20240101_000009_create_accused::Migration),
            Box::new(m20240101_000010_create_vehicle::Migration),
            Box::new(m20240101_000011_create_emission_report::Migration),
            Box::new(m20240101_000012_create_challan::Migration),
            Box::new(m20240101_000013_create_fir::Migration),
            Box::new(m20240101_000014_create_court::Migration),
            Box::new(m20240101_000015_create_judge::Migration),
            Box::new(m20240101_000016_create_court_case::Migration),
            Box::new(m20240101_000017_create_case_statement::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000090_add_indexes::Migration),
        ]
    }
}
