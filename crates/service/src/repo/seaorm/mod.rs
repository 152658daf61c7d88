//! PostgreSQL-backed repositories.
//!
//! A single `SeaOrmRepository` implements every workflow trait; each
//! submodule holds the impl for one aggregate. Rows are built and validated
//! by the services, so writes here persist the model as-is.

mod case;
mod challan;
mod directory;
mod emission;
mod fir;
mod otp;
mod public;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Select};
use uuid::Uuid;

use models::{
    accused, challan as challan_entity, court, court_case, emission_report, fir as fir_entity, iot_device, judge,
    police_officer, police_station, vehicle, violation,
};

use crate::errors::ServiceError;
use crate::lookup::RecordLookup;
use crate::pagination::{Page, Pagination};

#[derive(Clone)]
pub struct SeaOrmRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

/// Run a paginated select and count in one go.
async fn paged<E>(db: &DatabaseConnection, select: Select<E>, page: Pagination) -> Result<Page<E::Model>, ServiceError>
where
    E: EntityTrait,
    E::Model: Send + Sync + 'static,
{
    let (idx, per_page) = page.normalize();
    let paginator = select.paginate(db, per_page);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(idx).await?;
    Ok(Page::new(items, page, total))
}

/// `[Jan 1 of year, Jan 1 of year + 1)` in UTC.
fn year_bounds(year: i32) -> Result<(DateTimeWithTimeZone, DateTimeWithTimeZone), ServiceError> {
    let start = Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single();
    let end = Utc.with_ymd_and_hms(year + 1, 1, 1, 0, 0, 0).single();
    match (start, end) {
        (Some(s), Some(e)) => Ok((s.into(), e.into())),
        _ => Err(ServiceError::Validation(format!("year {year} out of range"))),
    }
}

#[async_trait]
impl RecordLookup for SeaOrmRepository {
    async fn officer(&self, id: Uuid) -> Result<Option<police_officer::Model>, ServiceError> {
        Ok(police_officer::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn officer_by_user(&self, user_id: Uuid) -> Result<Option<police_officer::Model>, ServiceError> {
        Ok(police_officer::Entity::find()
            .filter(police_officer::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?)
    }

    async fn station(&self, id: Uuid) -> Result<Option<police_station::Model>, ServiceError> {
        Ok(police_station::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn device(&self, id: Uuid) -> Result<Option<iot_device::Model>, ServiceError> {
        Ok(iot_device::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn violation(&self, id: Uuid) -> Result<Option<violation::Model>, ServiceError> {
        Ok(violation::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn court(&self, id: Uuid) -> Result<Option<court::Model>, ServiceError> {
        Ok(court::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn judge(&self, id: Uuid) -> Result<Option<judge::Model>, ServiceError> {
        Ok(judge::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn judge_by_user(&self, user_id: Uuid) -> Result<Option<judge::Model>, ServiceError> {
        Ok(judge::Entity::find().filter(judge::Column::UserId.eq(user_id)).one(&self.db).await?)
    }

    async fn accused(&self, id: Uuid) -> Result<Option<accused::Model>, ServiceError> {
        Ok(accused::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn accused_by_cnic(&self, cnic: &str) -> Result<Option<accused::Model>, ServiceError> {
        Ok(accused::find_by_cnic(&self.db, cnic).await?)
    }

    async fn vehicle(&self, id: Uuid) -> Result<Option<vehicle::Model>, ServiceError> {
        Ok(vehicle::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn vehicle_by_plate(&self, plate: &str) -> Result<Option<vehicle::Model>, ServiceError> {
        Ok(vehicle::find_by_plate(&self.db, plate).await?)
    }

    async fn emission_report(&self, id: Uuid) -> Result<Option<emission_report::Model>, ServiceError> {
        Ok(emission_report::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn challan(&self, id: Uuid) -> Result<Option<challan_entity::Model>, ServiceError> {
        Ok(challan_entity::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn challan_for_report(&self, report_id: Uuid) -> Result<Option<challan_entity::Model>, ServiceError> {
        Ok(challan_entity::Entity::find()
            .filter(challan_entity::Column::EmissionReportId.eq(report_id))
            .one(&self.db)
            .await?)
    }

    async fn fir(&self, id: Uuid) -> Result<Option<fir_entity::Model>, ServiceError> {
        Ok(fir_entity::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn fir_for_challan(&self, challan_id: Uuid) -> Result<Option<fir_entity::Model>, ServiceError> {
        Ok(fir_entity::Entity::find()
            .filter(fir_entity::Column::ChallanId.eq(challan_id))
            .one(&self.db)
            .await?)
    }

    async fn court_case(&self, id: Uuid) -> Result<Option<court_case::Model>, ServiceError> {
        Ok(court_case::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn case_for_fir(&self, fir_id: Uuid) -> Result<Option<court_case::Model>, ServiceError> {
        Ok(court_case::Entity::find().filter(court_case::Column::FirId.eq(fir_id)).one(&self.db).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::directory::{DirectoryRepository, DirectoryService};
    use crate::mailer::RecordingMailer;
    use crate::otp::{code_from_body, OtpPolicy, OtpService};
    use crate::test_support::{fixtures, get_db};
    use models::status::OtpPurpose;
    use models::user;

    fn unique(prefix: &str) -> String {
        format!("{}{}", prefix, &Uuid::new_v4().simple().to_string()[..8])
    }

    #[tokio::test]
    async fn officer_round_trip_and_account_cleanup() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let repo = Arc::new(SeaOrmRepository::new(db.clone()));
        let svc = DirectoryService::new(repo.clone());

        let station = svc.create_station(fixtures::new_station(&unique("T"))).await?;
        let username = unique("officer.");
        let mut input = fixtures::new_officer(station.id, &username);
        input.badge_number = unique("B");
        input.cnic = format!("{:013}", Uuid::new_v4().as_u128() % 10_000_000_000_000);
        let officer = svc.create_officer(input).await?;
        assert_eq!(repo.officer_by_user(officer.user_id).await?.map(|o| o.id), Some(officer.id));

        let listed = repo.list_officers(Some(station.id), Pagination::default()).await?;
        assert_eq!(listed.total, 1);

        // station is restricted while an officer belongs to it
        assert!(matches!(svc.delete_station(station.id).await, Err(ServiceError::Conflict(_))));

        svc.delete_officer(officer.id).await?;
        assert!(user::Entity::find_by_id(officer.user_id).one(&db).await?.is_none());
        svc.delete_station(station.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn otp_reissue_consumes_previous_rows() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let repo = Arc::new(SeaOrmRepository::new(db));
        let mailer = Arc::new(RecordingMailer::default());
        let otp = OtpService::new(repo.clone(), mailer.clone(), OtpPolicy::default());
        let email = format!("{}@example.com", unique("otp"));

        otp.issue(&email, None, OtpPurpose::PasswordReset).await?;
        let first = code_from_body(&mailer.last_body_for(&email).unwrap_or_default());
        otp.issue(&email, None, OtpPurpose::PasswordReset).await?;
        let second = code_from_body(&mailer.last_body_for(&email).unwrap_or_default());

        if first != second {
            assert!(otp.verify(&email, None, OtpPurpose::PasswordReset, &first).await.is_err());
        }
        otp.verify(&email, None, OtpPurpose::PasswordReset, &second).await?;
        Ok(())
    }
}
