use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use models::role::RoleName;
use models::validation::normalize_email;
use models::{court, iot_device, judge, police_officer, police_station, violation};

use crate::auth::domain::{Credentials, NewAccount};
use crate::auth::password::{hash_password, PASSWORD_ALGORITHM};
use crate::directory::repository::DirectoryRepository;
use crate::errors::ServiceError;
use crate::lookup::found;
use crate::pagination::{Page, Pagination};

/// CRUD with validation for the reference data every workflow depends on.
pub struct DirectoryService<R: DirectoryRepository + ?Sized> {
    repo: Arc<R>,
}

fn gone(deleted: bool, entity: &str) -> Result<(), ServiceError> {
    if deleted { Ok(()) } else { Err(ServiceError::not_found(entity)) }
}

impl<R: DirectoryRepository + ?Sized> DirectoryService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    // stations

    #[instrument(skip(self, input), fields(code = %input.station_code))]
    pub async fn create_station(&self, input: police_station::NewPoliceStation) -> Result<police_station::Model, ServiceError> {
        let row = police_station::build(Uuid::new_v4(), &input)?;
        let created = self.repo.insert_station(row).await?;
        info!(station_id = %created.id, "station_created");
        Ok(created)
    }

    pub async fn get_station(&self, id: Uuid) -> Result<police_station::Model, ServiceError> {
        found(self.repo.station(id).await?, "police station")
    }

    pub async fn update_station(&self, id: Uuid, input: police_station::UpdatePoliceStation) -> Result<police_station::Model, ServiceError> {
        let mut row = self.get_station(id).await?;
        police_station::apply_update(&mut row, &input)?;
        self.repo.update_station(row).await
    }

    pub async fn delete_station(&self, id: Uuid) -> Result<(), ServiceError> {
        gone(self.repo.delete_station(id).await?, "police station")
    }

    pub async fn list_stations(&self, page: Pagination) -> Result<Page<police_station::Model>, ServiceError> {
        self.repo.list_stations(page).await
    }

    // officers

    /// Create the officer profile and its login account together.
    #[instrument(skip(self, input), fields(badge = %input.badge_number))]
    pub async fn create_officer(&self, input: police_officer::NewPoliceOfficer) -> Result<police_officer::Model, ServiceError> {
        let user_id = Uuid::new_v4();
        let row = police_officer::build(Uuid::new_v4(), user_id, &input)?;
        found(self.repo.station(input.station_id).await?, "police station")?;
        let account = NewAccount {
            id: user_id,
            username: input.username.trim().to_string(),
            email: normalize_email(&input.email),
            full_name: input.full_name.clone(),
            role: input.role.unwrap_or(RoleName::Officer),
        };
        let credentials = Credentials {
            user_id,
            password_hash: hash_password(&input.password)?,
            password_algorithm: PASSWORD_ALGORITHM.into(),
        };
        let created = self.repo.insert_officer(account, credentials, row).await?;
        info!(officer_id = %created.id, user_id = %created.user_id, "officer_created");
        Ok(created)
    }

    pub async fn get_officer(&self, id: Uuid) -> Result<police_officer::Model, ServiceError> {
        found(self.repo.officer(id).await?, "police officer")
    }

    pub async fn update_officer(&self, id: Uuid, input: police_officer::UpdatePoliceOfficer) -> Result<police_officer::Model, ServiceError> {
        let mut row = self.get_officer(id).await?;
        if let Some(station_id) = input.station_id {
            found(self.repo.station(station_id).await?, "police station")?;
        }
        police_officer::apply_update(&mut row, &input)?;
        self.repo.update_officer(row).await
    }

    pub async fn delete_officer(&self, id: Uuid) -> Result<(), ServiceError> {
        gone(self.repo.delete_officer(id).await?, "police officer")
    }

    pub async fn list_officers(&self, station_id: Option<Uuid>, page: Pagination) -> Result<Page<police_officer::Model>, ServiceError> {
        self.repo.list_officers(station_id, page).await
    }

    // devices

    #[instrument(skip(self, input), fields(serial = %input.serial_number))]
    pub async fn create_device(&self, input: iot_device::NewIotDevice) -> Result<iot_device::Model, ServiceError> {
        let row = iot_device::build(Uuid::new_v4(), &input)?;
        if let Some(station_id) = row.station_id {
            found(self.repo.station(station_id).await?, "police station")?;
        }
        let created = self.repo.insert_device(row).await?;
        info!(device_id = %created.id, "device_registered");
        Ok(created)
    }

    pub async fn get_device(&self, id: Uuid) -> Result<iot_device::Model, ServiceError> {
        found(self.repo.device(id).await?, "IoT device")
    }

    pub async fn update_device(&self, id: Uuid, input: iot_device::UpdateIotDevice) -> Result<iot_device::Model, ServiceError> {
        let mut row = self.get_device(id).await?;
        if let Some(station_id) = input.station_id {
            found(self.repo.station(station_id).await?, "police station")?;
        }
        iot_device::apply_update(&mut row, &input)?;
        self.repo.update_device(row).await
    }

    pub async fn delete_device(&self, id: Uuid) -> Result<(), ServiceError> {
        gone(self.repo.delete_device(id).await?, "IoT device")
    }

    pub async fn list_devices(&self, station_id: Option<Uuid>, page: Pagination) -> Result<Page<iot_device::Model>, ServiceError> {
        self.repo.list_devices(station_id, page).await
    }

    // violations

    pub async fn create_violation(&self, input: violation::NewViolation) -> Result<violation::Model, ServiceError> {
        let row = violation::build(Uuid::new_v4(), &input)?;
        self.repo.insert_violation(row).await
    }

    pub async fn get_violation(&self, id: Uuid) -> Result<violation::Model, ServiceError> {
        found(self.repo.violation(id).await?, "violation")
    }

    pub async fn update_violation(&self, id: Uuid, input: violation::UpdateViolation) -> Result<violation::Model, ServiceError> {
        let mut row = self.get_violation(id).await?;
        violation::apply_update(&mut row, &input)?;
        self.repo.update_violation(row).await
    }

    pub async fn delete_violation(&self, id: Uuid) -> Result<(), ServiceError> {
        gone(self.repo.delete_violation(id).await?, "violation")
    }

    pub async fn list_violations(&self, page: Pagination) -> Result<Page<violation::Model>, ServiceError> {
        self.repo.list_violations(page).await
    }

    // courts

    pub async fn create_court(&self, input: court::NewCourt) -> Result<court::Model, ServiceError> {
        let row = court::build(Uuid::new_v4(), &input)?;
        self.repo.insert_court(row).await
    }

    pub async fn get_court(&self, id: Uuid) -> Result<court::Model, ServiceError> {
        found(self.repo.court(id).await?, "court")
    }

    pub async fn update_court(&self, id: Uuid, input: court::UpdateCourt) -> Result<court::Model, ServiceError> {
        let mut row = self.get_court(id).await?;
        court::apply_update(&mut row, &input)?;
        self.repo.update_court(row).await
    }

    pub async fn delete_court(&self, id: Uuid) -> Result<(), ServiceError> {
        gone(self.repo.delete_court(id).await?, "court")
    }

    pub async fn list_courts(&self, page: Pagination) -> Result<Page<court::Model>, ServiceError> {
        self.repo.list_courts(page).await
    }

    // judges

    /// Create the judge profile and its login account together.
    #[instrument(skip(self, input), fields(court_id = %input.court_id))]
    pub async fn create_judge(&self, input: judge::NewJudge) -> Result<judge::Model, ServiceError> {
        let user_id = Uuid::new_v4();
        let row = judge::build(Uuid::new_v4(), user_id, &input)?;
        found(self.repo.court(input.court_id).await?, "court")?;
        let account = NewAccount {
            id: user_id,
            username: input.username.trim().to_string(),
            email: normalize_email(&input.email),
            full_name: input.full_name.clone(),
            role: RoleName::Judge,
        };
        let credentials = Credentials {
            user_id,
            password_hash: hash_password(&input.password)?,
            password_algorithm: PASSWORD_ALGORITHM.into(),
        };
        let created = self.repo.insert_judge(account, credentials, row).await?;
        info!(judge_id = %created.id, "judge_created");
        Ok(created)
    }

    pub async fn get_judge(&self, id: Uuid) -> Result<judge::Model, ServiceError> {
        found(self.repo.judge(id).await?, "judge")
    }

    pub async fn update_judge(&self, id: Uuid, input: judge::UpdateJudge) -> Result<judge::Model, ServiceError> {
        let mut row = self.get_judge(id).await?;
        if let Some(court_id) = input.court_id {
            found(self.repo.court(court_id).await?, "court")?;
        }
        judge::apply_update(&mut row, &input)?;
        self.repo.update_judge(row).await
    }

    pub async fn delete_judge(&self, id: Uuid) -> Result<(), ServiceError> {
        gone(self.repo.delete_judge(id).await?, "judge")
    }

    pub async fn list_judges(&self, court_id: Option<Uuid>, page: Pagination) -> Result<Page<judge::Model>, ServiceError> {
        self.repo.list_judges(court_id, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::memory::InMemoryRepository;
    use crate::test_support::fixtures;

    fn svc() -> (DirectoryService<InMemoryRepository>, Arc<InMemoryRepository>) {
        let repo = Arc::new(InMemoryRepository::default());
        (DirectoryService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn station_code_is_uppercased_and_unique() {
        let (svc, _) = svc();
        let s = svc.create_station(fixtures::new_station("lhr-01")).await.unwrap();
        assert_eq!(s.station_code, "LHR-01");
        let dup = svc.create_station(fixtures::new_station("LHR-01")).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn officer_requires_existing_station_and_creates_account() {
        let (svc, repo) = svc();
        let missing = svc.create_officer(fixtures::new_officer(Uuid::new_v4(), "ghost")).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));

        let station = svc.create_station(fixtures::new_station("LHR-02")).await.unwrap();
        let officer = svc.create_officer(fixtures::new_officer(station.id, "asi.khan")).await.unwrap();
        assert_eq!(officer.station_id, station.id);
        assert_eq!(repo.account_role(officer.user_id), Some(RoleName::Officer));

        let moved = svc
            .update_officer(officer.id, police_officer::UpdatePoliceOfficer { rank: Some("SI".into()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(moved.rank, "SI");

        svc.delete_officer(officer.id).await.unwrap();
        assert_eq!(repo.account_role(officer.user_id), None);
        assert!(matches!(svc.get_officer(officer.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn invalid_officer_reports_field_errors() {
        let (svc, _) = svc();
        let station = svc.create_station(fixtures::new_station("LHR-03")).await.unwrap();
        let mut input = fixtures::new_officer(station.id, "bad");
        input.cnic = "123".into();
        input.password = "short".into();
        input.role = Some(RoleName::Judge);
        match svc.create_officer(input).await {
            Err(ServiceError::Fields(errs)) => {
                let fields: Vec<_> = errs.iter().map(|e| e.field.as_str()).collect();
                assert!(fields.contains(&"cnic"));
                assert!(fields.contains(&"password"));
                assert!(fields.contains(&"role"));
            }
            other => panic!("expected field errors, got {:?}", other.map(|o| o.id)),
        }
    }

    #[tokio::test]
    async fn station_in_use_cannot_be_deleted() {
        let (svc, _) = svc();
        let station = svc.create_station(fixtures::new_station("LHR-04")).await.unwrap();
        svc.create_officer(fixtures::new_officer(station.id, "busy")).await.unwrap();
        assert!(matches!(svc.delete_station(station.id).await, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn judge_crud_with_court_checks() {
        let (svc, repo) = svc();
        let court = svc.create_court(fixtures::new_court()).await.unwrap();
        let judge = svc.create_judge(fixtures::new_judge(court.id, "judge.ali")).await.unwrap();
        assert!(judge.is_active);
        assert_eq!(repo.account_role(judge.user_id), Some(RoleName::Judge));

        let bad_move = svc.update_judge(judge.id, judge::UpdateJudge { court_id: Some(Uuid::new_v4()), ..Default::default() }).await;
        assert!(matches!(bad_move, Err(ServiceError::NotFound(_))));

        let listed = svc.list_judges(Some(court.id), Pagination::default()).await.unwrap();
        assert_eq!(listed.total, 1);
        assert_eq!(svc.list_judges(Some(Uuid::new_v4()), Pagination::default()).await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn violation_update_and_delete() {
        let (svc, _) = svc();
        let v = svc.create_violation(fixtures::new_violation("Pressure horn", false)).await.unwrap();
        let updated = svc
            .update_violation(v.id, violation::UpdateViolation { penalty_amount: Some(5000), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(updated.penalty_amount, 5000);
        let bad = svc.update_violation(v.id, violation::UpdateViolation { penalty_amount: Some(0), ..Default::default() }).await;
        assert!(matches!(bad, Err(ServiceError::Fields(_))));
        svc.delete_violation(v.id).await.unwrap();
        assert!(matches!(svc.delete_violation(v.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn device_list_filters_by_station() {
        let (svc, _) = svc();
        let station = svc.create_station(fixtures::new_station("LHR-05")).await.unwrap();
        svc.create_device(fixtures::new_device(Some(station.id), "sn-1")).await.unwrap();
        svc.create_device(fixtures::new_device(None, "sn-2")).await.unwrap();
        assert_eq!(svc.list_devices(Some(station.id), Pagination::default()).await.unwrap().total, 1);
        assert_eq!(svc.list_devices(None, Pagination::default()).await.unwrap().total, 2);
    }
}
