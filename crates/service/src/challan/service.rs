use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, SubsecRound, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use models::status::ChallanStatus;
use models::validation::{normalize_cnic, normalize_email, normalize_plate, FieldErrors};
use models::{accused, challan, police_officer, vehicle};

use super::domain::{
    AccusedInput, ChallanFilter, ChallanVerification, ChallanView, CreateChallanInput, UpdateChallanStatusInput,
    VehicleInput,
};
use super::repository::{ChallanIssue, ChallanRepository};
use crate::errors::ServiceError;
use crate::lookup::found;
use crate::pagination::{Page, Pagination};
use crate::verification::{check_challan, check_emission_report};

#[derive(Clone, Debug)]
pub struct ChallanPolicy {
    pub due_days: i64,
}

impl From<&configs::EnforcementConfig> for ChallanPolicy {
    fn from(c: &configs::EnforcementConfig) -> Self { Self { due_days: c.challan_due_days } }
}

impl Default for ChallanPolicy {
    fn default() -> Self { (&configs::EnforcementConfig::default()).into() }
}

/// `CH-YYYYMMDD-XXXXXX`, the suffix taken from the challan id.
pub fn format_challan_number(issued_at: DateTime<Utc>, id: Uuid) -> String {
    let suffix = id.simple().to_string()[..6].to_uppercase();
    format!("CH-{}-{}", issued_at.format("%Y%m%d"), suffix)
}

fn validate_vehicle_input(errs: &mut FieldErrors, v: &VehicleInput) {
    errs.plate("vehicle_input.plate_number", &v.plate_number);
    if let Some(year) = v.registration_year {
        let max = Utc::now().year() + 1;
        if !(1900..=max).contains(&year) {
            errs.push("vehicle_input.registration_year", format!("registration_year must be between 1900 and {max}"));
        }
    }
}

fn validate_accused_input(errs: &mut FieldErrors, a: &AccusedInput) {
    errs.required("accused_input.full_name", &a.full_name)
        .max_len("accused_input.full_name", &a.full_name, 128)
        .cnic("accused_input.cnic", &a.cnic);
    if let Some(email) = a.email.as_deref().filter(|e| !e.trim().is_empty()) {
        errs.email("accused_input.email", email);
    }
}

pub struct ChallanService<R: ChallanRepository + ?Sized> {
    repo: Arc<R>,
    policy: ChallanPolicy,
}

impl<R: ChallanRepository + ?Sized> ChallanService<R> {
    pub fn new(repo: Arc<R>, policy: ChallanPolicy) -> Self { Self { repo, policy } }

    /// Issue a challan, creating the vehicle and accused on the fly when
    /// they are described inline instead of referenced by id.
    #[instrument(skip(self, input), fields(violation_id = %input.violation_id))]
    pub async fn create(&self, user_id: Uuid, input: CreateChallanInput) -> Result<ChallanView, ServiceError> {
        let mut errs = FieldErrors::new();
        match (&input.vehicle_id, &input.vehicle_input) {
            (Some(_), _) => {}
            (None, Some(v)) => validate_vehicle_input(&mut errs, v),
            (None, None) => errs.push("vehicle_id", "either vehicle_id or vehicle_input is required"),
        }
        match (&input.accused_id, &input.accused_input) {
            (Some(_), _) => {}
            (None, Some(a)) => validate_accused_input(&mut errs, a),
            (None, None) => errs.push("accused_id", "either accused_id or accused_input is required"),
        }
        errs.finish()?;

        let officer = self.issuing_officer(user_id).await?;
        let violation = found(self.repo.violation(input.violation_id).await?, "violation")?;

        let now = Utc::now().trunc_subsecs(0);
        let now_tz: DateTimeWithTimeZone = now.into();

        let (accused_row, new_accused) = self.resolve_accused(&input, now_tz).await?;
        let (vehicle_row, new_vehicle) = self.resolve_vehicle(&input, accused_row.id, now_tz).await?;

        if let Some(report_id) = input.emission_report_id {
            let report = found(self.repo.emission_report(report_id).await?, "emission report")?;
            if report.vehicle_plate != vehicle_row.plate_number {
                return Err(ServiceError::field("emission_report_id", "emission report was recorded for a different vehicle"));
            }
            if !check_emission_report(&report).is_valid {
                warn!(report_id = %report.id, "emission_report_signature_mismatch");
                return Err(ServiceError::field("emission_report_id", "emission report failed its integrity check"));
            }
            if self.repo.challan_for_report(report_id).await?.is_some() {
                return Err(ServiceError::Conflict("emission report is already attached to a challan".into()));
            }
        }

        let id = Uuid::new_v4();
        let mut row = challan::Model {
            id,
            challan_number: format_challan_number(now, id),
            officer_id: officer.id,
            accused_id: accused_row.id,
            vehicle_id: vehicle_row.id,
            violation_id: violation.id,
            emission_report_id: input.emission_report_id,
            penalty_amount: violation.penalty_amount,
            location: input.location.clone(),
            evidence_path: input.evidence_path.clone(),
            status: ChallanStatus::Unpaid,
            issued_at: now_tz,
            due_date: (now + Duration::days(self.policy.due_days)).into(),
            paid_at: None,
            digital_signature: String::new(),
            created_at: now_tz,
            updated_at: now_tz,
        };
        row.digital_signature = row.compute_signature();

        let saved = self.repo.issue_challan(ChallanIssue { new_accused, new_vehicle, challan: row }).await?;
        info!(challan_id = %saved.id, number = %saved.challan_number, "challan_issued");
        Ok(ChallanView::at(saved, now_tz))
    }

    async fn issuing_officer(&self, user_id: Uuid) -> Result<police_officer::Model, ServiceError> {
        self.repo
            .officer_by_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::Forbidden("only police officers can issue challans".into()))
    }

    async fn resolve_accused(&self, input: &CreateChallanInput, now: DateTimeWithTimeZone) -> Result<(accused::Model, Option<accused::Model>), ServiceError> {
        if let Some(id) = input.accused_id {
            return Ok((found(self.repo.accused(id).await?, "accused")?, None));
        }
        let a = input.accused_input.as_ref().ok_or_else(|| ServiceError::field("accused_id", "either accused_id or accused_input is required"))?;
        let cnic = normalize_cnic(&a.cnic).ok_or_else(|| ServiceError::field("accused_input.cnic", "invalid CNIC"))?;
        if let Some(existing) = self.repo.accused_by_cnic(&cnic).await? {
            return Ok((existing, None));
        }
        let row = accused::Model {
            id: Uuid::new_v4(),
            full_name: a.full_name.trim().to_string(),
            cnic,
            address: a.address.clone(),
            contact_number: a.contact_number.clone(),
            email: a.email.as_deref().filter(|e| !e.trim().is_empty()).map(normalize_email),
            created_at: now,
        };
        Ok((row.clone(), Some(row)))
    }

    async fn resolve_vehicle(&self, input: &CreateChallanInput, owner_id: Uuid, now: DateTimeWithTimeZone) -> Result<(vehicle::Model, Option<vehicle::Model>), ServiceError> {
        if let Some(id) = input.vehicle_id {
            return Ok((found(self.repo.vehicle(id).await?, "vehicle")?, None));
        }
        let v = input.vehicle_input.as_ref().ok_or_else(|| ServiceError::field("vehicle_id", "either vehicle_id or vehicle_input is required"))?;
        let plate = normalize_plate(&v.plate_number).ok_or_else(|| ServiceError::field("vehicle_input.plate_number", "invalid plate number"))?;
        if let Some(existing) = self.repo.vehicle_by_plate(&plate).await? {
            return Ok((existing, None));
        }
        let row = vehicle::Model {
            id: Uuid::new_v4(),
            plate_number: plate,
            make: v.make.clone(),
            color: v.color.clone(),
            chassis_number: v.chassis_number.clone(),
            engine_number: v.engine_number.clone(),
            registration_year: v.registration_year,
            owner_id: Some(owner_id),
            created_at: now,
        };
        Ok((row.clone(), Some(row)))
    }

    pub async fn get(&self, id: Uuid) -> Result<ChallanView, ServiceError> {
        let row = found(self.repo.challan(id).await?, "challan")?;
        Ok(ChallanView::at(row, Utc::now().into()))
    }

    pub async fn list(&self, mut filter: ChallanFilter, page: Pagination) -> Result<Page<ChallanView>, ServiceError> {
        if let Some(plate) = filter.vehicle_plate.take() {
            filter.vehicle_plate = Some(normalize_plate(&plate).ok_or_else(|| ServiceError::field("vehicle_plate", "invalid plate number"))?);
        }
        if let Some(cnic) = filter.cnic.take() {
            filter.cnic = Some(normalize_cnic(&cnic).ok_or_else(|| ServiceError::field("cnic", "invalid CNIC"))?);
        }
        let now: DateTimeWithTimeZone = Utc::now().into();
        Ok(self.repo.list_challans(&filter, page).await?.map(|c| ChallanView::at(c, now)))
    }

    #[instrument(skip(self, input), fields(status = ?input.status))]
    pub async fn update_status(&self, id: Uuid, input: UpdateChallanStatusInput) -> Result<ChallanView, ServiceError> {
        let mut row = found(self.repo.challan(id).await?, "challan")?;
        if !row.status.can_transition_to(input.status) {
            return Err(ServiceError::Validation(format!(
                "challan cannot move from {:?} to {:?}",
                row.status, input.status
            )));
        }
        let now: DateTimeWithTimeZone = Utc::now().into();
        row.status = input.status;
        if input.status == ChallanStatus::Paid {
            row.paid_at = Some(now);
        }
        row.updated_at = now;
        let saved = self.repo.update_challan(row).await?;
        info!(challan_id = %saved.id, status = ?saved.status, "challan_status_changed");
        Ok(ChallanView::at(saved, now))
    }

    /// Recompute the challan signature and, when attached, the emission
    /// report's.
    pub async fn verify(&self, id: Uuid) -> Result<ChallanVerification, ServiceError> {
        let row = found(self.repo.challan(id).await?, "challan")?;
        let challan = check_challan(&row);
        let emission_report = match row.emission_report_id {
            Some(report_id) => self.repo.emission_report(report_id).await?.map(|r| check_emission_report(&r)),
            None => None,
        };
        let is_valid = challan.is_valid && emission_report.as_ref().map_or(true, |r| r.is_valid);
        if !is_valid {
            warn!(challan_id = %id, "challan_signature_mismatch");
        }
        Ok(ChallanVerification { challan, emission_report, is_valid })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challan::domain::{AccusedInput, VehicleInput};
    use crate::emission::{EmissionPolicy, EmissionService};
    use crate::lookup::RecordLookup;
    use crate::repo::memory::InMemoryRepository;
    use crate::test_support::fixtures::{self, Seeded};

    fn setup() -> (ChallanService<InMemoryRepository>, Arc<InMemoryRepository>, Seeded) {
        let repo = Arc::new(InMemoryRepository::default());
        let seeded = fixtures::seed(&repo);
        (ChallanService::new(repo.clone(), ChallanPolicy::default()), repo, seeded)
    }

    fn inline(s: &Seeded, plate: &str, cnic: &str) -> CreateChallanInput {
        CreateChallanInput {
            violation_id: s.violation_id,
            vehicle_id: None,
            vehicle_input: Some(VehicleInput {
                plate_number: plate.into(),
                make: Some("Suzuki".into()),
                color: None,
                chassis_number: None,
                engine_number: None,
                registration_year: Some(2015),
            }),
            accused_id: None,
            accused_input: Some(AccusedInput {
                full_name: "Bilal Ahmed".into(),
                cnic: cnic.into(),
                address: None,
                contact_number: None,
                email: Some("Bilal@Example.com".into()),
            }),
            emission_report_id: None,
            location: Some("Mall Road".into()),
            evidence_path: None,
        }
    }

    #[test]
    fn challan_number_format() {
        let at = chrono::TimeZone::with_ymd_and_hms(&Utc, 2024, 3, 9, 10, 0, 0).unwrap();
        let id = Uuid::parse_str("abcdef12-0000-0000-0000-000000000000").unwrap();
        assert_eq!(format_challan_number(at, id), "CH-20240309-ABCDEF");
    }

    #[tokio::test]
    async fn missing_vehicle_and_accused_is_a_validation_error() {
        let (svc, _, s) = setup();
        let mut input = inline(&s, "LEA-1", "3520212345671");
        input.vehicle_input = None;
        input.accused_input = None;
        match svc.create(s.officer_user_id, input).await {
            Err(ServiceError::Fields(errs)) => {
                assert!(errs.iter().any(|e| e.field == "vehicle_id"));
                assert!(errs.iter().any(|e| e.field == "accused_id"));
            }
            other => panic!("expected field errors, got {:?}", other.map(|c| c.challan.id)),
        }
    }

    #[tokio::test]
    async fn cascade_creates_then_reuses_vehicle_and_accused() {
        let (svc, repo, s) = setup();
        let first = svc.create(s.officer_user_id, inline(&s, "lea 1234", "35202-1234567-1")).await.unwrap();
        let c = &first.challan;
        assert!(c.challan_number.starts_with("CH-"));
        assert_eq!(c.penalty_amount, fixtures::PENALTY);
        assert_eq!(c.status, ChallanStatus::Unpaid);
        assert!(!first.is_overdue);
        assert_eq!(c.due_date - c.issued_at, Duration::days(14));

        let vehicle = repo.vehicle(c.vehicle_id).await.unwrap().unwrap();
        assert_eq!(vehicle.plate_number, "LEA-1234");
        assert_eq!(vehicle.owner_id, Some(c.accused_id));
        let accused = repo.accused(c.accused_id).await.unwrap().unwrap();
        assert_eq!(accused.email.as_deref(), Some("bilal@example.com"));

        let second = svc.create(s.officer_user_id, inline(&s, "LEA-1234", "3520212345671")).await.unwrap();
        assert_eq!(second.challan.vehicle_id, c.vehicle_id);
        assert_eq!(second.challan.accused_id, c.accused_id);
        assert_eq!(repo.vehicle_count(), 1);
        assert_eq!(repo.accused_count(), 1);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let (svc, _, s) = setup();
        let mut input = inline(&s, "LEA-2", "3520212345672");
        input.vehicle_id = Some(Uuid::new_v4());
        assert!(matches!(svc.create(s.officer_user_id, input).await, Err(ServiceError::NotFound(_))));

        let mut input = inline(&s, "LEA-2", "3520212345672");
        input.violation_id = Uuid::new_v4();
        assert!(matches!(svc.create(s.officer_user_id, input).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn emission_report_rules() {
        let (svc, repo, s) = setup();
        let emissions = EmissionService::new(repo.clone(), EmissionPolicy::default());
        let report = emissions.create(s.officer_user_id, fixtures::reading(s.device_id, "LEB-77", 99.0)).await.unwrap();

        let mut wrong_plate = inline(&s, "LEB-78", "3520212345673");
        wrong_plate.emission_report_id = Some(report.id);
        assert!(matches!(svc.create(s.officer_user_id, wrong_plate).await, Err(ServiceError::Fields(_))));

        let mut ok = inline(&s, "LEB-77", "3520212345673");
        ok.emission_report_id = Some(report.id);
        let issued = svc.create(s.officer_user_id, ok.clone()).await.unwrap();
        assert_eq!(issued.challan.emission_report_id, Some(report.id));

        let reused = svc.create(s.officer_user_id, ok).await;
        assert!(matches!(reused, Err(ServiceError::Conflict(_))));

        let verification = svc.verify(issued.challan.id).await.unwrap();
        assert!(verification.is_valid);
        assert!(verification.emission_report.unwrap().is_valid);
    }

    #[tokio::test]
    async fn tampered_emission_report_cannot_back_a_challan() {
        let (svc, repo, s) = setup();
        let emissions = EmissionService::new(repo.clone(), EmissionPolicy::default());
        let report = emissions.create(s.officer_user_id, fixtures::reading(s.device_id, "LEC-1", 99.0)).await.unwrap();
        repo.tamper_report(report.id, |r| r.sound_level_db = 50.0);

        let mut input = inline(&s, "LEC-1", "3520212345674");
        input.emission_report_id = Some(report.id);
        assert!(matches!(svc.create(s.officer_user_id, input).await, Err(ServiceError::Fields(_))));
    }

    #[tokio::test]
    async fn failed_cascade_writes_nothing() {
        let (svc, repo, s) = setup();
        repo.fail_next_write();
        let res = svc.create(s.officer_user_id, inline(&s, "LED-9", "3520212345675")).await;
        assert!(matches!(res, Err(ServiceError::Db(_))));
        assert_eq!(repo.vehicle_count(), 0);
        assert_eq!(repo.accused_count(), 0);
    }

    #[tokio::test]
    async fn status_transitions_and_paid_stamp() {
        let (svc, _, s) = setup();
        let c = svc.create(s.officer_user_id, inline(&s, "LEE-1", "3520212345676")).await.unwrap().challan;

        let disputed = svc.update_status(c.id, UpdateChallanStatusInput { status: ChallanStatus::Disputed }).await.unwrap();
        assert_eq!(disputed.challan.status, ChallanStatus::Disputed);
        let paid = svc.update_status(c.id, UpdateChallanStatusInput { status: ChallanStatus::Paid }).await.unwrap();
        assert!(paid.challan.paid_at.is_some());
        let reopen = svc.update_status(c.id, UpdateChallanStatusInput { status: ChallanStatus::Unpaid }).await;
        assert!(matches!(reopen, Err(ServiceError::Validation(_))));
        assert!(svc.verify(c.id).await.unwrap().is_valid);
    }

    #[tokio::test]
    async fn overdue_is_derived_and_list_filters_apply() {
        let (svc, repo, s) = setup();
        let c = svc.create(s.officer_user_id, inline(&s, "LEF-1", "3520212345677")).await.unwrap().challan;
        svc.create(s.officer_user_id, inline(&s, "LEF-2", "3520212345678")).await.unwrap();
        repo.tamper_challan(c.id, |row| row.due_date = (Utc::now() - Duration::days(1)).into());
        assert!(svc.get(c.id).await.unwrap().is_overdue);
        // due date is not covered by the signature
        assert!(svc.verify(c.id).await.unwrap().is_valid);

        let by_plate = svc.list(ChallanFilter { vehicle_plate: Some("lef 1".into()), ..Default::default() }, Pagination::default()).await.unwrap();
        assert_eq!(by_plate.total, 1);
        assert!(by_plate.items[0].is_overdue);

        let by_cnic = svc.list(ChallanFilter { cnic: Some("3520212345678".into()), ..Default::default() }, Pagination::default()).await.unwrap();
        assert_eq!(by_cnic.total, 1);

        let by_station = svc.list(ChallanFilter { station_id: Some(s.station_id), ..Default::default() }, Pagination::default()).await.unwrap();
        assert_eq!(by_station.total, 2);
        let other_station = svc.list(ChallanFilter { station_id: Some(Uuid::new_v4()), ..Default::default() }, Pagination::default()).await.unwrap();
        assert_eq!(other_station.total, 0);
    }

    #[tokio::test]
    async fn non_officer_cannot_issue() {
        let (svc, _, s) = setup();
        let res = svc.create(Uuid::new_v4(), inline(&s, "LEG-1", "3520212345679")).await;
        assert!(matches!(res, Err(ServiceError::Forbidden(_))));
    }
}
