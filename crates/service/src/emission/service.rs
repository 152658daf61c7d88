use std::sync::Arc;

use chrono::{Duration, SubsecRound, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use models::emission_report;
use models::status::EmissionClassification;
use models::validation::{normalize_plate, FieldErrors};

use super::domain::{CreateEmissionReportInput, EmissionFilter};
use super::repository::EmissionRepository;
use crate::errors::ServiceError;
use crate::lookup::found;
use crate::pagination::{Page, Pagination};
use crate::verification::{check_emission_report, SignatureCheck};

/// Readings taken this far in the future are still accepted (device clock skew).
const CLOCK_SKEW_MINUTES: i64 = 5;
const MAX_GAS_LEVEL: f64 = 100_000.0;

#[derive(Clone, Debug)]
pub struct EmissionPolicy {
    pub noise_limit_db: f64,
}

impl From<&configs::EnforcementConfig> for EmissionPolicy {
    fn from(c: &configs::EnforcementConfig) -> Self { Self { noise_limit_db: c.noise_limit_db } }
}

impl Default for EmissionPolicy {
    fn default() -> Self { (&configs::EnforcementConfig::default()).into() }
}

pub struct EmissionService<R: EmissionRepository + ?Sized> {
    repo: Arc<R>,
    policy: EmissionPolicy,
}

impl<R: EmissionRepository + ?Sized> EmissionService<R> {
    pub fn new(repo: Arc<R>, policy: EmissionPolicy) -> Self { Self { repo, policy } }

    /// Record a signed reading on behalf of the officer linked to `user_id`.
    #[instrument(skip(self, input), fields(device_id = %input.device_id))]
    pub async fn create(&self, user_id: Uuid, input: CreateEmissionReportInput) -> Result<emission_report::Model, ServiceError> {
        let now = Utc::now().trunc_subsecs(0);
        let measured_at: DateTimeWithTimeZone = input.measured_at.map(|m| m.trunc_subsecs(0)).unwrap_or_else(|| now.into());

        let mut errs = FieldErrors::new();
        errs.plate("vehicle_plate", &input.vehicle_plate)
            .range("sound_level_db", input.sound_level_db, 0.0, 200.0);
        for (field, value) in [
            ("co_level", input.co_level),
            ("co2_level", input.co2_level),
            ("hc_level", input.hc_level),
            ("nox_level", input.nox_level),
        ] {
            if let Some(v) = value { errs.range(field, v, 0.0, MAX_GAS_LEVEL); }
        }
        let latest: DateTimeWithTimeZone = (now + Duration::minutes(CLOCK_SKEW_MINUTES)).into();
        if measured_at > latest {
            errs.push("measured_at", "measurement time is in the future");
        }
        errs.finish()?;

        let officer = self.repo.officer_by_user(user_id).await?
            .ok_or_else(|| ServiceError::Forbidden("only police officers can record emissions".into()))?;
        let device = found(self.repo.device(input.device_id).await?, "IoT device")?;
        if !device.usable_at(measured_at) {
            return Err(ServiceError::Validation("device is inactive or out of calibration".into()));
        }

        let mut row = emission_report::Model {
            id: Uuid::new_v4(),
            device_id: device.id,
            officer_id: Some(officer.id),
            vehicle_plate: normalize_plate(&input.vehicle_plate).unwrap_or_default(),
            sound_level_db: input.sound_level_db,
            co_level: input.co_level,
            co2_level: input.co2_level,
            hc_level: input.hc_level,
            nox_level: input.nox_level,
            classification: EmissionClassification::classify(input.sound_level_db, self.policy.noise_limit_db),
            measured_at,
            digital_signature: String::new(),
            created_at: now.into(),
        };
        row.digital_signature = row.compute_signature();
        let saved = self.repo.insert_report(row).await?;
        info!(report_id = %saved.id, classification = ?saved.classification, "emission_report_recorded");
        Ok(saved)
    }

    pub async fn get(&self, id: Uuid) -> Result<emission_report::Model, ServiceError> {
        found(self.repo.emission_report(id).await?, "emission report")
    }

    pub async fn list(&self, mut filter: EmissionFilter, page: Pagination) -> Result<Page<emission_report::Model>, ServiceError> {
        if let Some(plate) = filter.vehicle_plate.take() {
            let normalized = normalize_plate(&plate)
                .ok_or_else(|| ServiceError::field("vehicle_plate", "invalid plate number"))?;
            filter.vehicle_plate = Some(normalized);
        }
        self.repo.list_reports(&filter, page).await
    }

    /// Recompute the signature over the stored fields.
    pub async fn verify(&self, id: Uuid) -> Result<SignatureCheck, ServiceError> {
        let report = self.get(id).await?;
        let check = check_emission_report(&report);
        if !check.is_valid {
            warn!(report_id = %id, "emission_report_signature_mismatch");
        }
        Ok(check)
    }
}
