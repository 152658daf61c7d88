use std::sync::Arc;

use chrono::{Datelike, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use tracing::{info, instrument};
use uuid::Uuid;

use models::fir;
use models::status::{ChallanStatus, FirStatus};
use models::validation::FieldErrors;

use super::domain::{CreateFirInput, FirFilter, UpdateFirInput};
use super::repository::FirRepository;
use crate::errors::ServiceError;
use crate::lookup::found;
use crate::pagination::{Page, Pagination};

pub struct FirService<R: FirRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: FirRepository + ?Sized> FirService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// File an FIR for a challan whose violation is cognizable. The FIR
    /// belongs to the filing officer's station.
    #[instrument(skip(self, input), fields(challan_id = %input.challan_id))]
    pub async fn create(&self, user_id: Uuid, input: CreateFirInput) -> Result<fir::Model, ServiceError> {
        let mut errs = FieldErrors::new();
        errs.required("description", &input.description);
        errs.finish()?;

        let officer = self.repo.officer_by_user(user_id).await?
            .ok_or_else(|| ServiceError::Forbidden("only police officers can file FIRs".into()))?;
        let challan = found(self.repo.challan(input.challan_id).await?, "challan")?;
        if challan.status == ChallanStatus::Cancelled {
            return Err(ServiceError::Validation("cannot file an FIR for a cancelled challan".into()));
        }
        let violation = found(self.repo.violation(challan.violation_id).await?, "violation")?;
        if !violation.is_cognizable {
            return Err(ServiceError::Validation(format!(
                "violation '{}' is not cognizable; an FIR cannot be filed",
                violation.violation_type
            )));
        }
        if self.repo.fir_for_challan(challan.id).await?.is_some() {
            return Err(ServiceError::Conflict("an FIR already exists for this challan".into()));
        }
        let station = found(self.repo.station(officer.station_id).await?, "police station")?;

        let now = Utc::now();
        let seq = self.repo.count_station_firs(station.id, now.year()).await? + 1;
        let now_tz: DateTimeWithTimeZone = now.into();
        let row = fir::Model {
            id: Uuid::new_v4(),
            fir_number: fir::format_number(&station.station_code, now.year(), seq),
            station_id: station.id,
            challan_id: challan.id,
            informant_officer_id: officer.id,
            description: input.description.trim().to_string(),
            investigation_report: None,
            status: FirStatus::Filed,
            filed_at: now_tz,
            updated_at: now_tz,
        };
        let saved = self.repo.insert_fir(row).await?;
        info!(fir_id = %saved.id, number = %saved.fir_number, "fir_filed");
        Ok(saved)
    }

    pub async fn get(&self, id: Uuid) -> Result<fir::Model, ServiceError> {
        found(self.repo.fir(id).await?, "FIR")
    }

    pub async fn list(&self, filter: FirFilter, page: Pagination) -> Result<Page<fir::Model>, ServiceError> {
        self.repo.list_firs(&filter, page).await
    }

    /// Move the investigation along or attach its report. Forwarding to
    /// court happens only through case creation.
    #[instrument(skip(self, input), fields(status = ?input.status))]
    pub async fn update(&self, id: Uuid, input: UpdateFirInput) -> Result<fir::Model, ServiceError> {
        let mut row = self.get(id).await?;
        if row.status == FirStatus::Closed {
            return Err(ServiceError::Validation("FIR is closed".into()));
        }
        if let Some(next) = input.status.filter(|s| *s != row.status) {
            if next == FirStatus::ForwardedToCourt {
                return Err(ServiceError::Validation("an FIR is forwarded to court by opening a case".into()));
            }
            if !row.status.can_transition_to(next) {
                return Err(ServiceError::Validation(format!("FIR cannot move from {:?} to {:?}", row.status, next)));
            }
            row.status = next;
        }
        if let Some(report) = input.investigation_report {
            row.investigation_report = Some(report.trim().to_string()).filter(|r| !r.is_empty());
        }
        row.updated_at = Utc::now().into();
        let saved = self.repo.update_fir(row).await?;
        info!(fir_id = %saved.id, status = ?saved.status, "fir_updated");
        Ok(saved)
    }
}
