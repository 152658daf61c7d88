use std::sync::Arc;

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use tracing::{info, instrument};

use models::status::OtpPurpose;
use models::validation::{normalize_cnic, normalize_email, FieldErrors};

use super::domain::{PublicStatus, RequestStatusOtpInput, StatusLookupInput};
use super::repository::PublicRepository;
use crate::challan::domain::ChallanView;
use crate::errors::ServiceError;
use crate::otp::{OtpIssued, OtpService};

pub struct PublicService<R: PublicRepository + ?Sized> {
    repo: Arc<R>,
    otp: Arc<OtpService>,
}

fn validated_cnic(cnic: &str, email: &str) -> Result<String, ServiceError> {
    let mut errs = FieldErrors::new();
    errs.cnic("cnic", cnic).email("email", email);
    errs.finish()?;
    normalize_cnic(cnic).ok_or_else(|| ServiceError::field("cnic", "invalid CNIC"))
}

impl<R: PublicRepository + ?Sized> PublicService<R> {
    pub fn new(repo: Arc<R>, otp: Arc<OtpService>) -> Self { Self { repo, otp } }

    /// Mail a lookup code bound to the CNIC. Succeeds whether or not the
    /// CNIC is on record or the address belongs to its holder.
    #[instrument(skip(self, input))]
    pub async fn request_status_otp(&self, input: RequestStatusOtpInput) -> Result<OtpIssued, ServiceError> {
        let cnic = validated_cnic(&input.cnic, &input.email)?;
        self.otp.issue(&input.email, Some(&cnic), OtpPurpose::StatusLookup).await
    }

    #[instrument(skip(self, input))]
    pub async fn status(&self, input: StatusLookupInput) -> Result<PublicStatus, ServiceError> {
        let cnic = validated_cnic(&input.cnic, &input.email)?;
        self.otp.verify(&input.email, Some(&cnic), OtpPurpose::StatusLookup, &input.otp).await?;

        // records are only disclosed to the address stored for the accused
        let requester = normalize_email(&input.email);
        let owner = self
            .repo
            .accused_by_cnic(&cnic)
            .await?
            .filter(|a| a.email.as_deref().map(normalize_email).as_deref() == Some(requester.as_str()));
        let Some(accused) = owner else {
            info!("public_status_empty");
            return Ok(PublicStatus { cnic, accused_name: None, challans: Vec::new(), firs: Vec::new(), cases: Vec::new() });
        };
        let now: DateTimeWithTimeZone = Utc::now().into();
        let challans = self.repo.challans_for_accused(accused.id).await?;
        let challan_ids: Vec<_> = challans.iter().map(|c| c.id).collect();
        let firs = self.repo.firs_for_challans(&challan_ids).await?;
        let fir_ids: Vec<_> = firs.iter().map(|f| f.id).collect();
        let cases = self.repo.cases_for_firs(&fir_ids).await?;
        info!(challans = challans.len(), firs = firs.len(), cases = cases.len(), "public_status_served");
        Ok(PublicStatus {
            cnic,
            accused_name: Some(accused.full_name),
            challans: challans.into_iter().map(|c| ChallanView::at(c, now)).collect(),
            firs,
            cases,
        })
    }
}
