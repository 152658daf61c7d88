//! Read-by-key access shared by every workflow repository.

use async_trait::async_trait;
use uuid::Uuid;

use models::{
    accused, challan, court, court_case, emission_report, fir, iot_device, judge, police_officer, police_station, vehicle,
    violation,
};

use crate::errors::ServiceError;

#[async_trait]
pub trait RecordLookup: Send + Sync {
    async fn officer(&self, id: Uuid) -> Result<Option<police_officer::Model>, ServiceError>;
    async fn officer_by_user(&self, user_id: Uuid) -> Result<Option<police_officer::Model>, ServiceError>;
    async fn station(&self, id: Uuid) -> Result<Option<police_station::Model>, ServiceError>;
    async fn device(&self, id: Uuid) -> Result<Option<iot_device::Model>, ServiceError>;
    async fn violation(&self, id: Uuid) -> Result<Option<violation::Model>, ServiceError>;
    async fn court(&self, id: Uuid) -> Result<Option<court::Model>, ServiceError>;
    async fn judge(&self, id: Uuid) -> Result<Option<judge::Model>, ServiceError>;
    async fn judge_by_user(&self, user_id: Uuid) -> Result<Option<judge::Model>, ServiceError>;
    async fn accused(&self, id: Uuid) -> Result<Option<accused::Model>, ServiceError>;
    /// `cnic` must already be normalized.
    async fn accused_by_cnic(&self, cnic: &str) -> Result<Option<accused::Model>, ServiceError>;
    async fn vehicle(&self, id: Uuid) -> Result<Option<vehicle::Model>, ServiceError>;
    /// `plate` must already be normalized.
    async fn vehicle_by_plate(&self, plate: &str) -> Result<Option<vehicle::Model>, ServiceError>;
    async fn emission_report(&self, id: Uuid) -> Result<Option<emission_report::Model>, ServiceError>;
    async fn challan(&self, id: Uuid) -> Result<Option<challan::Model>, ServiceError>;
    async fn challan_for_report(&self, report_id: Uuid) -> Result<Option<challan::Model>, ServiceError>;
    async fn fir(&self, id: Uuid) -> Result<Option<fir::Model>, ServiceError>;
    async fn fir_for_challan(&self, challan_id: Uuid) -> Result<Option<fir::Model>, ServiceError>;
    async fn court_case(&self, id: Uuid) -> Result<Option<court_case::Model>, ServiceError>;
    async fn case_for_fir(&self, fir_id: Uuid) -> Result<Option<court_case::Model>, ServiceError>;
}

/// Turn a missing row into `NotFound`.
pub fn found<T>(row: Option<T>, entity: &str) -> Result<T, ServiceError> {
    row.ok_or_else(|| ServiceError::not_found(entity))
}
