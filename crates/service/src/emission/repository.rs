use async_trait::async_trait;

use models::emission_report;

use super::domain::EmissionFilter;
use crate::errors::ServiceError;
use crate::lookup::RecordLookup;
use crate::pagination::{Page, Pagination};

#[async_trait]
pub trait EmissionRepository: RecordLookup {
    async fn insert_report(&self, row: emission_report::Model) -> Result<emission_report::Model, ServiceError>;
    /// Newest first. `filter.vehicle_plate` is already normalized.
    async fn list_reports(&self, filter: &EmissionFilter, page: Pagination) -> Result<Page<emission_report::Model>, ServiceError>;
}
