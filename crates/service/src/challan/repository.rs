use async_trait::async_trait;

use models::{accused, challan, vehicle};

use super::domain::ChallanFilter;
use crate::errors::ServiceError;
use crate::lookup::RecordLookup;
use crate::pagination::{Page, Pagination};

/// Rows produced by the issue cascade. Everything here is written in one
/// transaction or not at all.
#[derive(Debug, Clone)]
pub struct ChallanIssue {
    pub new_accused: Option<accused::Model>,
    pub new_vehicle: Option<vehicle::Model>,
    pub challan: challan::Model,
}

#[async_trait]
pub trait ChallanRepository: RecordLookup {
    async fn issue_challan(&self, issue: ChallanIssue) -> Result<challan::Model, ServiceError>;
    async fn update_challan(&self, row: challan::Model) -> Result<challan::Model, ServiceError>;
    /// Newest first. Plate and CNIC in `filter` are already normalized.
    async fn list_challans(&self, filter: &ChallanFilter, page: Pagination) -> Result<Page<challan::Model>, ServiceError>;
}
