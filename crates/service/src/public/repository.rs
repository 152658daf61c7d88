use async_trait::async_trait;
use uuid::Uuid;

use models::{challan, court_case, fir};

use crate::errors::ServiceError;
use crate::lookup::RecordLookup;

#[async_trait]
pub trait PublicRepository: RecordLookup {
    /// Newest first.
    async fn challans_for_accused(&self, accused_id: Uuid) -> Result<Vec<challan::Model>, ServiceError>;
    async fn firs_for_challans(&self, challan_ids: &[Uuid]) -> Result<Vec<fir::Model>, ServiceError>;
    async fn cases_for_firs(&self, fir_ids: &[Uuid]) -> Result<Vec<court_case::Model>, ServiceError>;
}
