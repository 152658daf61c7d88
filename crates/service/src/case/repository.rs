use async_trait::async_trait;
use uuid::Uuid;

use models::{case_statement, court_case, fir};

use super::domain::CaseFilter;
use crate::errors::ServiceError;
use crate::lookup::RecordLookup;
use crate::pagination::{Page, Pagination};

#[async_trait]
pub trait CaseRepository: RecordLookup {
    /// Cases opened during calendar `year` (UTC).
    async fn count_cases_in_year(&self, year: i32) -> Result<u64, ServiceError>;
    /// Insert the case and save the forwarded FIR in one transaction.
    async fn open_case(&self, case: court_case::Model, forwarded_fir: fir::Model) -> Result<court_case::Model, ServiceError>;
    async fn update_case(&self, row: court_case::Model) -> Result<court_case::Model, ServiceError>;
    async fn insert_statement(&self, row: case_statement::Model) -> Result<case_statement::Model, ServiceError>;
    /// Oldest first.
    async fn statements(&self, case_id: Uuid) -> Result<Vec<case_statement::Model>, ServiceError>;
    async fn list_cases(&self, filter: &CaseFilter, page: Pagination) -> Result<Page<court_case::Model>, ServiceError>;
}
