use async_trait::async_trait;
use uuid::Uuid;

use models::fir;

use super::domain::FirFilter;
use crate::errors::ServiceError;
use crate::lookup::RecordLookup;
use crate::pagination::{Page, Pagination};

#[async_trait]
pub trait FirRepository: RecordLookup {
    /// FIRs already filed by `station_id` during calendar `year` (UTC).
    async fn count_station_firs(&self, station_id: Uuid, year: i32) -> Result<u64, ServiceError>;
    async fn insert_fir(&self, row: fir::Model) -> Result<fir::Model, ServiceError>;
    async fn update_fir(&self, row: fir::Model) -> Result<fir::Model, ServiceError>;
    async fn list_firs(&self, filter: &FirFilter, page: Pagination) -> Result<Page<fir::Model>, ServiceError>;
}
