use async_trait::async_trait;
use uuid::Uuid;

use models::{court, iot_device, judge, police_officer, police_station, violation};

use crate::auth::domain::{Credentials, NewAccount};
use crate::errors::ServiceError;
use crate::lookup::RecordLookup;
use crate::pagination::{Page, Pagination};

/// Persistence for directory entities. Deletes return `false` when the row
/// did not exist.
#[async_trait]
pub trait DirectoryRepository: RecordLookup {
    async fn insert_station(&self, row: police_station::Model) -> Result<police_station::Model, ServiceError>;
    async fn update_station(&self, row: police_station::Model) -> Result<police_station::Model, ServiceError>;
    async fn delete_station(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn list_stations(&self, page: Pagination) -> Result<Page<police_station::Model>, ServiceError>;

    /// Officer row plus its login account, written atomically.
    async fn insert_officer(&self, account: NewAccount, credentials: Credentials, row: police_officer::Model) -> Result<police_officer::Model, ServiceError>;
    async fn update_officer(&self, row: police_officer::Model) -> Result<police_officer::Model, ServiceError>;
    /// Removes the officer together with its login account.
    async fn delete_officer(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn list_officers(&self, station_id: Option<Uuid>, page: Pagination) -> Result<Page<police_officer::Model>, ServiceError>;

    async fn insert_device(&self, row: iot_device::Model) -> Result<iot_device::Model, ServiceError>;
    async fn update_device(&self, row: iot_device::Model) -> Result<iot_device::Model, ServiceError>;
    async fn delete_device(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn list_devices(&self, station_id: Option<Uuid>, page: Pagination) -> Result<Page<iot_device::Model>, ServiceError>;

    async fn insert_violation(&self, row: violation::Model) -> Result<violation::Model, ServiceError>;
    async fn update_violation(&self, row: violation::Model) -> Result<violation::Model, ServiceError>;
    async fn delete_violation(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn list_violations(&self, page: Pagination) -> Result<Page<violation::Model>, ServiceError>;

    async fn insert_court(&self, row: court::Model) -> Result<court::Model, ServiceError>;
    async fn update_court(&self, row: court::Model) -> Result<court::Model, ServiceError>;
    async fn delete_court(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn list_courts(&self, page: Pagination) -> Result<Page<court::Model>, ServiceError>;

    /// Judge row plus its login account, written atomically.
    async fn insert_judge(&self, account: NewAccount, credentials: Credentials, row: judge::Model) -> Result<judge::Model, ServiceError>;
    async fn update_judge(&self, row: judge::Model) -> Result<judge::Model, ServiceError>;
    /// Removes the judge together with its login account.
    async fn delete_judge(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn list_judges(&self, court_id: Option<Uuid>, page: Pagination) -> Result<Page<judge::Model>, ServiceError>;
}
