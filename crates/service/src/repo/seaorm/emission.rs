use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder};

use models::emission_report;

use super::{paged, SeaOrmRepository};
use crate::emission::domain::EmissionFilter;
use crate::emission::EmissionRepository;
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};

#[async_trait]
impl EmissionRepository for SeaOrmRepository {
    async fn insert_report(&self, row: emission_report::Model) -> Result<emission_report::Model, ServiceError> {
        Ok(row.into_active_model().reset_all().insert(&self.db).await?)
    }

    async fn list_reports(&self, filter: &EmissionFilter, page: Pagination) -> Result<Page<emission_report::Model>, ServiceError> {
        let mut select = emission_report::Entity::find();
        if let Some(d) = filter.device_id {
            select = select.filter(emission_report::Column::DeviceId.eq(d));
        }
        if let Some(p) = &filter.vehicle_plate {
            select = select.filter(emission_report::Column::VehiclePlate.eq(p.clone()));
        }
        if let Some(c) = filter.classification {
            select = select.filter(emission_report::Column::Classification.eq(c));
        }
        paged(&self.db, select.order_by_desc(emission_report::Column::MeasuredAt), page).await
    }
}
