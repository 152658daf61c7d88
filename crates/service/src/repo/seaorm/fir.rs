use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use models::fir;

use super::{paged, year_bounds, SeaOrmRepository};
use crate::errors::ServiceError;
use crate::fir::domain::FirFilter;
use crate::fir::FirRepository;
use crate::pagination::{Page, Pagination};

#[async_trait]
impl FirRepository for SeaOrmRepository {
    async fn count_station_firs(&self, station_id: Uuid, year: i32) -> Result<u64, ServiceError> {
        let (start, end) = year_bounds(year)?;
        Ok(fir::Entity::find()
            .filter(fir::Column::StationId.eq(station_id))
            .filter(fir::Column::FiledAt.gte(start))
            .filter(fir::Column::FiledAt.lt(end))
            .count(&self.db)
            .await?)
    }

    async fn insert_fir(&self, row: fir::Model) -> Result<fir::Model, ServiceError> {
        Ok(row.into_active_model().reset_all().insert(&self.db).await?)
    }

    async fn update_fir(&self, row: fir::Model) -> Result<fir::Model, ServiceError> {
        Ok(row.into_active_model().reset_all().update(&self.db).await?)
    }

    async fn list_firs(&self, filter: &FirFilter, page: Pagination) -> Result<Page<fir::Model>, ServiceError> {
        let mut select = fir::Entity::find();
        if let Some(st) = filter.station_id {
            select = select.filter(fir::Column::StationId.eq(st));
        }
        if let Some(s) = filter.status {
            select = select.filter(fir::Column::Status.eq(s));
        }
        paged(&self.db, select.order_by_desc(fir::Column::FiledAt), page).await
    }
}
