use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, TransactionTrait};
use uuid::Uuid;

use models::{accused, challan, police_officer, vehicle};

use super::{paged, SeaOrmRepository};
use crate::challan::domain::ChallanFilter;
use crate::challan::repository::{ChallanIssue, ChallanRepository};
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};

#[async_trait]
impl ChallanRepository for SeaOrmRepository {
    async fn issue_challan(&self, issue: ChallanIssue) -> Result<challan::Model, ServiceError> {
        let txn = self.db.begin().await?;
        if let Some(a) = issue.new_accused {
            a.into_active_model().reset_all().insert(&txn).await?;
        }
        if let Some(v) = issue.new_vehicle {
            v.into_active_model().reset_all().insert(&txn).await?;
        }
        let created = issue.challan.into_active_model().reset_all().insert(&txn).await?;
        txn.commit().await?;
        Ok(created)
    }

    async fn update_challan(&self, row: challan::Model) -> Result<challan::Model, ServiceError> {
        Ok(row.into_active_model().reset_all().update(&self.db).await?)
    }

    async fn list_challans(&self, filter: &ChallanFilter, page: Pagination) -> Result<Page<challan::Model>, ServiceError> {
        let mut select = challan::Entity::find();
        if let Some(o) = filter.officer_id {
            select = select.filter(challan::Column::OfficerId.eq(o));
        }
        if let Some(st) = filter.station_id {
            let officer_ids: Vec<Uuid> = police_officer::Entity::find()
                .select_only()
                .column(police_officer::Column::Id)
                .filter(police_officer::Column::StationId.eq(st))
                .into_tuple()
                .all(&self.db)
                .await?;
            select = select.filter(challan::Column::OfficerId.is_in(officer_ids));
        }
        if let Some(s) = filter.status {
            select = select.filter(challan::Column::Status.eq(s));
        }
        if let Some(plate) = &filter.vehicle_plate {
            let Some(v) = vehicle::find_by_plate(&self.db, plate).await? else {
                return Ok(Page::new(Vec::new(), page, 0));
            };
            select = select.filter(challan::Column::VehicleId.eq(v.id));
        }
        if let Some(cnic) = &filter.cnic {
            let Some(a) = accused::find_by_cnic(&self.db, cnic).await? else {
                return Ok(Page::new(Vec::new(), page, 0));
            };
            select = select.filter(challan::Column::AccusedId.eq(a.id));
        }
        paged(&self.db, select.order_by_desc(challan::Column::IssuedAt), page).await
    }
}
