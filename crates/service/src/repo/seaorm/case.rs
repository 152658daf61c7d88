use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use models::{case_statement, court_case, fir};

use super::{paged, year_bounds, SeaOrmRepository};
use crate::case::domain::CaseFilter;
use crate::case::CaseRepository;
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};

#[async_trait]
impl CaseRepository for SeaOrmRepository {
    async fn count_cases_in_year(&self, year: i32) -> Result<u64, ServiceError> {
        let (start, end) = year_bounds(year)?;
        Ok(court_case::Entity::find()
            .filter(court_case::Column::CreatedAt.gte(start))
            .filter(court_case::Column::CreatedAt.lt(end))
            .count(&self.db)
            .await?)
    }

    async fn open_case(&self, case: court_case::Model, forwarded_fir: fir::Model) -> Result<court_case::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let created = case.into_active_model().reset_all().insert(&txn).await?;
        forwarded_fir.into_active_model().reset_all().update(&txn).await?;
        txn.commit().await?;
        Ok(created)
    }

    async fn update_case(&self, row: court_case::Model) -> Result<court_case::Model, ServiceError> {
        Ok(row.into_active_model().reset_all().update(&self.db).await?)
    }

    async fn insert_statement(&self, row: case_statement::Model) -> Result<case_statement::Model, ServiceError> {
        Ok(row.into_active_model().reset_all().insert(&self.db).await?)
    }

    async fn statements(&self, case_id: Uuid) -> Result<Vec<case_statement::Model>, ServiceError> {
        Ok(case_statement::Entity::find()
            .filter(case_statement::Column::CaseId.eq(case_id))
            .order_by_asc(case_statement::Column::StatementDate)
            .all(&self.db)
            .await?)
    }

    async fn list_cases(&self, filter: &CaseFilter, page: Pagination) -> Result<Page<court_case::Model>, ServiceError> {
        let mut select = court_case::Entity::find();
        if let Some(c) = filter.court_id {
            select = select.filter(court_case::Column::CourtId.eq(c));
        }
        if let Some(j) = filter.judge_id {
            select = select.filter(court_case::Column::JudgeId.eq(j));
        }
        if let Some(s) = filter.status {
            select = select.filter(court_case::Column::Status.eq(s));
        }
        paged(&self.db, select.order_by_desc(court_case::Column::CreatedAt), page).await
    }
}
