use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use models::{challan, court_case, fir};

use super::SeaOrmRepository;
use crate::errors::ServiceError;
use crate::public::PublicRepository;

#[async_trait]
impl PublicRepository for SeaOrmRepository {
    async fn challans_for_accused(&self, accused_id: Uuid) -> Result<Vec<challan::Model>, ServiceError> {
        Ok(challan::Entity::find()
            .filter(challan::Column::AccusedId.eq(accused_id))
            .order_by_desc(challan::Column::IssuedAt)
            .all(&self.db)
            .await?)
    }

    async fn firs_for_challans(&self, challan_ids: &[Uuid]) -> Result<Vec<fir::Model>, ServiceError> {
        if challan_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(fir::Entity::find()
            .filter(fir::Column::ChallanId.is_in(challan_ids.iter().copied()))
            .all(&self.db)
            .await?)
    }

    async fn cases_for_firs(&self, fir_ids: &[Uuid]) -> Result<Vec<court_case::Model>, ServiceError> {
        if fir_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(court_case::Entity::find()
            .filter(court_case::Column::FirId.is_in(fir_ids.iter().copied()))
            .all(&self.db)
            .await?)
    }
}
