use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder};

use models::otp_token;
use models::status::OtpPurpose;

use super::SeaOrmRepository;
use crate::errors::ServiceError;
use crate::otp::OtpRepository;

#[async_trait]
impl OtpRepository for SeaOrmRepository {
    async fn invalidate_otps(&self, email: &str, purpose: OtpPurpose) -> Result<(), ServiceError> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        otp_token::Entity::update_many()
            .col_expr(otp_token::Column::ConsumedAt, Expr::value(now))
            .filter(otp_token::Column::Email.eq(email))
            .filter(otp_token::Column::Purpose.eq(purpose))
            .filter(otp_token::Column::ConsumedAt.is_null())
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn insert_otp(&self, token: otp_token::Model) -> Result<otp_token::Model, ServiceError> {
        Ok(token.into_active_model().reset_all().insert(&self.db).await?)
    }

    async fn latest_otp(&self, email: &str, purpose: OtpPurpose) -> Result<Option<otp_token::Model>, ServiceError> {
        Ok(otp_token::Entity::find()
            .filter(otp_token::Column::Email.eq(email))
            .filter(otp_token::Column::Purpose.eq(purpose))
            .filter(otp_token::Column::ConsumedAt.is_null())
            .order_by_desc(otp_token::Column::CreatedAt)
            .one(&self.db)
            .await?)
    }

    async fn save_otp(&self, token: otp_token::Model) -> Result<otp_token::Model, ServiceError> {
        Ok(token.into_active_model().reset_all().update(&self.db).await?)
    }
}
