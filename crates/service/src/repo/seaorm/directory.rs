use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    TransactionTrait,
};
use uuid::Uuid;

use models::role;
use models::{court, iot_device, judge, police_officer, police_station, user, user_credentials, violation};

use super::{paged, SeaOrmRepository};
use crate::auth::domain::{Credentials, NewAccount};
use crate::directory::DirectoryRepository;
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};

/// Insert the login account behind an officer or judge profile.
async fn insert_account<C: ConnectionTrait>(db: &C, account: &NewAccount, credentials: Credentials) -> Result<(), ServiceError> {
    let role = match role::find_by_name(db, account.role).await? {
        Some(r) => r,
        None => {
            role::ensure_all(db).await?;
            role::find_by_name(db, account.role)
                .await?
                .ok_or_else(|| ServiceError::Db("role seeding failed".into()))?
        }
    };
    user::new_active(account.id, role.id, &account.username, &account.email, &account.full_name)?
        .insert(db)
        .await?;
    user_credentials::upsert_password(db, account.id, credentials.password_hash, &credentials.password_algorithm).await?;
    Ok(())
}

/// Profiles cascade from their user row, so removing the account removes both.
async fn delete_account<C: ConnectionTrait>(db: &C, user_id: Uuid) -> Result<bool, ServiceError> {
    let res = user::Entity::delete_by_id(user_id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

#[async_trait]
impl DirectoryRepository for SeaOrmRepository {
    async fn insert_station(&self, row: police_station::Model) -> Result<police_station::Model, ServiceError> {
        Ok(row.into_active_model().reset_all().insert(&self.db).await?)
    }

    async fn update_station(&self, row: police_station::Model) -> Result<police_station::Model, ServiceError> {
        Ok(row.into_active_model().reset_all().update(&self.db).await?)
    }

    async fn delete_station(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = police_station::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn list_stations(&self, page: Pagination) -> Result<Page<police_station::Model>, ServiceError> {
        let select = police_station::Entity::find().order_by_desc(police_station::Column::CreatedAt);
        paged(&self.db, select, page).await
    }

    async fn insert_officer(&self, account: NewAccount, credentials: Credentials, row: police_officer::Model) -> Result<police_officer::Model, ServiceError> {
        let txn = self.db.begin().await?;
        insert_account(&txn, &account, credentials).await?;
        let created = row.into_active_model().reset_all().insert(&txn).await?;
        txn.commit().await?;
        Ok(created)
    }

    async fn update_officer(&self, row: police_officer::Model) -> Result<police_officer::Model, ServiceError> {
        Ok(row.into_active_model().reset_all().update(&self.db).await?)
    }

    async fn delete_officer(&self, id: Uuid) -> Result<bool, ServiceError> {
        let Some(officer) = police_officer::Entity::find_by_id(id).one(&self.db).await? else { return Ok(false) };
        delete_account(&self.db, officer.user_id).await
    }

    async fn list_officers(&self, station_id: Option<Uuid>, page: Pagination) -> Result<Page<police_officer::Model>, ServiceError> {
        let mut select = police_officer::Entity::find();
        if let Some(s) = station_id {
            select = select.filter(police_officer::Column::StationId.eq(s));
        }
        paged(&self.db, select.order_by_desc(police_officer::Column::CreatedAt), page).await
    }

    async fn insert_device(&self, row: iot_device::Model) -> Result<iot_device::Model, ServiceError> {
        Ok(row.into_active_model().reset_all().insert(&self.db).await?)
    }

    async fn update_device(&self, row: iot_device::Model) -> Result<iot_device::Model, ServiceError> {
        Ok(row.into_active_model().reset_all().update(&self.db).await?)
    }

    async fn delete_device(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = iot_device::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn list_devices(&self, station_id: Option<Uuid>, page: Pagination) -> Result<Page<iot_device::Model>, ServiceError> {
        let mut select = iot_device::Entity::find();
        if let Some(s) = station_id {
            select = select.filter(iot_device::Column::StationId.eq(s));
        }
        paged(&self.db, select.order_by_desc(iot_device::Column::CreatedAt), page).await
    }

    async fn insert_violation(&self, row: violation::Model) -> Result<violation::Model, ServiceError> {
        Ok(row.into_active_model().reset_all().insert(&self.db).await?)
    }

    async fn update_violation(&self, row: violation::Model) -> Result<violation::Model, ServiceError> {
        Ok(row.into_active_model().reset_all().update(&self.db).await?)
    }

    async fn delete_violation(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = violation::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn list_violations(&self, page: Pagination) -> Result<Page<violation::Model>, ServiceError> {
        let select = violation::Entity::find().order_by_desc(violation::Column::CreatedAt);
        paged(&self.db, select, page).await
    }

    async fn insert_court(&self, row: court::Model) -> Result<court::Model, ServiceError> {
        Ok(row.into_active_model().reset_all().insert(&self.db).await?)
    }

    async fn update_court(&self, row: court::Model) -> Result<court::Model, ServiceError> {
        Ok(row.into_active_model().reset_all().update(&self.db).await?)
    }

    async fn delete_court(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = court::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn list_courts(&self, page: Pagination) -> Result<Page<court::Model>, ServiceError> {
        let select = court::Entity::find().order_by_desc(court::Column::CreatedAt);
        paged(&self.db, select, page).await
    }

    async fn insert_judge(&self, account: NewAccount, credentials: Credentials, row: judge::Model) -> Result<judge::Model, ServiceError> {
        let txn = self.db.begin().await?;
        insert_account(&txn, &account, credentials).await?;
        let created = row.into_active_model().reset_all().insert(&txn).await?;
        txn.commit().await?;
        Ok(created)
    }

    async fn update_judge(&self, row: judge::Model) -> Result<judge::Model, ServiceError> {
        Ok(row.into_active_model().reset_all().update(&self.db).await?)
    }

    async fn delete_judge(&self, id: Uuid) -> Result<bool, ServiceError> {
        let Some(j) = judge::Entity::find_by_id(id).one(&self.db).await? else { return Ok(false) };
        delete_account(&self.db, j.user_id).await
    }

    async fn list_judges(&self, court_id: Option<Uuid>, page: Pagination) -> Result<Page<judge::Model>, ServiceError> {
        let mut select = judge::Entity::find();
        if let Some(c) = court_id {
            select = select.filter(judge::Column::CourtId.eq(c));
        }
        paged(&self.db, select.order_by_desc(judge::Column::CreatedAt), page).await
    }
}
