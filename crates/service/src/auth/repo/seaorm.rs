use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set, TransactionTrait};
use uuid::Uuid;

use models::role::{self, RoleName};
use models::{user, user_credentials};
use models::validation::normalize_email;

use crate::auth::domain::{AuthUser, Credentials, NewAccount};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    async fn to_domain(&self, u: user::Model) -> Result<AuthUser, AuthError> {
        let role = role::Entity::find_by_id(u.role_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AuthError::Repository(format!("role {} missing", u.role_id)))?;
        Ok(AuthUser { id: u.id, username: u.username, email: u.email, full_name: u.full_name, role: role.name, is_active: u.is_active })
    }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_login(&self, login: &str) -> Result<Option<AuthUser>, AuthError> {
        match user::find_by_login(&self.db, login).await? {
            Some(u) => Ok(Some(self.to_domain(u).await?)),
            None => Ok(None),
        }
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
        match user::Entity::find_by_id(id).one(&self.db).await? {
            Some(u) => Ok(Some(self.to_domain(u).await?)),
            None => Ok(None),
        }
    }

    async fn login_taken(&self, username: &str, email: &str) -> Result<bool, AuthError> {
        let n = user::Entity::find()
            .filter(
                user::Column::Username
                    .eq(username.trim().to_string())
                    .or(user::Column::Email.eq(normalize_email(email))),
            )
            .count(&self.db)
            .await?;
        Ok(n > 0)
    }

    async fn create_user(&self, account: &NewAccount, credentials: Credentials) -> Result<AuthUser, AuthError> {
        let role = match role::find_by_name(&self.db, account.role).await? {
            Some(r) => r,
            None => {
                role::ensure_all(&self.db).await?;
                role::find_by_name(&self.db, account.role)
                    .await?
                    .ok_or_else(|| AuthError::Repository("role seeding failed".into()))?
            }
        };
        let txn = self.db.begin().await?;
        let created = user::new_active(account.id, role.id, &account.username, &account.email, &account.full_name)?
            .insert(&txn)
            .await?;
        user_credentials::upsert_password(&txn, created.id, credentials.password_hash, &credentials.password_algorithm).await?;
        txn.commit().await?;
        Ok(AuthUser {
            id: created.id,
            username: created.username,
            email: created.email,
            full_name: created.full_name,
            role: role.name,
            is_active: created.is_active,
        })
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let res = user_credentials::find_for_user(&self.db, user_id).await?;
        Ok(res.map(|c| Credentials { user_id: c.user_id, password_hash: c.password_hash, password_algorithm: c.password_algorithm }))
    }

    async fn upsert_password(&self, user_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
        let c = user_credentials::upsert_password(&self.db, user_id, password_hash, &password_algorithm).await?;
        Ok(Credentials { user_id: c.user_id, password_hash: c.password_hash, password_algorithm: c.password_algorithm })
    }

    async fn record_login(&self, user_id: Uuid) -> Result<(), AuthError> {
        let now = Utc::now();
        let am = user::ActiveModel {
            id: Set(user_id),
            last_login_at: Set(Some(now.into())),
            updated_at: Set(now.into()),
            ..Default::default()
        };
        am.update(&self.db).await?;
        Ok(())
    }

    async fn ensure_roles(&self) -> Result<(), AuthError> {
        role::ensure_all(&self.db).await?;
        Ok(())
    }

    async fn count_users_with_role(&self, role_name: RoleName) -> Result<u64, AuthError> {
        let Some(r) = role::find_by_name(&self.db, role_name).await? else { return Ok(0) };
        Ok(user::Entity::find().filter(user::Column::RoleId.eq(r.id)).count(&self.db).await?)
    }
}
