use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::role;
use crate::validation::{normalize_email, FieldErrors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub role_id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub last_login_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Role,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Role => Entity::belongs_to(role::Entity).from(Column::RoleId).to(role::Column::Id).into() }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_username(username: &str) -> Result<(), errors::ModelError> {
    let u = username.trim();
    if u.len() < 3 || u.len() > 64 {
        return Err(errors::ModelError::Validation("username must be 3-64 characters".into()));
    }
    if !u.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')) {
        return Err(errors::ModelError::Validation("username may only contain letters, digits, '.', '_' or '-'".into()));
    }
    Ok(())
}

/// Build a validated, not-yet-inserted user row.
pub fn new_active(id: Uuid, role_id: Uuid, username: &str, email: &str, full_name: &str) -> Result<ActiveModel, errors::ModelError> {
    let mut errs = FieldErrors::new();
    if let Err(e) = validate_username(username) { errs.push("username", e.to_string()); }
    errs.email("email", email).required("full_name", full_name).max_len("full_name", full_name, 128);
    errs.finish()?;
    let now = Utc::now().into();
    Ok(ActiveModel {
        id: Set(id),
        role_id: Set(role_id),
        username: Set(username.trim().to_string()),
        email: Set(normalize_email(email)),
        full_name: Set(full_name.trim().to_string()),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        last_login_at: Set(None),
    })
}

pub async fn create<C: ConnectionTrait>(db: &C, role_id: Uuid, username: &str, email: &str, full_name: &str) -> Result<Model, errors::ModelError> {
    let am = new_active(Uuid::new_v4(), role_id, username, email, full_name)?;
    Ok(am.insert(db).await?)
}

pub async fn find_by_login<C: ConnectionTrait>(db: &C, username_or_email: &str) -> Result<Option<Model>, errors::ModelError> {
    let key = username_or_email.trim();
    let q = if key.contains('@') {
        Entity::find().filter(Column::Email.eq(normalize_email(key)))
    } else {
        Entity::find().filter(Column::Username.eq(key.to_string()))
    };
    Ok(q.one(db).await?)
}
