use sea_orm::entity::prelude::*;
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::validation::{normalize_cnic, FieldErrors};
use crate::{court, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "judge")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub court_id: Uuid,
    pub full_name: String,
    pub cnic: String,
    pub designation: String,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Court,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
            Relation::Court => Entity::belongs_to(court::Entity).from(Column::CourtId).to(court::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewJudge {
    pub court_id: Uuid,
    pub full_name: String,
    pub cnic: String,
    pub designation: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UpdateJudge {
    pub court_id: Option<Uuid>,
    pub designation: Option<String>,
    pub is_active: Option<bool>,
}

pub fn build(id: Uuid, user_id: Uuid, input: &NewJudge) -> Result<Model, errors::ModelError> {
    let mut errs = FieldErrors::new();
    errs.required("full_name", &input.full_name).max_len("full_name", &input.full_name, 128)
        .cnic("cnic", &input.cnic)
        .required("designation", &input.designation).max_len("designation", &input.designation, 64);
    if let Err(e) = user::validate_username(&input.username) { errs.push("username", e.to_string()); }
    errs.email("email", &input.email);
    if input.password.len() < 8 { errs.push("password", "password too short (>=8)"); }
    errs.finish()?;
    Ok(Model {
        id,
        user_id,
        court_id: input.court_id,
        full_name: input.full_name.trim().to_string(),
        cnic: normalize_cnic(&input.cnic).unwrap_or_default(),
        designation: input.designation.trim().to_string(),
        is_active: true,
        created_at: Utc::now().into(),
    })
}

pub fn apply_update(m: &mut Model, u: &UpdateJudge) -> Result<(), errors::ModelError> {
    if let Some(d) = &u.designation {
        if d.trim().is_empty() { return Err(errors::ModelError::Validation("designation is required".into())); }
        m.designation = d.trim().to_string();
    }
    if let Some(c) = u.court_id { m.court_id = c; }
    if let Some(a) = u.is_active { m.is_active = a; }
    Ok(())
}
