use sea_orm::entity::prelude::*;
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::role::RoleName;
use crate::validation::{normalize_cnic, FieldErrors};
use crate::{police_station, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "police_officer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub station_id: Uuid,
    pub badge_number: String,
    pub full_name: String,
    pub cnic: String,
    pub rank: String,
    pub contact_number: Option<String>,
    pub is_investigation_officer: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Station,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
            Relation::Station => Entity::belongs_to(police_station::Entity).from(Column::StationId).to(police_station::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Officer profile plus the login account created alongside it.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewPoliceOfficer {
    pub station_id: Uuid,
    pub badge_number: String,
    pub full_name: String,
    pub cnic: String,
    pub rank: String,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub is_investigation_officer: bool,
    pub username: String,
    pub email: String,
    pub password: String,
    /// `Officer` unless stated; `StationChief` is the only other accepted role.
    #[serde(default)]
    pub role: Option<RoleName>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UpdatePoliceOfficer {
    pub station_id: Option<Uuid>,
    pub rank: Option<String>,
    pub contact_number: Option<String>,
    pub is_investigation_officer: Option<bool>,
}

/// Validated officer row for an already-chosen user id.
pub fn build(id: Uuid, user_id: Uuid, input: &NewPoliceOfficer) -> Result<Model, errors::ModelError> {
    let mut errs = FieldErrors::new();
    errs.required("badge_number", &input.badge_number).max_len("badge_number", &input.badge_number, 32)
        .required("full_name", &input.full_name).max_len("full_name", &input.full_name, 128)
        .cnic("cnic", &input.cnic)
        .required("rank", &input.rank);
    if let Err(e) = user::validate_username(&input.username) { errs.push("username", e.to_string()); }
    errs.email("email", &input.email);
    if input.password.len() < 8 { errs.push("password", "password too short (>=8)"); }
    if let Some(role) = input.role {
        if !role.is_police() { errs.push("role", "officer role must be Officer or StationChief"); }
    }
    errs.finish()?;
    Ok(Model {
        id,
        user_id,
        station_id: input.station_id,
        badge_number: input.badge_number.trim().to_uppercase(),
        full_name: input.full_name.trim().to_string(),
        cnic: normalize_cnic(&input.cnic).unwrap_or_default(),
        rank: input.rank.trim().to_string(),
        contact_number: input.contact_number.clone(),
        is_investigation_officer: input.is_investigation_officer,
        created_at: Utc::now().into(),
    })
}

pub fn apply_update(m: &mut Model, u: &UpdatePoliceOfficer) -> Result<(), errors::ModelError> {
    if let Some(r) = &u.rank {
        if r.trim().is_empty() { return Err(errors::ModelError::Validation("rank is required".into())); }
        m.rank = r.trim().to_string();
    }
    if let Some(s) = u.station_id { m.station_id = s; }
    if u.contact_number.is_some() { m.contact_number = u.contact_number.clone(); }
    if let Some(io) = u.is_investigation_officer { m.is_investigation_officer = io; }
    Ok(())
}
