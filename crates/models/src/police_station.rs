use sea_orm::entity::prelude::*;
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::validation::FieldErrors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "police_station")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub station_code: String,
    pub district: String,
    pub province: String,
    pub address: Option<String>,
    pub contact_number: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewPoliceStation {
    pub name: String,
    pub station_code: String,
    pub district: String,
    pub province: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UpdatePoliceStation {
    pub name: Option<String>,
    pub district: Option<String>,
    pub province: Option<String>,
    pub address: Option<String>,
    pub contact_number: Option<String>,
}

/// Station codes are short upper-case tokens; they appear inside FIR numbers.
pub fn validate_station_code(code: &str) -> Result<(), errors::ModelError> {
    let c = code.trim();
    let ok_chars = c.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-');
    if c.is_empty() || c.len() > 16 || !ok_chars || c.starts_with('-') || c.ends_with('-') {
        return Err(errors::ModelError::Validation("station_code must be 1-16 letters, digits or inner dashes".into()));
    }
    Ok(())
}

/// Validate input and build the row to insert.
pub fn build(id: Uuid, input: &NewPoliceStation) -> Result<Model, errors::ModelError> {
    let mut errs = FieldErrors::new();
    errs.required("name", &input.name).max_len("name", &input.name, 128)
        .required("district", &input.district)
        .required("province", &input.province);
    if let Err(e) = validate_station_code(&input.station_code) { errs.push("station_code", e.to_string()); }
    errs.finish()?;
    Ok(Model {
        id,
        name: input.name.trim().to_string(),
        station_code: input.station_code.trim().to_uppercase(),
        district: input.district.trim().to_string(),
        province: input.province.trim().to_string(),
        address: input.address.clone(),
        contact_number: input.contact_number.clone(),
        created_at: Utc::now().into(),
    })
}

pub fn apply_update(m: &mut Model, u: &UpdatePoliceStation) -> Result<(), errors::ModelError> {
    let mut errs = FieldErrors::new();
    if let Some(n) = &u.name { errs.required("name", n).max_len("name", n, 128); }
    if let Some(d) = &u.district { errs.required("district", d); }
    if let Some(p) = &u.province { errs.required("province", p); }
    errs.finish()?;
    if let Some(n) = &u.name { m.name = n.trim().to_string(); }
    if let Some(d) = &u.district { m.district = d.trim().to_string(); }
    if let Some(p) = &u.province { m.province = p.trim().to_string(); }
    if u.address.is_some() { m.address = u.address.clone(); }
    if u.contact_number.is_some() { m.contact_number = u.contact_number.clone(); }
    Ok(())
}
