use sea_orm::entity::prelude::*;
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::validation::FieldErrors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "court")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub court_type: String,
    pub district: String,
    pub address: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewCourt {
    pub name: String,
    pub court_type: String,
    pub district: String,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UpdateCourt {
    pub name: Option<String>,
    pub court_type: Option<String>,
    pub district: Option<String>,
    pub address: Option<String>,
}

pub fn build(id: Uuid, input: &NewCourt) -> Result<Model, errors::ModelError> {
    let mut errs = FieldErrors::new();
    errs.required("name", &input.name).max_len("name", &input.name, 128)
        .required("court_type", &input.court_type).max_len("court_type", &input.court_type, 64)
        .required("district", &input.district);
    errs.finish()?;
    Ok(Model {
        id,
        name: input.name.trim().to_string(),
        court_type: input.court_type.trim().to_string(),
        district: input.district.trim().to_string(),
        address: input.address.clone(),
        created_at: Utc::now().into(),
    })
}

pub fn apply_update(m: &mut Model, u: &UpdateCourt) -> Result<(), errors::ModelError> {
    let mut errs = FieldErrors::new();
    if let Some(n) = &u.name { errs.required("name", n).max_len("name", n, 128); }
    if let Some(t) = &u.court_type { errs.required("court_type", t).max_len("court_type", t, 64); }
    if let Some(d) = &u.district { errs.required("district", d); }
    errs.finish()?;
    if let Some(n) = &u.name { m.name = n.trim().to_string(); }
    if let Some(t) = &u.court_type { m.court_type = t.trim().to_string(); }
    if let Some(d) = &u.district { m.district = d.trim().to_string(); }
    if u.address.is_some() { m.address = u.address.clone(); }
    Ok(())
}
