use sea_orm::entity::prelude::*;
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::validation::FieldErrors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "violation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub violation_type: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub penalty_amount: i64,
    pub section_of_law: String,
    pub is_cognizable: bool,
    pub noise_threshold_db: Option<f64>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewViolation {
    pub violation_type: String,
    pub description: String,
    pub penalty_amount: i64,
    pub section_of_law: String,
    #[serde(default)]
    pub is_cognizable: bool,
    #[serde(default)]
    pub noise_threshold_db: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UpdateViolation {
    pub description: Option<String>,
    pub penalty_amount: Option<i64>,
    pub section_of_law: Option<String>,
    pub is_cognizable: Option<bool>,
    pub noise_threshold_db: Option<f64>,
}

pub fn validate(input: &NewViolation) -> Result<(), errors::ModelError> {
    let mut errs = FieldErrors::new();
    errs.required("violation_type", &input.violation_type).max_len("violation_type", &input.violation_type, 128)
        .required("description", &input.description)
        .positive("penalty_amount", input.penalty_amount)
        .required("section_of_law", &input.section_of_law);
    if let Some(t) = input.noise_threshold_db { errs.range("noise_threshold_db", t, 0.0, 200.0); }
    errs.finish()
}

pub fn build(id: Uuid, input: &NewViolation) -> Result<Model, errors::ModelError> {
    validate(input)?;
    Ok(Model {
        id,
        violation_type: input.violation_type.trim().to_string(),
        description: input.description.trim().to_string(),
        penalty_amount: input.penalty_amount,
        section_of_law: input.section_of_law.trim().to_string(),
        is_cognizable: input.is_cognizable,
        noise_threshold_db: input.noise_threshold_db,
        created_at: Utc::now().into(),
    })
}

pub fn apply_update(m: &mut Model, u: &UpdateViolation) -> Result<(), errors::ModelError> {
    let mut errs = FieldErrors::new();
    if let Some(d) = &u.description { errs.required("description", d); }
    if let Some(p) = u.penalty_amount { errs.positive("penalty_amount", p); }
    if let Some(s) = &u.section_of_law { errs.required("section_of_law", s); }
    if let Some(t) = u.noise_threshold_db { errs.range("noise_threshold_db", t, 0.0, 200.0); }
    errs.finish()?;
    if let Some(d) = &u.description { m.description = d.trim().to_string(); }
    if let Some(p) = u.penalty_amount { m.penalty_amount = p; }
    if let Some(s) = &u.section_of_law { m.section_of_law = s.trim().to_string(); }
    if let Some(c) = u.is_cognizable { m.is_cognizable = c; }
    if u.noise_threshold_db.is_some() { m.noise_threshold_db = u.noise_threshold_db; }
    Ok(())
}
