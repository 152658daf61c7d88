use sea_orm::entity::prelude::*;
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::police_station;
use crate::validation::FieldErrors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "iot_device")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub station_id: Option<Uuid>,
    pub device_name: String,
    pub serial_number: String,
    pub device_type: String,
    pub is_active: bool,
    pub calibrated_until: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Station }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Station => Entity::belongs_to(police_station::Entity).from(Column::StationId).to(police_station::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Active and, when a calibration window is recorded, still inside it.
    pub fn usable_at(&self, at: DateTimeWithTimeZone) -> bool {
        self.is_active && self.calibrated_until.map_or(true, |until| at <= until)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewIotDevice {
    #[serde(default)]
    pub station_id: Option<Uuid>,
    pub device_name: String,
    pub serial_number: String,
    pub device_type: String,
    #[serde(default)]
    pub calibrated_until: Option<DateTimeWithTimeZone>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UpdateIotDevice {
    pub station_id: Option<Uuid>,
    pub device_name: Option<String>,
    pub is_active: Option<bool>,
    pub calibrated_until: Option<DateTimeWithTimeZone>,
}

pub fn build(id: Uuid, input: &NewIotDevice) -> Result<Model, errors::ModelError> {
    let mut errs = FieldErrors::new();
    errs.required("device_name", &input.device_name).max_len("device_name", &input.device_name, 128)
        .required("serial_number", &input.serial_number).max_len("serial_number", &input.serial_number, 64)
        .required("device_type", &input.device_type).max_len("device_type", &input.device_type, 32);
    errs.finish()?;
    Ok(Model {
        id,
        station_id: input.station_id,
        device_name: input.device_name.trim().to_string(),
        serial_number: input.serial_number.trim().to_uppercase(),
        device_type: input.device_type.trim().to_string(),
        is_active: true,
        calibrated_until: input.calibrated_until,
        created_at: Utc::now().into(),
    })
}

pub fn apply_update(m: &mut Model, u: &UpdateIotDevice) -> Result<(), errors::ModelError> {
    if let Some(n) = &u.device_name {
        let mut errs = FieldErrors::new();
        errs.required("device_name", n).max_len("device_name", n, 128);
        errs.finish()?;
        m.device_name = n.trim().to_string();
    }
    if u.station_id.is_some() { m.station_id = u.station_id; }
    if let Some(a) = u.is_active { m.is_active = a; }
    if u.calibrated_until.is_some() { m.calibrated_until = u.calibrated_until; }
    Ok(())
}
