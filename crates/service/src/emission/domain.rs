use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::status::EmissionClassification;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmissionReportInput {
    pub device_id: Uuid,
    pub vehicle_plate: String,
    pub sound_level_db: f64,
    #[serde(default)]
    pub co_level: Option<f64>,
    #[serde(default)]
    pub co2_level: Option<f64>,
    #[serde(default)]
    pub hc_level: Option<f64>,
    #[serde(default)]
    pub nox_level: Option<f64>,
    /// Defaults to the time of submission.
    #[serde(default)]
    pub measured_at: Option<DateTimeWithTimeZone>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmissionFilter {
    pub device_id: Option<Uuid>,
    pub vehicle_plate: Option<String>,
    pub classification: Option<EmissionClassification>,
}
