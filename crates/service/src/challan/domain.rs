use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::challan;
use models::status::ChallanStatus;

use crate::verification::SignatureCheck;

/// New vehicle details used when no `vehicle_id` is supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleInput {
    pub plate_number: String,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub chassis_number: Option<String>,
    #[serde(default)]
    pub engine_number: Option<String>,
    #[serde(default)]
    pub registration_year: Option<i32>,
}

/// New accused details used when no `accused_id` is supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccusedInput {
    pub full_name: String,
    pub cnic: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChallanInput {
    pub violation_id: Uuid,
    #[serde(default)]
    pub vehicle_id: Option<Uuid>,
    #[serde(default)]
    pub vehicle_input: Option<VehicleInput>,
    #[serde(default)]
    pub accused_id: Option<Uuid>,
    #[serde(default)]
    pub accused_input: Option<AccusedInput>,
    #[serde(default)]
    pub emission_report_id: Option<Uuid>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub evidence_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateChallanStatusInput {
    pub status: ChallanStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChallanFilter {
    pub officer_id: Option<Uuid>,
    pub station_id: Option<Uuid>,
    pub status: Option<ChallanStatus>,
    pub vehicle_plate: Option<String>,
    pub cnic: Option<String>,
}

/// Challan plus the read-time overdue flag.
#[derive(Debug, Clone, Serialize)]
pub struct ChallanView {
    #[serde(flatten)]
    pub challan: challan::Model,
    pub is_overdue: bool,
}

impl ChallanView {
    pub fn at(challan: challan::Model, now: sea_orm::prelude::DateTimeWithTimeZone) -> Self {
        let is_overdue = challan.is_overdue(now);
        Self { challan, is_overdue }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChallanVerification {
    pub challan: SignatureCheck,
    pub emission_report: Option<SignatureCheck>,
    /// Both signatures hold.
    pub is_valid: bool,
}
