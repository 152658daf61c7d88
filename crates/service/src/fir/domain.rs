use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::status::FirStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFirInput {
    pub challan_id: Uuid,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFirInput {
    #[serde(default)]
    pub status: Option<FirStatus>,
    #[serde(default)]
    pub investigation_report: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FirFilter {
    pub station_id: Option<Uuid>,
    pub status: Option<FirStatus>,
}
