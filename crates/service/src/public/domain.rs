use serde::{Deserialize, Serialize};

use models::{court_case, fir};

use crate::challan::domain::ChallanView;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestStatusOtpInput {
    pub cnic: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusLookupInput {
    pub cnic: String,
    pub email: String,
    pub otp: String,
}

/// Everything on record for one CNIC.
#[derive(Debug, Clone, Serialize)]
pub struct PublicStatus {
    pub cnic: String,
    pub accused_name: Option<String>,
    pub challans: Vec<ChallanView>,
    pub firs: Vec<fir::Model>,
    pub cases: Vec<court_case::Model>,
}
