//! OpenAPI document. Request schemas mirror the JSON bodies the handlers
//! accept; responses are all wrapped in `{message, data, errors}`.

use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct LoginRequest {
    /// Username or email
    pub login: String,
    pub password: String,
}

#[derive(ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
    /// Admin, StationChief, Officer or Judge
    pub role: String,
}

#[derive(ToSchema)]
pub struct ChangePasswordRequest { pub current_password: String, pub new_password: String }

#[derive(ToSchema)]
pub struct ForgotPasswordRequest { pub email: String }

#[derive(ToSchema)]
pub struct ResetPasswordRequest { pub email: String, pub otp: String, pub new_password: String }

#[derive(ToSchema)]
pub struct CreateEmissionReportRequest {
    pub device_id: Uuid,
    pub vehicle_plate: String,
    pub sound_level_db: f64,
    pub co_level: Option<f64>,
    pub co2_level: Option<f64>,
    pub hc_level: Option<f64>,
    pub nox_level: Option<f64>,
    /// RFC 3339; defaults to now
    pub measured_at: Option<String>,
}

#[derive(ToSchema)]
pub struct VehicleRequest {
    pub plate_number: String,
    pub make: Option<String>,
    pub color: Option<String>,
    pub chassis_number: Option<String>,
    pub engine_number: Option<String>,
    pub registration_year: Option<i32>,
}

#[derive(ToSchema)]
pub struct AccusedRequest {
    pub full_name: String,
    pub cnic: String,
    pub address: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
}

/// Either `vehicle_id` or `vehicle_input`, and either `accused_id` or `accused_input`.
#[derive(ToSchema)]
pub struct CreateChallanRequest {
    pub violation_id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub vehicle_input: Option<VehicleRequest>,
    pub accused_id: Option<Uuid>,
    pub accused_input: Option<AccusedRequest>,
    pub emission_report_id: Option<Uuid>,
    pub location: Option<String>,
    pub evidence_path: Option<String>,
}

#[derive(ToSchema)]
pub struct UpdateStatusRequest {
    /// Unpaid, Paid, Disputed or Cancelled
    pub status: String,
}

#[derive(ToSchema)]
pub struct CreateFirRequest { pub challan_id: Uuid, pub description: String }

#[derive(ToSchema)]
pub struct UpdateFirRequest {
    /// Filed, UnderInvestigation, ForwardedToCourt or Closed
    pub status: Option<String>,
    pub investigation_report: Option<String>,
}

#[derive(ToSchema)]
pub struct CreateCaseRequest {
    pub fir_id: Uuid,
    pub court_id: Uuid,
    pub judge_id: Option<Uuid>,
    pub case_type: String,
    pub hearing_date: Option<String>,
}

#[derive(ToSchema)]
pub struct ScheduleHearingRequest {
    pub hearing_date: String,
    /// Judge to assign when the case has none yet.
    pub judge_id: Option<String>,
}

#[derive(ToSchema)]
pub struct AddStatementRequest {
    pub statement_by: String,
    pub statement_text: String,
    pub statement_date: Option<String>,
}

#[derive(ToSchema)]
pub struct RecordVerdictRequest { pub verdict: String, pub dismissed: Option<bool> }

#[derive(ToSchema)]
pub struct RequestOtpRequest { pub cnic: String, pub email: String }

#[derive(ToSchema)]
pub struct StatusLookupRequest { pub cnic: String, pub email: String, pub otp: String }

#[derive(ToSchema)]
pub struct NewPoliceStationDoc {
    pub name: String,
    pub station_code: String,
    pub district: String,
    pub province: String,
    pub address: Option<String>,
    pub contact_number: Option<String>,
}

#[derive(ToSchema)]
pub struct UpdatePoliceStationDoc {
    pub name: Option<String>,
    pub district: Option<String>,
    pub province: Option<String>,
    pub address: Option<String>,
    pub contact_number: Option<String>,
}

#[derive(ToSchema)]
pub struct NewPoliceOfficerDoc {
    pub station_id: Uuid,
    pub badge_number: String,
    pub full_name: String,
    pub cnic: String,
    pub rank: String,
    pub contact_number: Option<String>,
    pub is_investigation_officer: Option<bool>,
    pub username: String,
    pub email: String,
    pub password: String,
    /// Officer (default) or StationChief
    pub role: Option<String>,
}

#[derive(ToSchema)]
pub struct UpdatePoliceOfficerDoc {
    pub station_id: Option<Uuid>,
    pub rank: Option<String>,
    pub contact_number: Option<String>,
    pub is_investigation_officer: Option<bool>,
}

#[derive(ToSchema)]
pub struct NewIotDeviceDoc {
    pub station_id: Option<Uuid>,
    pub device_name: String,
    pub serial_number: String,
    pub device_type: String,
    pub calibrated_until: Option<String>,
}

#[derive(ToSchema)]
pub struct UpdateIotDeviceDoc {
    pub station_id: Option<Uuid>,
    pub device_name: Option<String>,
    pub is_active: Option<bool>,
    pub calibrated_until: Option<String>,
}

#[derive(ToSchema)]
pub struct NewViolationDoc {
    pub violation_type: String,
    pub description: String,
    pub penalty_amount: i64,
    pub section_of_law: String,
    pub is_cognizable: Option<bool>,
    pub noise_threshold_db: Option<f64>,
}

#[derive(ToSchema)]
pub struct UpdateViolationDoc {
    pub description: Option<String>,
    pub penalty_amount: Option<i64>,
    pub section_of_law: Option<String>,
    pub is_cognizable: Option<bool>,
    pub noise_threshold_db: Option<f64>,
}

#[derive(ToSchema)]
pub struct NewCourtDoc { pub name: String, pub court_type: String, pub district: String, pub address: Option<String> }

#[derive(ToSchema)]
pub struct UpdateCourtDoc {
    pub name: Option<String>,
    pub court_type: Option<String>,
    pub district: Option<String>,
    pub address: Option<String>,
}

#[derive(ToSchema)]
pub struct NewJudgeDoc {
    pub court_id: Uuid,
    pub full_name: String,
    pub cnic: String,
    pub designation: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(ToSchema)]
pub struct UpdateJudgeDoc { pub court_id: Option<Uuid>, pub designation: Option<String>, pub is_active: Option<bool> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::register,
        crate::routes::auth::me,
        crate::routes::auth::change_password,
        crate::routes::auth::forgot_password,
        crate::routes::auth::reset_password,
        crate::routes::emission::create,
        crate::routes::emission::list,
        crate::routes::emission::get,
        crate::routes::emission::verify,
        crate::routes::challan::create,
        crate::routes::challan::list,
        crate::routes::challan::get,
        crate::routes::challan::update_status,
        crate::routes::challan::verify,
        crate::routes::fir::create,
        crate::routes::fir::list,
        crate::routes::fir::get,
        crate::routes::fir::update,
        crate::routes::case::create,
        crate::routes::case::list,
        crate::routes::case::get,
        crate::routes::case::schedule_hearing,
        crate::routes::case::add_statement,
        crate::routes::case::record_verdict,
        crate::routes::public::request_otp,
        crate::routes::public::status,
        crate::routes::directory::create_station,
        crate::routes::directory::list_stations,
        crate::routes::directory::get_station,
        crate::routes::directory::update_station,
        crate::routes::directory::delete_station,
        crate::routes::directory::create_officer,
        crate::routes::directory::list_officers,
        crate::routes::directory::get_officer,
        crate::routes::directory::update_officer,
        crate::routes::directory::delete_officer,
        crate::routes::directory::create_device,
        crate::routes::directory::list_devices,
        crate::routes::directory::get_device,
        crate::routes::directory::update_device,
        crate::routes::directory::delete_device,
        crate::routes::directory::create_violation,
        crate::routes::directory::list_violations,
        crate::routes::directory::get_violation,
        crate::routes::directory::update_violation,
        crate::routes::directory::delete_violation,
        crate::routes::directory::create_court,
        crate::routes::directory::list_courts,
        crate::routes::directory::get_court,
        crate::routes::directory::update_court,
        crate::routes::directory::delete_court,
        crate::routes::directory::create_judge,
        crate::routes::directory::list_judges,
        crate::routes::directory::get_judge,
        crate::routes::directory::update_judge,
        crate::routes::directory::delete_judge,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            RegisterRequest,
            ChangePasswordRequest,
            ForgotPasswordRequest,
            ResetPasswordRequest,
            CreateEmissionReportRequest,
            VehicleRequest,
            AccusedRequest,
            CreateChallanRequest,
            UpdateStatusRequest,
            CreateFirRequest,
            UpdateFirRequest,
            CreateCaseRequest,
            ScheduleHearingRequest,
            AddStatementRequest,
            RecordVerdictRequest,
            RequestOtpRequest,
            StatusLookupRequest,
            NewPoliceStationDoc,
            UpdatePoliceStationDoc,
            NewPoliceOfficerDoc,
            UpdatePoliceOfficerDoc,
            NewIotDeviceDoc,
            UpdateIotDeviceDoc,
            NewViolationDoc,
            UpdateViolationDoc,
            NewCourtDoc,
            UpdateCourtDoc,
            NewJudgeDoc,
            UpdateJudgeDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "directory"),
        (name = "emission"),
        (name = "challan"),
        (name = "fir"),
        (name = "case"),
        (name = "public")
    )
)]
pub struct ApiDoc;
