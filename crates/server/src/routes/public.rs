//! Citizen-facing lookups. No token; access is gated by an emailed code.

use axum::extract::State;

use service::otp::OtpIssued;
use service::public::domain::{PublicStatus, RequestStatusOtpInput, StatusLookupInput};

use crate::errors::ApiJson;
use crate::routes::{ok, ApiResult};
use crate::state::ServerState;

#[utoipa::path(post, path = "/Public/request-otp", tag = "public", request_body = crate::openapi::RequestOtpRequest, responses((status = 200, description = "Code mailed"), (status = 400, description = "Invalid CNIC or email")))]
pub async fn request_otp(State(state): State<ServerState>, ApiJson(input): ApiJson<RequestStatusOtpInput>) -> ApiResult<OtpIssued> {
    ok("Verification code sent", state.public.request_status_otp(input).await?)
}

#[utoipa::path(post, path = "/Public/status", tag = "public", request_body = crate::openapi::StatusLookupRequest, responses((status = 200, description = "Challans, FIRs and cases for the CNIC"), (status = 401, description = "Invalid or expired code")))]
pub async fn status(State(state): State<ServerState>, ApiJson(input): ApiJson<StatusLookupInput>) -> ApiResult<PublicStatus> {
    ok("Case status", state.public.status(input).await?)
}
