use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;

use models::emission_report;
use models::role::RoleName;
use models::status::EmissionClassification;
use service::emission::domain::{CreateEmissionReportInput, EmissionFilter};
use service::pagination::Page;
use service::verification::SignatureCheck;

use crate::auth::CurrentUser;
use crate::errors::{ApiJson, ApiPath, ApiQuery};
use crate::routes::{created, ok, paging, ApiResult, Created};
use crate::state::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub device_id: Option<Uuid>,
    pub vehicle_plate: Option<String>,
    #[param(value_type = Option<String>)]
    pub classification: Option<EmissionClassification>,
}

#[utoipa::path(post, path = "/EmissionReport/create", tag = "emission", request_body = crate::openapi::CreateEmissionReportRequest, responses((status = 201, description = "Reading recorded and signed"), (status = 400, description = "Validation failed"), (status = 403, description = "Officers only"), (status = 404, description = "Device not found")))]
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiJson(input): ApiJson<CreateEmissionReportInput>,
) -> Created<emission_report::Model> {
    user.require(&[RoleName::Officer, RoleName::StationChief])?;
    let report = state.emissions.create(user.id()?, input).await?;
    created("Emission report recorded", report)
}

#[utoipa::path(get, path = "/EmissionReport", tag = "emission", params(ListQuery), responses((status = 200, description = "Newest first")))]
pub async fn list(State(state): State<ServerState>, _user: CurrentUser, ApiQuery(q): ApiQuery<ListQuery>) -> ApiResult<Page<emission_report::Model>> {
    let filter = EmissionFilter { device_id: q.device_id, vehicle_plate: q.vehicle_plate, classification: q.classification };
    let page = state.emissions.list(filter, paging(q.page, q.per_page)).await?;
    ok("Emission reports", page)
}

#[utoipa::path(get, path = "/EmissionReport/{id}", tag = "emission", params(("id" = Uuid, Path, description = "Report id")), responses((status = 200, description = "OK"), (status = 404, description = "Not found")))]
pub async fn get(State(state): State<ServerState>, _user: CurrentUser, ApiPath(id): ApiPath<Uuid>) -> ApiResult<emission_report::Model> {
    ok("Emission report", state.emissions.get(id).await?)
}

#[utoipa::path(get, path = "/EmissionReport/{id}/verify", tag = "emission", params(("id" = Uuid, Path, description = "Report id")), responses((status = 200, description = "Recomputed signature and verdict"), (status = 404, description = "Not found")))]
pub async fn verify(State(state): State<ServerState>, _user: CurrentUser, ApiPath(id): ApiPath<Uuid>) -> ApiResult<SignatureCheck> {
    let check = state.emissions.verify(id).await?;
    let message = if check.is_valid { "Signature valid" } else { "Signature mismatch" };
    ok(message, check)
}
