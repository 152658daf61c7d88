use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;

use models::role::RoleName;
use models::status::ChallanStatus;
use service::challan::domain::{ChallanFilter, ChallanVerification, ChallanView, CreateChallanInput, UpdateChallanStatusInput};
use service::pagination::Page;

use crate::auth::CurrentUser;
use crate::errors::{ApiJson, ApiPath, ApiQuery};
use crate::routes::{created, ok, paging, ApiResult, Created};
use crate::state::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub officer_id: Option<Uuid>,
    pub station_id: Option<Uuid>,
    #[param(value_type = Option<String>)]
    pub status: Option<ChallanStatus>,
    pub vehicle_plate: Option<String>,
    pub cnic: Option<String>,
}

/// Issue a challan; vehicle and accused are looked up or created in the
/// same transaction.
#[utoipa::path(post, path = "/Challan/create", tag = "challan", request_body = crate::openapi::CreateChallanRequest, responses((status = 201, description = "Challan issued"), (status = 400, description = "Validation failed"), (status = 403, description = "Officers only"), (status = 404, description = "Referenced record not found"), (status = 409, description = "Emission report already used")))]
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiJson(input): ApiJson<CreateChallanInput>,
) -> Created<ChallanView> {
    user.require(&[RoleName::Officer, RoleName::StationChief])?;
    let view = state.challans.create(user.id()?, input).await?;
    created("Challan issued", view)
}

#[utoipa::path(get, path = "/Challan", tag = "challan", params(ListQuery), responses((status = 200, description = "Newest first")))]
pub async fn list(State(state): State<ServerState>, _user: CurrentUser, ApiQuery(q): ApiQuery<ListQuery>) -> ApiResult<Page<ChallanView>> {
    let filter = ChallanFilter {
        officer_id: q.officer_id,
        station_id: q.station_id,
        status: q.status,
        vehicle_plate: q.vehicle_plate,
        cnic: q.cnic,
    };
    ok("Challans", state.challans.list(filter, paging(q.page, q.per_page)).await?)
}

#[utoipa::path(get, path = "/Challan/{id}", tag = "challan", params(("id" = Uuid, Path, description = "Challan id")), responses((status = 200, description = "OK"), (status = 404, description = "Not found")))]
pub async fn get(State(state): State<ServerState>, _user: CurrentUser, ApiPath(id): ApiPath<Uuid>) -> ApiResult<ChallanView> {
    ok("Challan", state.challans.get(id).await?)
}

#[utoipa::path(put, path = "/Challan/{id}/status", tag = "challan", params(("id" = Uuid, Path, description = "Challan id")), request_body = crate::openapi::UpdateStatusRequest, responses((status = 200, description = "Status changed"), (status = 400, description = "Transition not allowed"), (status = 404, description = "Not found")))]
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<UpdateChallanStatusInput>,
) -> ApiResult<ChallanView> {
    user.require(&[RoleName::Officer, RoleName::StationChief, RoleName::Admin])?;
    ok("Challan status updated", state.challans.update_status(id, input).await?)
}

#[utoipa::path(get, path = "/Challan/{id}/verify", tag = "challan", params(("id" = Uuid, Path, description = "Challan id")), responses((status = 200, description = "Challan and linked report signatures checked"), (status = 404, description = "Not found")))]
pub async fn verify(State(state): State<ServerState>, _user: CurrentUser, ApiPath(id): ApiPath<Uuid>) -> ApiResult<ChallanVerification> {
    let check = state.challans.verify(id).await?;
    let message = if check.is_valid { "Signature valid" } else { "Signature mismatch" };
    ok(message, check)
}
