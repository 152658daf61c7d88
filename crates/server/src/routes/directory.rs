//! Reference data managed by administrators: stations, officers, devices,
//! violations, courts and judges. Reads are open to any signed-in user.

use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;

use models::role::RoleName;
use models::{court, iot_device, judge, police_officer, police_station, violation};
use service::pagination::Page;

use crate::auth::CurrentUser;
use crate::errors::{ApiJson, ApiPath, ApiQuery};
use crate::routes::{created, ok, paging, ApiResult, Created};
use crate::state::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// Officers and devices
    pub station_id: Option<Uuid>,
    /// Judges
    pub court_id: Option<Uuid>,
}

#[utoipa::path(post, path = "/Policestation/create", tag = "directory", request_body = crate::openapi::NewPoliceStationDoc, responses((status = 201, description = "Created"), (status = 400, description = "Validation failed"), (status = 403, description = "Admin only"), (status = 409, description = "Duplicate")))]
pub async fn create_station(State(state): State<ServerState>, user: CurrentUser, ApiJson(input): ApiJson<police_station::NewPoliceStation>) -> Created<police_station::Model> {
    user.require(&[RoleName::Admin])?;
    created("Police station created", state.directory.create_station(input).await?)
}

#[utoipa::path(get, path = "/Policestation", tag = "directory", params(ListQuery), responses((status = 200, description = "OK")))]
pub async fn list_stations(State(state): State<ServerState>, _user: CurrentUser, ApiQuery(q): ApiQuery<ListQuery>) -> ApiResult<Page<police_station::Model>> {
    ok("Police station list", state.directory.list_stations(paging(q.page, q.per_page)).await?)
}

#[utoipa::path(get, path = "/Policestation/{id}", tag = "directory", params(("id" = Uuid, Path, description = "Police station id")), responses((status = 200, description = "OK"), (status = 404, description = "Not found")))]
pub async fn get_station(State(state): State<ServerState>, _user: CurrentUser, ApiPath(id): ApiPath<Uuid>) -> ApiResult<police_station::Model> {
    ok("Police station", state.directory.get_station(id).await?)
}

#[utoipa::path(put, path = "/Policestation/{id}", tag = "directory", params(("id" = Uuid, Path, description = "Police station id")), request_body = crate::openapi::UpdatePoliceStationDoc, responses((status = 200, description = "Updated"), (status = 400, description = "Validation failed"), (status = 404, description = "Not found")))]
pub async fn update_station(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<police_station::UpdatePoliceStation>,
) -> ApiResult<police_station::Model> {
    user.require(&[RoleName::Admin])?;
    ok("Police station updated", state.directory.update_station(id, input).await?)
}

#[utoipa::path(delete, path = "/Policestation/{id}", tag = "directory", params(("id" = Uuid, Path, description = "Police station id")), responses((status = 200, description = "Deleted"), (status = 404, description = "Not found"), (status = 409, description = "Still referenced")))]
pub async fn delete_station(State(state): State<ServerState>, user: CurrentUser, ApiPath(id): ApiPath<Uuid>) -> ApiResult<()> {
    user.require(&[RoleName::Admin])?;
    state.directory.delete_station(id).await?;
    ok("Police station deleted", ())
}

#[utoipa::path(post, path = "/Policeofficer/create", tag = "directory", request_body = crate::openapi::NewPoliceOfficerDoc, responses((status = 201, description = "Created"), (status = 400, description = "Validation failed"), (status = 403, description = "Admin only"), (status = 409, description = "Duplicate")))]
pub async fn create_officer(State(state): State<ServerState>, user: CurrentUser, ApiJson(input): ApiJson<police_officer::NewPoliceOfficer>) -> Created<police_officer::Model> {
    user.require(&[RoleName::Admin])?;
    created("Police officer created", state.directory.create_officer(input).await?)
}

#[utoipa::path(get, path = "/Policeofficer", tag = "directory", params(ListQuery), responses((status = 200, description = "OK")))]
pub async fn list_officers(State(state): State<ServerState>, _user: CurrentUser, ApiQuery(q): ApiQuery<ListQuery>) -> ApiResult<Page<police_officer::Model>> {
    ok("Police officer list", state.directory.list_officers(q.station_id, paging(q.page, q.per_page)).await?)
}

#[utoipa::path(get, path = "/Policeofficer/{id}", tag = "directory", params(("id" = Uuid, Path, description = "Police officer id")), responses((status = 200, description = "OK"), (status = 404, description = "Not found")))]
pub async fn get_officer(State(state): State<ServerState>, _user: CurrentUser, ApiPath(id): ApiPath<Uuid>) -> ApiResult<police_officer::Model> {
    ok("Police officer", state.directory.get_officer(id).await?)
}

#[utoipa::path(put, path = "/Policeofficer/{id}", tag = "directory", params(("id" = Uuid, Path, description = "Police officer id")), request_body = crate::openapi::UpdatePoliceOfficerDoc, responses((status = 200, description = "Updated"), (status = 400, description = "Validation failed"), (status = 404, description = "Not found")))]
pub async fn update_officer(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<police_officer::UpdatePoliceOfficer>,
) -> ApiResult<police_officer::Model> {
    user.require(&[RoleName::Admin])?;
    ok("Police officer updated", state.directory.update_officer(id, input).await?)
}

#[utoipa::path(delete, path = "/Policeofficer/{id}", tag = "directory", params(("id" = Uuid, Path, description = "Police officer id")), responses((status = 200, description = "Deleted"), (status = 404, description = "Not found"), (status = 409, description = "Still referenced")))]
pub async fn delete_officer(State(state): State<ServerState>, user: CurrentUser, ApiPath(id): ApiPath<Uuid>) -> ApiResult<()> {
    user.require(&[RoleName::Admin])?;
    state.directory.delete_officer(id).await?;
    ok("Police officer deleted", ())
}

#[utoipa::path(post, path = "/Iotdevice/create", tag = "directory", request_body = crate::openapi::NewIotDeviceDoc, responses((status = 201, description = "Created"), (status = 400, description = "Validation failed"), (status = 403, description = "Admin only"), (status = 409, description = "Duplicate")))]
pub async fn create_device(State(state): State<ServerState>, user: CurrentUser, ApiJson(input): ApiJson<iot_device::NewIotDevice>) -> Created<iot_device::Model> {
    user.require(&[RoleName::Admin])?;
    created("IoT device created", state.directory.create_device(input).await?)
}

#[utoipa::path(get, path = "/Iotdevice", tag = "directory", params(ListQuery), responses((status = 200, description = "OK")))]
pub async fn list_devices(State(state): State<ServerState>, _user: CurrentUser, ApiQuery(q): ApiQuery<ListQuery>) -> ApiResult<Page<iot_device::Model>> {
    ok("IoT device list", state.directory.list_devices(q.station_id, paging(q.page, q.per_page)).await?)
}

#[utoipa::path(get, path = "/Iotdevice/{id}", tag = "directory", params(("id" = Uuid, Path, description = "IoT device id")), responses((status = 200, description = "OK"), (status = 404, description = "Not found")))]
pub async fn get_device(State(state): State<ServerState>, _user: CurrentUser, ApiPath(id): ApiPath<Uuid>) -> ApiResult<iot_device::Model> {
    ok("IoT device", state.directory.get_device(id).await?)
}

#[utoipa::path(put, path = "/Iotdevice/{id}", tag = "directory", params(("id" = Uuid, Path, description = "IoT device id")), request_body = crate::openapi::UpdateIotDeviceDoc, responses((status = 200, description = "Updated"), (status = 400, description = "Validation failed"), (status = 404, description = "Not found")))]
pub async fn update_device(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<iot_device::UpdateIotDevice>,
) -> ApiResult<iot_device::Model> {
    user.require(&[RoleName::Admin])?;
    ok("IoT device updated", state.directory.update_device(id, input).await?)
}

#[utoipa::path(delete, path = "/Iotdevice/{id}", tag = "directory", params(("id" = Uuid, Path, description = "IoT device id")), responses((status = 200, description = "Deleted"), (status = 404, description = "Not found"), (status = 409, description = "Still referenced")))]
pub async fn delete_device(State(state): State<ServerState>, user: CurrentUser, ApiPath(id): ApiPath<Uuid>) -> ApiResult<()> {
    user.require(&[RoleName::Admin])?;
    state.directory.delete_device(id).await?;
    ok("IoT device deleted", ())
}

#[utoipa::path(post, path = "/Violation/create", tag = "directory", request_body = crate::openapi::NewViolationDoc, responses((status = 201, description = "Created"), (status = 400, description = "Validation failed"), (status = 403, description = "Admin only"), (status = 409, description = "Duplicate")))]
pub async fn create_violation(State(state): State<ServerState>, user: CurrentUser, ApiJson(input): ApiJson<violation::NewViolation>) -> Created<violation::Model> {
    user.require(&[RoleName::Admin])?;
    created("Violation created", state.directory.create_violation(input).await?)
}

#[utoipa::path(get, path = "/Violation", tag = "directory", params(ListQuery), responses((status = 200, description = "OK")))]
pub async fn list_violations(State(state): State<ServerState>, _user: CurrentUser, ApiQuery(q): ApiQuery<ListQuery>) -> ApiResult<Page<violation::Model>> {
    ok("Violation list", state.directory.list_violations(paging(q.page, q.per_page)).await?)
}

#[utoipa::path(get, path = "/Violation/{id}", tag = "directory", params(("id" = Uuid, Path, description = "Violation id")), responses((status = 200, description = "OK"), (status = 404, description = "Not found")))]
pub async fn get_violation(State(state): State<ServerState>, _user: CurrentUser, ApiPath(id): ApiPath<Uuid>) -> ApiResult<violation::Model> {
    ok("Violation", state.directory.get_violation(id).await?)
}

#[utoipa::path(put, path = "/Violation/{id}", tag = "directory", params(("id" = Uuid, Path, description = "Violation id")), request_body = crate::openapi::UpdateViolationDoc, responses((status = 200, description = "Updated"), (status = 400, description = "Validation failed"), (status = 404, description = "Not found")))]
pub async fn update_violation(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<violation::UpdateViolation>,
) -> ApiResult<violation::Model> {
    user.require(&[RoleName::Admin])?;
    ok("Violation updated", state.directory.update_violation(id, input).await?)
}

#[utoipa::path(delete, path = "/Violation/{id}", tag = "directory", params(("id" = Uuid, Path, description = "Violation id")), responses((status = 200, description = "Deleted"), (status = 404, description = "Not found"), (status = 409, description = "Still referenced")))]
pub async fn delete_violation(State(state): State<ServerState>, user: CurrentUser, ApiPath(id): ApiPath<Uuid>) -> ApiResult<()> {
    user.require(&[RoleName::Admin])?;
    state.directory.delete_violation(id).await?;
    ok("Violation deleted", ())
}

#[utoipa::path(post, path = "/Court/create", tag = "directory", request_body = crate::openapi::NewCourtDoc, responses((status = 201, description = "Created"), (status = 400, description = "Validation failed"), (status = 403, description = "Admin only"), (status = 409, description = "Duplicate")))]
pub async fn create_court(State(state): State<ServerState>, user: CurrentUser, ApiJson(input): ApiJson<court::NewCourt>) -> Created<court::Model> {
    user.require(&[RoleName::Admin])?;
    created("Court created", state.directory.create_court(input).await?)
}

#[utoipa::path(get, path = "/Court", tag = "directory", params(ListQuery), responses((status = 200, description = "OK")))]
pub async fn list_courts(State(state): State<ServerState>, _user: CurrentUser, ApiQuery(q): ApiQuery<ListQuery>) -> ApiResult<Page<court::Model>> {
    ok("Court list", state.directory.list_courts(paging(q.page, q.per_page)).await?)
}

#[utoipa::path(get, path = "/Court/{id}", tag = "directory", params(("id" = Uuid, Path, description = "Court id")), responses((status = 200, description = "OK"), (status = 404, description = "Not found")))]
pub async fn get_court(State(state): State<ServerState>, _user: CurrentUser, ApiPath(id): ApiPath<Uuid>) -> ApiResult<court::Model> {
    ok("Court", state.directory.get_court(id).await?)
}

#[utoipa::path(put, path = "/Court/{id}", tag = "directory", params(("id" = Uuid, Path, description = "Court id")), request_body = crate::openapi::UpdateCourtDoc, responses((status = 200, description = "Updated"), (status = 400, description = "Validation failed"), (status = 404, description = "Not found")))]
pub async fn update_court(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<court::UpdateCourt>,
) -> ApiResult<court::Model> {
    user.require(&[RoleName::Admin])?;
    ok("Court updated", state.directory.update_court(id, input).await?)
}

#[utoipa::path(delete, path = "/Court/{id}", tag = "directory", params(("id" = Uuid, Path, description = "Court id")), responses((status = 200, description = "Deleted"), (status = 404, description = "Not found"), (status = 409, description = "Still referenced")))]
pub async fn delete_court(State(state): State<ServerState>, user: CurrentUser, ApiPath(id): ApiPath<Uuid>) -> ApiResult<()> {
    user.require(&[RoleName::Admin])?;
    state.directory.delete_court(id).await?;
    ok("Court deleted", ())
}

#[utoipa::path(post, path = "/Judge/create", tag = "directory", request_body = crate::openapi::NewJudgeDoc, responses((status = 201, description = "Created"), (status = 400, description = "Validation failed"), (status = 403, description = "Admin only"), (status = 409, description = "Duplicate")))]
pub async fn create_judge(State(state): State<ServerState>, user: CurrentUser, ApiJson(input): ApiJson<judge::NewJudge>) -> Created<judge::Model> {
    user.require(&[RoleName::Admin])?;
    created("Judge created", state.directory.create_judge(input).await?)
}

#[utoipa::path(get, path = "/Judge", tag = "directory", params(ListQuery), responses((status = 200, description = "OK")))]
pub async fn list_judges(State(state): State<ServerState>, _user: CurrentUser, ApiQuery(q): ApiQuery<ListQuery>) -> ApiResult<Page<judge::Model>> {
    ok("Judge list", state.directory.list_judges(q.court_id, paging(q.page, q.per_page)).await?)
}

#[utoipa::path(get, path = "/Judge/{id}", tag = "directory", params(("id" = Uuid, Path, description = "Judge id")), responses((status = 200, description = "OK"), (status = 404, description = "Not found")))]
pub async fn get_judge(State(state): State<ServerState>, _user: CurrentUser, ApiPath(id): ApiPath<Uuid>) -> ApiResult<judge::Model> {
    ok("Judge", state.directory.get_judge(id).await?)
}

#[utoipa::path(put, path = "/Judge/{id}", tag = "directory", params(("id" = Uuid, Path, description = "Judge id")), request_body = crate::openapi::UpdateJudgeDoc, responses((status = 200, description = "Updated"), (status = 400, description = "Validation failed"), (status = 404, description = "Not found")))]
pub async fn update_judge(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<judge::UpdateJudge>,
) -> ApiResult<judge::Model> {
    user.require(&[RoleName::Admin])?;
    ok("Judge updated", state.directory.update_judge(id, input).await?)
}

#[utoipa::path(delete, path = "/Judge/{id}", tag = "directory", params(("id" = Uuid, Path, description = "Judge id")), responses((status = 200, description = "Deleted"), (status = 404, description = "Not found"), (status = 409, description = "Still referenced")))]
pub async fn delete_judge(State(state): State<ServerState>, user: CurrentUser, ApiPath(id): ApiPath<Uuid>) -> ApiResult<()> {
    user.require(&[RoleName::Admin])?;
    state.directory.delete_judge(id).await?;
    ok("Judge deleted", ())
}
