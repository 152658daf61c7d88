use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;

use models::fir;
use models::role::RoleName;
use models::status::FirStatus;
use service::fir::domain::{CreateFirInput, FirFilter, UpdateFirInput};
use service::pagination::Page;

use crate::auth::CurrentUser;
use crate::errors::{ApiJson, ApiPath, ApiQuery};
use crate::routes::{created, ok, paging, ApiResult, Created};
use crate::state::ServerState;

const FIR_ROLES: &[RoleName] = &[RoleName::StationChief, RoleName::Admin];

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub station_id: Option<Uuid>,
    #[param(value_type = Option<String>)]
    pub status: Option<FirStatus>,
}

#[utoipa::path(post, path = "/Fir/create", tag = "fir", request_body = crate::openapi::CreateFirRequest, responses((status = 201, description = "FIR filed"), (status = 400, description = "Violation not cognizable"), (status = 403, description = "Station chiefs only"), (status = 409, description = "FIR already filed for challan")))]
pub async fn create(State(state): State<ServerState>, user: CurrentUser, ApiJson(input): ApiJson<CreateFirInput>) -> Created<fir::Model> {
    user.require(FIR_ROLES)?;
    created("FIR filed", state.firs.create(user.id()?, input).await?)
}

#[utoipa::path(get, path = "/Fir", tag = "fir", params(ListQuery), responses((status = 200, description = "Newest first")))]
pub async fn list(State(state): State<ServerState>, _user: CurrentUser, ApiQuery(q): ApiQuery<ListQuery>) -> ApiResult<Page<fir::Model>> {
    let filter = FirFilter { station_id: q.station_id, status: q.status };
    ok("FIRs", state.firs.list(filter, paging(q.page, q.per_page)).await?)
}

#[utoipa::path(get, path = "/Fir/{id}", tag = "fir", params(("id" = Uuid, Path, description = "FIR id")), responses((status = 200, description = "OK"), (status = 404, description = "Not found")))]
pub async fn get(State(state): State<ServerState>, _user: CurrentUser, ApiPath(id): ApiPath<Uuid>) -> ApiResult<fir::Model> {
    ok("FIR", state.firs.get(id).await?)
}

#[utoipa::path(put, path = "/Fir/{id}", tag = "fir", params(("id" = Uuid, Path, description = "FIR id")), request_body = crate::openapi::UpdateFirRequest, responses((status = 200, description = "Updated"), (status = 400, description = "Transition not allowed"), (status = 404, description = "Not found")))]
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<UpdateFirInput>,
) -> ApiResult<fir::Model> {
    user.require(FIR_ROLES)?;
    ok("FIR updated", state.firs.update(id, input).await?)
}
