use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;

use models::role::RoleName;
use models::status::CaseStatus;
use models::{case_statement, court_case};
use service::case::domain::{AddStatementInput, CaseDetail, CaseFilter, CreateCaseInput, RecordVerdictInput, ScheduleHearingInput};
use service::pagination::Page;

use crate::auth::CurrentUser;
use crate::errors::{ApiJson, ApiPath, ApiQuery};
use crate::routes::{created, ok, paging, ApiResult, Created};
use crate::state::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub court_id: Option<Uuid>,
    pub judge_id: Option<Uuid>,
    #[param(value_type = Option<String>)]
    pub status: Option<CaseStatus>,
}

#[utoipa::path(post, path = "/Case/create", tag = "case", request_body = crate::openapi::CreateCaseRequest, responses((status = 201, description = "Case opened; FIR forwarded to court"), (status = 400, description = "FIR closed or judge not in court"), (status = 404, description = "FIR, court or judge not found"), (status = 409, description = "Case already exists for FIR")))]
pub async fn create(State(state): State<ServerState>, user: CurrentUser, ApiJson(input): ApiJson<CreateCaseInput>) -> Created<court_case::Model> {
    user.require(&[RoleName::StationChief, RoleName::Admin])?;
    created("Case created", state.cases.create(input).await?)
}

#[utoipa::path(get, path = "/Case", tag = "case", params(ListQuery), responses((status = 200, description = "Newest first")))]
pub async fn list(State(state): State<ServerState>, _user: CurrentUser, ApiQuery(q): ApiQuery<ListQuery>) -> ApiResult<Page<court_case::Model>> {
    let filter = CaseFilter { court_id: q.court_id, judge_id: q.judge_id, status: q.status };
    ok("Cases", state.cases.list(filter, paging(q.page, q.per_page)).await?)
}

#[utoipa::path(get, path = "/Case/{id}", tag = "case", params(("id" = Uuid, Path, description = "Case id")), responses((status = 200, description = "Case with statements"), (status = 404, description = "Not found")))]
pub async fn get(State(state): State<ServerState>, _user: CurrentUser, ApiPath(id): ApiPath<Uuid>) -> ApiResult<CaseDetail> {
    ok("Case", state.cases.get(id).await?)
}

#[utoipa::path(put, path = "/Case/{id}/hearing", tag = "case", params(("id" = Uuid, Path, description = "Case id")), request_body = crate::openapi::ScheduleHearingRequest, responses((status = 200, description = "Hearing scheduled"), (status = 400, description = "Case already closed"), (status = 403, description = "Not a judge of this case")))]
pub async fn schedule_hearing(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<ScheduleHearingInput>,
) -> ApiResult<court_case::Model> {
    user.require(&[RoleName::Judge])?;
    ok("Hearing scheduled", state.cases.schedule_hearing(user.id()?, id, input).await?)
}

#[utoipa::path(post, path = "/Case/{id}/statements", tag = "case", params(("id" = Uuid, Path, description = "Case id")), request_body = crate::openapi::AddStatementRequest, responses((status = 201, description = "Statement recorded"), (status = 400, description = "Case already closed"), (status = 403, description = "Not a judge of this case")))]
pub async fn add_statement(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<AddStatementInput>,
) -> Created<case_statement::Model> {
    user.require(&[RoleName::Judge])?;
    created("Statement recorded", state.cases.add_statement(user.id()?, id, input).await?)
}

#[utoipa::path(put, path = "/Case/{id}/verdict", tag = "case", params(("id" = Uuid, Path, description = "Case id")), request_body = crate::openapi::RecordVerdictRequest, responses((status = 200, description = "Verdict recorded"), (status = 403, description = "Not the assigned judge")))]
pub async fn record_verdict(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<RecordVerdictInput>,
) -> ApiResult<court_case::Model> {
    user.require(&[RoleName::Judge])?;
    ok("Verdict recorded", state.cases.record_verdict(user.id()?, id, input).await?)
}
