pub mod auth;
pub mod case;
pub mod challan;
pub mod directory;
pub mod emission;
pub mod fir;
pub mod public;

use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{middleware, Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::{ApiResponse, Health};
use service::pagination::Pagination;

use crate::auth::require_auth;
use crate::errors::ApiError;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;
pub type Created<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

pub fn ok<T>(message: &str, data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::ok(message, data)))
}

pub fn created<T>(message: &str, data: T) -> Created<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(message, data))))
}

pub(crate) fn paging(page: Option<u32>, per_page: Option<u32>) -> Pagination {
    let d = Pagination::default();
    Pagination { page: page.unwrap_or(d.page), per_page: per_page.unwrap_or(d.per_page) }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

fn directory_routes() -> Router<ServerState> {
    use directory::*;
    Router::new()
        .route("/Policestation", get(list_stations))
        .route("/Policestation/create", post(create_station))
        .route("/Policestation/:id", get(get_station).put(update_station).delete(delete_station))
        .route("/Policeofficer", get(list_officers))
        .route("/Policeofficer/create", post(create_officer))
        .route("/Policeofficer/:id", get(get_officer).put(update_officer).delete(delete_officer))
        .route("/Iotdevice", get(list_devices))
        .route("/Iotdevice/create", post(create_device))
        .route("/Iotdevice/:id", get(get_device).put(update_device).delete(delete_device))
        .route("/Violation", get(list_violations))
        .route("/Violation/create", post(create_violation))
        .route("/Violation/:id", get(get_violation).put(update_violation).delete(delete_violation))
        .route("/Court", get(list_courts))
        .route("/Court/create", post(create_court))
        .route("/Court/:id", get(get_court).put(update_court).delete(delete_court))
        .route("/Judge", get(list_judges))
        .route("/Judge/create", post(create_judge))
        .route("/Judge/:id", get(get_judge).put(update_judge).delete(delete_judge))
}

fn workflow_routes() -> Router<ServerState> {
    Router::new()
        .route("/EmissionReport", get(emission::list))
        .route("/EmissionReport/create", post(emission::create))
        .route("/EmissionReport/:id", get(emission::get))
        .route("/EmissionReport/:id/verify", get(emission::verify))
        .route("/Challan", get(challan::list))
        .route("/Challan/create", post(challan::create))
        .route("/Challan/:id", get(challan::get))
        .route("/Challan/:id/status", put(challan::update_status))
        .route("/Challan/:id/verify", get(challan::verify))
        .route("/Fir", get(fir::list))
        .route("/Fir/create", post(fir::create))
        .route("/Fir/:id", get(fir::get).put(fir::update))
        .route("/Case", get(case::list))
        .route("/Case/create", post(case::create))
        .route("/Case/:id", get(case::get))
        .route("/Case/:id/hearing", put(case::schedule_hearing))
        .route("/Case/:id/statements", post(case::add_statement))
        .route("/Case/:id/verdict", put(case::record_verdict))
}

/// Build the full application router: open routes, token-protected routes
/// and the Swagger UI.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let open = Router::new()
        .route("/health", get(health))
        .route("/Auth/login", post(auth::login))
        .route("/Auth/logout", post(auth::logout))
        .route("/Auth/forgot-password", post(auth::forgot_password))
        .route("/Auth/reset-password", post(auth::reset_password))
        .route("/Public/request-otp", post(public::request_otp))
        .route("/Public/status", post(public::status));

    let protected = Router::new()
        .route("/Auth/register", post(auth::register))
        .route("/Auth/me", get(auth::me))
        .route("/Auth/change-password", post(auth::change_password))
        .merge(directory_routes())
        .merge(workflow_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    open.merge(protected)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
