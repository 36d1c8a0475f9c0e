use axum::{
    routing::{get, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod departments;
pub mod employees;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, the department/employee API and the docs UI
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route(
            "/api/departments",
            get(departments::list_departments).post(departments::create_department),
        )
        .route(
            "/api/departments/:id",
            get(departments::get_department)
                .put(departments::update_department)
                .delete(departments::delete_department),
        )
        .route(
            "/api/employees",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route("/api/employees/unassigned", get(employees::list_unassigned))
        .route("/api/employees/department/:department_id", get(employees::list_by_department))
        .route(
            "/api/employees/:id",
            get(employees::get_employee)
                .put(employees::update_employee)
                .delete(employees::delete_employee),
        )
        .route(
            "/api/employees/:id/department",
            axum::routing::delete(employees::unassign_department),
        )
        .route("/api/employees/:id/department/:department_id", put(employees::assign_department));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
