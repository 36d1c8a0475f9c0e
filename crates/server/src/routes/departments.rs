use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use service::department::domain::{Department, DepartmentPatch, NewDepartment};
use service::employee::domain::UNASSIGNED;
use tracing::info;
use utoipa::ToSchema;

use crate::errors::ApiError;
use crate::extract::{record_id, ApiJson, ApiPath};
use crate::state::AppState;

/// Department as returned by the API. `id` is null only for the synthetic
/// "Unassigned" entry of the listing.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSummary {
    pub id: Option<i32>,
    pub name: String,
    pub employee_count: u64,
}

impl DepartmentSummary {
    fn unassigned(employee_count: u64) -> Self {
        Self { id: None, name: UNASSIGNED.to_string(), employee_count }
    }
}

impl From<Department> for DepartmentSummary {
    fn from(d: Department) -> Self {
        Self { id: Some(d.id), name: d.name, employee_count: d.employee_count }
    }
}

#[utoipa::path(
    get, path = "/api/departments", tag = "departments",
    responses(
        (status = 200, description = "Departments with employee counts, plus an Unassigned entry when any employee has no department", body = [DepartmentSummary])
    )
)]
pub async fn list_departments(State(state): State<AppState>) -> Result<Json<Vec<DepartmentSummary>>, ApiError> {
    let mut out: Vec<DepartmentSummary> = state
        .departments
        .list_all()
        .await?
        .into_iter()
        .map(DepartmentSummary::from)
        .collect();
    let unassigned = state.departments.unassigned_employee_count().await?;
    if unassigned > 0 {
        out.push(DepartmentSummary::unassigned(unassigned));
    }
    Ok(Json(out))
}

#[utoipa::path(
    get, path = "/api/departments/{id}", tag = "departments",
    params(("id" = i64, Path, description = "Department id")),
    responses(
        (status = 200, description = "OK", body = DepartmentSummary),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn get_department(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<DepartmentSummary>, ApiError> {
    let d = state.departments.get_by_id(record_id("Department", id)?).await?;
    Ok(Json(d.into()))
}

#[utoipa::path(
    post, path = "/api/departments", tag = "departments",
    request_body = crate::openapi::CreateDepartmentDoc,
    responses(
        (status = 201, description = "Created", body = DepartmentSummary),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn create_department(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewDepartment>,
) -> Result<(StatusCode, Json<DepartmentSummary>), ApiError> {
    let d = state.departments.create(input).await?;
    info!(id = d.id, name = %d.name, "created department");
    Ok((StatusCode::CREATED, Json(d.into())))
}

#[utoipa::path(
    put, path = "/api/departments/{id}", tag = "departments",
    params(("id" = i64, Path, description = "Department id")),
    request_body = crate::openapi::UpdateDepartmentDoc,
    responses(
        (status = 200, description = "Updated", body = DepartmentSummary),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn update_department(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(patch): ApiJson<DepartmentPatch>,
) -> Result<Json<DepartmentSummary>, ApiError> {
    let d = state.departments.update(record_id("Department", id)?, patch).await?;
    Ok(Json(d.into()))
}

#[utoipa::path(
    delete, path = "/api/departments/{id}", tag = "departments",
    params(("id" = i64, Path, description = "Department id")),
    responses(
        (status = 204, description = "Deleted; former members are unassigned"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn delete_department(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.departments.delete(record_id("Department", id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
