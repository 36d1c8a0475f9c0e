use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use service::employee::domain::{Employee, EmployeePatch, NewEmployee};
use service::errors::ServiceError;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::errors::ApiError;
use crate::extract::{record_id, ApiJson, ApiPath};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring of the full name
    pub search: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub id: i32,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub department_id: Option<i32>,
    /// "Unassigned" when the employee has no department
    pub department_name: String,
}

impl From<Employee> for EmployeeSummary {
    fn from(e: Employee) -> Self {
        let department_name = e.department_label().to_string();
        Self {
            id: e.id,
            full_name: e.full_name,
            email: e.email,
            phone: e.phone,
            address: e.address,
            department_id: e.department_id,
            department_name,
        }
    }
}

fn summaries(list: Vec<Employee>) -> Json<Vec<EmployeeSummary>> {
    Json(list.into_iter().map(EmployeeSummary::from).collect())
}

#[utoipa::path(
    get, path = "/api/employees", tag = "employees",
    params(SearchQuery),
    responses((status = 200, description = "Employees, optionally filtered by name", body = [EmployeeSummary]))
)]
pub async fn list_employees(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<EmployeeSummary>>, ApiError> {
    let list = state.employees.search_by_name(q.search.as_deref()).await?;
    Ok(summaries(list))
}

#[utoipa::path(
    get, path = "/api/employees/{id}", tag = "employees",
    params(("id" = i64, Path, description = "Employee id")),
    responses(
        (status = 200, description = "OK", body = EmployeeSummary),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn get_employee(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<EmployeeSummary>, ApiError> {
    Ok(Json(state.employees.get_by_id(record_id("Employee", id)?).await?.into()))
}

#[utoipa::path(
    get, path = "/api/employees/department/{departmentId}", tag = "employees",
    params(("departmentId" = i64, Path, description = "Department id"), SearchQuery),
    responses((status = 200, description = "Employees of the department", body = [EmployeeSummary]))
)]
pub async fn list_by_department(
    State(state): State<AppState>,
    ApiPath(department_id): ApiPath<i64>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<EmployeeSummary>>, ApiError> {
    // same empty listing as any other unknown department
    let Ok(department_id) = i32::try_from(department_id) else { return Ok(Json(Vec::new())) };
    let list = state
        .employees
        .search_in_department(Some(department_id), q.search.as_deref())
        .await?;
    Ok(summaries(list))
}

#[utoipa::path(
    get, path = "/api/employees/unassigned", tag = "employees",
    params(SearchQuery),
    responses((status = 200, description = "Employees without a department", body = [EmployeeSummary]))
)]
pub async fn list_unassigned(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<EmployeeSummary>>, ApiError> {
    let list = state.employees.search_in_department(None, q.search.as_deref()).await?;
    Ok(summaries(list))
}

#[utoipa::path(
    post, path = "/api/employees", tag = "employees",
    request_body = crate::openapi::CreateEmployeeDoc,
    responses(
        (status = 201, description = "Created", body = EmployeeSummary),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn create_employee(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewEmployee>,
) -> Result<(StatusCode, Json<EmployeeSummary>), ApiError> {
    let e = state.employees.create(input).await?;
    info!(id = e.id, department = %e.department_label(), "created employee");
    Ok((StatusCode::CREATED, Json(e.into())))
}

#[utoipa::path(
    put, path = "/api/employees/{id}", tag = "employees",
    params(("id" = i64, Path, description = "Employee id")),
    request_body = crate::openapi::UpdateEmployeeDoc,
    responses(
        (status = 200, description = "Updated", body = EmployeeSummary),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn update_employee(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(patch): ApiJson<EmployeePatch>,
) -> Result<Json<EmployeeSummary>, ApiError> {
    Ok(Json(state.employees.update(record_id("Employee", id)?, patch).await?.into()))
}

#[utoipa::path(
    delete, path = "/api/employees/{id}", tag = "employees",
    params(("id" = i64, Path, description = "Employee id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.employees.delete(record_id("Employee", id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Unknown employee and unknown department are both reported as 404 here.
fn assignment_error(e: ServiceError) -> ApiError {
    match e {
        ServiceError::Validation(msg) => ApiError::not_found(msg),
        other => other.into(),
    }
}

#[utoipa::path(
    put, path = "/api/employees/{id}/department/{departmentId}", tag = "employees",
    params(
        ("id" = i64, Path, description = "Employee id"),
        ("departmentId" = i64, Path, description = "Department id")
    ),
    responses(
        (status = 200, description = "Assigned", body = EmployeeSummary),
        (status = 404, description = "Employee or department not found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn assign_department(
    State(state): State<AppState>,
    ApiPath((id, department_id)): ApiPath<(i64, i64)>,
) -> Result<Json<EmployeeSummary>, ApiError> {
    let (id, department_id) = (record_id("Employee", id)?, record_id("Department", department_id)?);
    let e = state
        .employees
        .assign_to_department(id, Some(department_id))
        .await
        .map_err(assignment_error)?;
    Ok(Json(e.into()))
}

#[utoipa::path(
    delete, path = "/api/employees/{id}/department", tag = "employees",
    params(("id" = i64, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Unassigned", body = EmployeeSummary),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn unassign_department(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<EmployeeSummary>, ApiError> {
    let e = state
        .employees
        .assign_to_department(record_id("Employee", id)?, None)
        .await
        .map_err(assignment_error)?;
    Ok(Json(e.into()))
}
