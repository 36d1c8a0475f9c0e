use serde::Deserialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::routes::departments::DepartmentSummary;
use crate::routes::employees::EmployeeSummary;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorResponse { pub message: String }

#[derive(ToSchema)]
pub struct CreateDepartmentDoc { pub name: String }

#[derive(ToSchema)]
pub struct UpdateDepartmentDoc { pub name: Option<String> }

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeDoc {
    pub full_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub department_id: Option<i32>,
}

/// Every field is optional. `departmentId: null` unassigns, an omitted
/// `departmentId` keeps the current department.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeDoc {
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub department_id: Option<i32>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::departments::list_departments,
        crate::routes::departments::get_department,
        crate::routes::departments::create_department,
        crate::routes::departments::update_department,
        crate::routes::departments::delete_department,
        crate::routes::employees::list_employees,
        crate::routes::employees::get_employee,
        crate::routes::employees::list_by_department,
        crate::routes::employees::list_unassigned,
        crate::routes::employees::create_employee,
        crate::routes::employees::update_employee,
        crate::routes::employees::delete_employee,
        crate::routes::employees::assign_department,
        crate::routes::employees::unassign_department,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            DepartmentSummary,
            EmployeeSummary,
            CreateDepartmentDoc,
            UpdateDepartmentDoc,
            CreateEmployeeDoc,
            UpdateEmployeeDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "departments"),
        (name = "employees")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        for p in [
            "/health",
            "/api/departments",
            "/api/departments/{id}",
            "/api/employees",
            "/api/employees/{id}",
            "/api/employees/unassigned",
            "/api/employees/department/{departmentId}",
            "/api/employees/{id}/department",
            "/api/employees/{id}/department/{departmentId}",
        ] {
            assert!(paths.contains_key(p), "missing {p}");
        }
        assert!(doc["components"]["schemas"]["EmployeeSummary"]["properties"]["departmentName"].is_object());
    }
}
