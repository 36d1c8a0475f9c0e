use async_trait::async_trait;

use super::domain::{Employee, EmployeeDraft};
use crate::errors::ServiceError;

/// Which department membership a listing is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartmentScope {
    Any,
    Unassigned,
    Only(i32),
}

impl From<Option<i32>> for DepartmentScope {
    /// A missing department id means "no department", not "any".
    fn from(id: Option<i32>) -> Self {
        id.map_or(Self::Unassigned, Self::Only)
    }
}

/// Listing filter. `name_contains` is matched case-insensitively as a plain
/// substring (no wildcard characters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub scope: DepartmentScope,
    pub name_contains: Option<String>,
}

impl EmployeeFilter {
    pub fn all() -> Self { Self { scope: DepartmentScope::Any, name_contains: None } }

    pub fn scoped(scope: DepartmentScope) -> Self { Self { scope, name_contains: None } }

    /// Blank search text is ignored.
    pub fn with_name(mut self, query: Option<&str>) -> Self {
        self.name_contains = query.map(str::trim).filter(|q| !q.is_empty()).map(str::to_string);
        self
    }
}

/// Persistence contract for employees. Returned [`Employee`] values carry the
/// resolved department name.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Matching employees ordered by id.
    async fn list_employees(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>, ServiceError>;
    async fn find_employee(&self, id: i32) -> Result<Option<Employee>, ServiceError>;
    /// Exact match on email, ignoring `exclude_id`.
    async fn email_taken(&self, email: &str, exclude_id: Option<i32>) -> Result<bool, ServiceError>;
    async fn insert_employee(&self, draft: EmployeeDraft) -> Result<Employee, ServiceError>;
    async fn save_employee(&self, id: i32, draft: EmployeeDraft) -> Result<Employee, ServiceError>;
    async fn set_employee_department(&self, id: i32, department_id: Option<i32>) -> Result<Employee, ServiceError>;
    /// Returns whether a row was removed.
    async fn delete_employee(&self, id: i32) -> Result<bool, ServiceError>;
    async fn count_unassigned(&self) -> Result<u64, ServiceError>;
}
