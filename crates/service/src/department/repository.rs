use async_trait::async_trait;

use super::domain::Department;
use crate::errors::ServiceError;

/// Persistence contract for departments. Every returned [`Department`]
/// carries its current employee count.
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// All departments in storage order.
    async fn list_departments(&self) -> Result<Vec<Department>, ServiceError>;
    async fn find_department(&self, id: i32) -> Result<Option<Department>, ServiceError>;
    async fn find_department_by_name(&self, name: &str) -> Result<Option<Department>, ServiceError>;
    /// Exact, case-sensitive match, ignoring `exclude_id`.
    async fn department_name_taken(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, ServiceError>;
    async fn insert_department(&self, name: &str) -> Result<Department, ServiceError>;
    async fn rename_department(&self, id: i32, name: &str) -> Result<Department, ServiceError>;
    /// Clears the department reference of every member, then removes the
    /// department, as one atomic unit. Returns the number of employees moved
    /// to unassigned, or `None` when the department does not exist.
    async fn delete_department_unassigning(&self, id: i32) -> Result<Option<u64>, ServiceError>;
}
