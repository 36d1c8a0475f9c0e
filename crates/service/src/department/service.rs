use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{Department, DepartmentPatch, NewDepartment};
use super::repository::DepartmentRepository;
use crate::employee::repository::EmployeeRepository;
use crate::errors::ServiceError;

fn duplicate_name(name: &str) -> ServiceError {
    ServiceError::Validation(format!("Department with name '{}' already exists", name))
}

/// Department business service independent of web framework
pub struct DepartmentService<R> {
    repo: Arc<R>,
}

impl<R> DepartmentService<R>
where
    R: DepartmentRepository + EmployeeRepository,
{
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// All departments ordered by id, each with its employee count.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Department>, ServiceError> {
        debug!("fetching all departments");
        self.repo.list_departments().await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<Department, ServiceError> {
        self.repo
            .find_department(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Department", id))
    }

    #[instrument(skip(self))]
    pub async fn get_by_name(&self, name: &str) -> Result<Department, ServiceError> {
        self.repo
            .find_department_by_name(name)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Department not found with name: {}", name)))
    }

    /// Create a department with a trimmed, unique name.
    ///
    /// # Examples
    /// ```
    /// use service::department::{domain::NewDepartment, DepartmentService};
    /// use service::repo::InMemoryDirectory;
    /// use std::sync::Arc;
    /// let svc = DepartmentService::new(Arc::new(InMemoryDirectory::default()));
    /// let d = tokio_test::block_on(svc.create(NewDepartment { name: Some("  Engineering ".into()) })).unwrap();
    /// assert_eq!(d.name, "Engineering");
    /// assert_eq!(d.employee_count, 0);
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewDepartment) -> Result<Department, ServiceError> {
        let name = input.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(ServiceError::Validation("Department name is required".into()));
        }
        models::department::validate_name(name)?;
        if self.repo.department_name_taken(name, None).await? {
            return Err(duplicate_name(name));
        }

        let created = self.repo.insert_department(name).await?;
        info!(department_id = created.id, name = %created.name, "department_created");
        Ok(created)
    }

    /// Apply a partial update. An absent name leaves the department as is.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i32, patch: DepartmentPatch) -> Result<Department, ServiceError> {
        let existing = self.get_by_id(id).await?;
        let Some(raw) = patch.name else { return Ok(existing) };

        let name = raw.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation("Department name cannot be empty".into()));
        }
        models::department::validate_name(name)?;
        if self.repo.department_name_taken(name, Some(id)).await? {
            return Err(duplicate_name(name));
        }

        let updated = self.repo.rename_department(id, name).await?;
        info!(department_id = id, from = %existing.name, to = %updated.name, "department_updated");
        Ok(updated)
    }

    /// Delete a department; its employees become unassigned.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.get_by_id(id).await?;
        let moved = self
            .repo
            .delete_department_unassigning(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Department", id))?;
        info!(department_id = id, name = %existing.name, moved_to_unassigned = moved, "department_deleted");
        Ok(())
    }

    pub async fn unassigned_employee_count(&self) -> Result<u64, ServiceError> {
        self.repo.count_unassigned().await
    }
}
