use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::db::{department_store, employee_store};
use crate::department::domain::Department;
use crate::department::repository::DepartmentRepository;
use crate::employee::domain::{Employee, EmployeeDraft};
use crate::employee::repository::{EmployeeFilter, EmployeeRepository};
use crate::errors::ServiceError;

pub struct SeaOrmRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl DepartmentRepository for SeaOrmRepository {
    async fn list_departments(&self) -> Result<Vec<Department>, ServiceError> {
        Ok(department_store::list_with_counts(&self.db).await?)
    }

    async fn find_department(&self, id: i32) -> Result<Option<Department>, ServiceError> {
        Ok(department_store::find_by_id(&self.db, id).await?)
    }

    async fn find_department_by_name(&self, name: &str) -> Result<Option<Department>, ServiceError> {
        Ok(department_store::find_by_name(&self.db, name).await?)
    }

    async fn department_name_taken(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, ServiceError> {
        Ok(department_store::name_taken(&self.db, name, exclude_id).await?)
    }

    async fn insert_department(&self, name: &str) -> Result<Department, ServiceError> {
        Ok(department_store::insert(&self.db, name).await?)
    }

    async fn rename_department(&self, id: i32, name: &str) -> Result<Department, ServiceError> {
        department_store::rename(&self.db, id, name)
            .await?
            .ok_or_else(|| ServiceError::not_found("Department", id))
    }

    async fn delete_department_unassigning(&self, id: i32) -> Result<Option<u64>, ServiceError> {
        Ok(department_store::delete_unassigning(&self.db, id).await?)
    }
}

#[async_trait]
impl EmployeeRepository for SeaOrmRepository {
    async fn list_employees(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>, ServiceError> {
        Ok(employee_store::list(&self.db, filter).await?)
    }

    async fn find_employee(&self, id: i32) -> Result<Option<Employee>, ServiceError> {
        Ok(employee_store::find_by_id(&self.db, id).await?)
    }

    async fn email_taken(&self, email: &str, exclude_id: Option<i32>) -> Result<bool, ServiceError> {
        Ok(employee_store::email_taken(&self.db, email, exclude_id).await?)
    }

    async fn insert_employee(&self, draft: EmployeeDraft) -> Result<Employee, ServiceError> {
        Ok(employee_store::insert(&self.db, draft).await?)
    }

    async fn save_employee(&self, id: i32, draft: EmployeeDraft) -> Result<Employee, ServiceError> {
        employee_store::save(&self.db, id, draft)
            .await?
            .ok_or_else(|| ServiceError::not_found("Employee", id))
    }

    async fn set_employee_department(&self, id: i32, department_id: Option<i32>) -> Result<Employee, ServiceError> {
        employee_store::set_department(&self.db, id, department_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Employee", id))
    }

    async fn delete_employee(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(employee_store::delete(&self.db, id).await?)
    }

    async fn count_unassigned(&self) -> Result<u64, ServiceError> {
        Ok(employee_store::count_unassigned(&self.db).await?)
    }
}
