use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::department::domain::Department;
use crate::department::repository::DepartmentRepository;
use crate::employee::domain::{Employee, EmployeeDraft};
use crate::employee::repository::{DepartmentScope, EmployeeFilter, EmployeeRepository};
use crate::errors::ServiceError;

/// In-memory store implementing both repositories behind one lock.
/// Mirrors the database constraints: unique department names, unique
/// non-null emails and department references that must exist.
#[derive(Default)]
pub struct InMemoryDirectory {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    departments: BTreeMap<i32, String>,
    employees: BTreeMap<i32, EmployeeDraft>,
    last_department_id: i32,
    last_employee_id: i32,
}

fn unique_violation() -> ServiceError {
    ServiceError::Validation("A record with the same unique value already exists".into())
}

impl State {
    fn department(&self, id: i32) -> Option<Department> {
        let name = self.departments.get(&id)?;
        let employee_count = self.employees.values().filter(|e| e.department_id == Some(id)).count() as u64;
        Some(Department { id, name: name.clone(), employee_count })
    }

    fn employee(&self, id: i32) -> Option<Employee> {
        let e = self.employees.get(&id)?;
        Some(Employee {
            id,
            full_name: e.full_name.clone(),
            address: e.address.clone(),
            phone: e.phone.clone(),
            email: e.email.clone(),
            department_id: e.department_id,
            department_name: e.department_id.and_then(|d| self.departments.get(&d).cloned()),
        })
    }

    fn name_taken(&self, name: &str, exclude_id: Option<i32>) -> bool {
        self.departments.iter().any(|(id, n)| n == name && Some(*id) != exclude_id)
    }

    fn email_taken(&self, email: &str, exclude_id: Option<i32>) -> bool {
        self.employees
            .iter()
            .any(|(id, e)| e.email.as_deref() == Some(email) && Some(*id) != exclude_id)
    }

    fn check_employee(&self, draft: &EmployeeDraft, exclude_id: Option<i32>) -> Result<(), ServiceError> {
        if let Some(email) = draft.email.as_deref() {
            if self.email_taken(email, exclude_id) {
                return Err(unique_violation());
            }
        }
        self.check_department_ref(draft.department_id)
    }

    fn check_department_ref(&self, department_id: Option<i32>) -> Result<(), ServiceError> {
        match department_id {
            Some(d) if !self.departments.contains_key(&d) => {
                Err(ServiceError::Validation("Referenced department does not exist".into()))
            }
            _ => Ok(()),
        }
    }
}

fn filter_matches(filter: &EmployeeFilter, e: &EmployeeDraft) -> bool {
    let in_scope = match filter.scope {
        DepartmentScope::Any => true,
        DepartmentScope::Unassigned => e.department_id.is_none(),
        DepartmentScope::Only(id) => e.department_id == Some(id),
    };
    in_scope
        && filter
            .name_contains
            .as_deref()
            .map_or(true, |q| e.full_name.to_lowercase().contains(&q.to_lowercase()))
}

#[async_trait]
impl DepartmentRepository for InMemoryDirectory {
    async fn list_departments(&self) -> Result<Vec<Department>, ServiceError> {
        let s = self.state.read().await;
        Ok(s.departments.keys().filter_map(|id| s.department(*id)).collect())
    }

    async fn find_department(&self, id: i32) -> Result<Option<Department>, ServiceError> {
        Ok(self.state.read().await.department(id))
    }

    async fn find_department_by_name(&self, name: &str) -> Result<Option<Department>, ServiceError> {
        let s = self.state.read().await;
        let id = s.departments.iter().find(|(_, n)| n.as_str() == name).map(|(id, _)| *id);
        Ok(id.and_then(|id| s.department(id)))
    }

    async fn department_name_taken(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, ServiceError> {
        Ok(self.state.read().await.name_taken(name, exclude_id))
    }

    async fn insert_department(&self, name: &str) -> Result<Department, ServiceError> {
        let mut s = self.state.write().await;
        if s.name_taken(name, None) {
            return Err(unique_violation());
        }
        s.last_department_id += 1;
        let id = s.last_department_id;
        s.departments.insert(id, name.to_string());
        Ok(Department { id, name: name.to_string(), employee_count: 0 })
    }

    async fn rename_department(&self, id: i32, name: &str) -> Result<Department, ServiceError> {
        let mut s = self.state.write().await;
        if !s.departments.contains_key(&id) {
            return Err(ServiceError::not_found("Department", id));
        }
        if s.name_taken(name, Some(id)) {
            return Err(unique_violation());
        }
        s.departments.insert(id, name.to_string());
        s.department(id).ok_or_else(|| ServiceError::not_found("Department", id))
    }

    async fn delete_department_unassigning(&self, id: i32) -> Result<Option<u64>, ServiceError> {
        let mut s = self.state.write().await;
        if s.departments.remove(&id).is_none() {
            return Ok(None);
        }
        let mut moved = 0;
        for e in s.employees.values_mut().filter(|e| e.department_id == Some(id)) {
            e.department_id = None;
            moved += 1;
        }
        Ok(Some(moved))
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryDirectory {
    async fn list_employees(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>, ServiceError> {
        let s = self.state.read().await;
        Ok(s.employees
            .iter()
            .filter(|(_, e)| filter_matches(filter, e))
            .filter_map(|(id, _)| s.employee(*id))
            .collect())
    }

    async fn find_employee(&self, id: i32) -> Result<Option<Employee>, ServiceError> {
        Ok(self.state.read().await.employee(id))
    }

    async fn email_taken(&self, email: &str, exclude_id: Option<i32>) -> Result<bool, ServiceError> {
        Ok(self.state.read().await.email_taken(email, exclude_id))
    }

    async fn insert_employee(&self, draft: EmployeeDraft) -> Result<Employee, ServiceError> {
        let mut s = self.state.write().await;
        s.check_employee(&draft, None)?;
        s.last_employee_id += 1;
        let id = s.last_employee_id;
        s.employees.insert(id, draft);
        s.employee(id).ok_or_else(|| ServiceError::not_found("Employee", id))
    }

    async fn save_employee(&self, id: i32, draft: EmployeeDraft) -> Result<Employee, ServiceError> {
        let mut s = self.state.write().await;
        if !s.employees.contains_key(&id) {
            return Err(ServiceError::not_found("Employee", id));
        }
        s.check_employee(&draft, Some(id))?;
        s.employees.insert(id, draft);
        s.employee(id).ok_or_else(|| ServiceError::not_found("Employee", id))
    }

    async fn set_employee_department(&self, id: i32, department_id: Option<i32>) -> Result<Employee, ServiceError> {
        let mut s = self.state.write().await;
        s.check_department_ref(department_id)?;
        let e = s.employees.get_mut(&id).ok_or_else(|| ServiceError::not_found("Employee", id))?;
        e.department_id = department_id;
        s.employee(id).ok_or_else(|| ServiceError::not_found("Employee", id))
    }

    async fn delete_employee(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(self.state.write().await.employees.remove(&id).is_some())
    }

    async fn count_unassigned(&self) -> Result<u64, ServiceError> {
        let s = self.state.read().await;
        Ok(s.employees.values().filter(|e| e.department_id.is_none()).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, email: Option<&str>, department_id: Option<i32>) -> EmployeeDraft {
        EmployeeDraft {
            full_name: name.into(),
            address: None,
            phone: None,
            email: email.map(str::to_string),
            department_id,
        }
    }

    #[tokio::test]
    async fn mirrors_unique_and_reference_constraints() {
        let repo = InMemoryDirectory::default();
        let d = repo.insert_department("Engineering").await.unwrap();
        assert!(repo.insert_department("Engineering").await.is_err());

        repo.insert_employee(draft("Ann", Some("ann@example.com"), Some(d.id))).await.unwrap();
        assert!(repo.insert_employee(draft("Ann 2", Some("ann@example.com"), None)).await.is_err());
        assert!(repo.insert_employee(draft("Ghost", None, Some(99))).await.is_err());
        repo.insert_employee(draft("No Mail", None, None)).await.unwrap();
        repo.insert_employee(draft("No Mail Either", None, None)).await.unwrap();

        assert_eq!(repo.find_department(d.id).await.unwrap().unwrap().employee_count, 1);
        assert_eq!(repo.count_unassigned().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn delete_moves_members_to_unassigned() {
        let repo = InMemoryDirectory::default();
        let d = repo.insert_department("Marketing").await.unwrap();
        let e = repo.insert_employee(draft("Alice Brown", None, Some(d.id))).await.unwrap();
        assert_eq!(e.department_name.as_deref(), Some("Marketing"));

        assert_eq!(repo.delete_department_unassigning(d.id).await.unwrap(), Some(1));
        assert_eq!(repo.delete_department_unassigning(d.id).await.unwrap(), None);
        let e = repo.find_employee(e.id).await.unwrap().unwrap();
        assert_eq!((e.department_id, e.department_name), (None, None));
    }
}
