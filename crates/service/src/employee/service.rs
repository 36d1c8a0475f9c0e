use std::sync::Arc;

use models::employee as rules;
use tracing::{debug, info, instrument};

use super::domain::{DepartmentChange, Employee, EmployeeDraft, EmployeePatch, NewEmployee};
use super::repository::{DepartmentScope, EmployeeFilter, EmployeeRepository};
use crate::department::repository::DepartmentRepository;
use crate::errors::ServiceError;

/// Employee business service independent of web framework
pub struct EmployeeService<R> {
    repo: Arc<R>,
}

impl<R> EmployeeService<R>
where
    R: DepartmentRepository + EmployeeRepository,
{
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Employee>, ServiceError> {
        self.repo.list_employees(&EmployeeFilter::all()).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<Employee, ServiceError> {
        self.repo
            .find_employee(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Employee", id))
    }

    /// `None` selects employees without a department.
    #[instrument(skip(self))]
    pub async fn list_by_department(&self, department_id: Option<i32>) -> Result<Vec<Employee>, ServiceError> {
        self.repo
            .list_employees(&EmployeeFilter::scoped(DepartmentScope::from(department_id)))
            .await
    }

    pub async fn list_unassigned(&self) -> Result<Vec<Employee>, ServiceError> {
        self.list_by_department(None).await
    }

    /// Case-insensitive substring search on full name. A blank query lists everyone.
    #[instrument(skip(self))]
    pub async fn search_by_name(&self, query: Option<&str>) -> Result<Vec<Employee>, ServiceError> {
        let filter = EmployeeFilter::all().with_name(query);
        debug!(query = ?filter.name_contains, "searching employees");
        self.repo.list_employees(&filter).await
    }

    #[instrument(skip(self))]
    pub async fn search_in_department(
        &self,
        department_id: Option<i32>,
        query: Option<&str>,
    ) -> Result<Vec<Employee>, ServiceError> {
        let filter = EmployeeFilter::scoped(DepartmentScope::from(department_id)).with_name(query);
        self.repo.list_employees(&filter).await
    }

    /// Create an employee.
    ///
    /// # Examples
    /// ```
    /// use service::employee::{domain::NewEmployee, EmployeeService};
    /// use service::repo::InMemoryDirectory;
    /// use std::sync::Arc;
    /// let svc = EmployeeService::new(Arc::new(InMemoryDirectory::default()));
    /// let input = NewEmployee { full_name: Some("Ann Lee".into()), email: Some(" ".into()), ..Default::default() };
    /// let e = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(e.email, None);
    /// assert_eq!(e.department_label(), "Unassigned");
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewEmployee) -> Result<Employee, ServiceError> {
        let draft = EmployeeDraft {
            full_name: input.full_name.unwrap_or_default(),
            address: input.address,
            phone: input.phone,
            email: input.email,
            department_id: input.department_id,
        };
        let draft = self.validated(draft, None).await?;

        let created = self.repo.insert_employee(draft).await?;
        info!(employee_id = created.id, department_id = ?created.department_id, "employee_created");
        Ok(created)
    }

    /// Overwrite the provided fields; see [`EmployeePatch`] for department handling.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i32, patch: EmployeePatch) -> Result<Employee, ServiceError> {
        let existing = self.get_by_id(id).await?;
        let department_change = patch.department_change();

        let mut draft = EmployeeDraft::from(&existing);
        if let Some(full_name) = patch.full_name {
            draft.full_name = full_name;
        }
        if let Some(address) = patch.address {
            draft.address = Some(address);
        }
        if let Some(phone) = patch.phone {
            draft.phone = Some(phone);
        }
        if let Some(email) = patch.email {
            draft.email = Some(email);
        }
        draft.department_id = match department_change {
            DepartmentChange::Keep => existing.department_id,
            DepartmentChange::Clear => None,
            DepartmentChange::Assign(d) => Some(d),
        };
        let draft = self.validated(draft, Some(id)).await?;

        let updated = self.repo.save_employee(id, draft).await?;
        info!(employee_id = id, department = ?department_change, "employee_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete_employee(id).await? {
            return Err(ServiceError::not_found("Employee", id));
        }
        info!(employee_id = id, "employee_deleted");
        Ok(())
    }

    /// Attach the employee to a department, or detach with `None`.
    #[instrument(skip(self))]
    pub async fn assign_to_department(&self, id: i32, department_id: Option<i32>) -> Result<Employee, ServiceError> {
        self.get_by_id(id).await?;
        if let Some(d) = department_id {
            self.require_department(d).await?;
        }
        let updated = self.repo.set_employee_department(id, department_id).await?;
        info!(employee_id = id, department_id = ?department_id, "employee_department_changed");
        Ok(updated)
    }

    async fn require_department(&self, id: i32) -> Result<(), ServiceError> {
        if self.repo.find_department(id).await?.is_none() {
            return Err(ServiceError::Validation(format!("Department not found with id: {}", id)));
        }
        Ok(())
    }

    /// Trim and check every field, then the store-level rules.
    async fn validated(&self, draft: EmployeeDraft, exclude_id: Option<i32>) -> Result<EmployeeDraft, ServiceError> {
        let full_name = draft.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(ServiceError::Validation("Employee full name is required".into()));
        }
        let address = rules::normalize_optional(draft.address);
        let phone = rules::normalize_optional(draft.phone);
        let email = rules::normalize_optional(draft.email);

        rules::validate_full_name(&full_name)?;
        rules::validate_address(address.as_deref())?;
        rules::validate_phone(phone.as_deref())?;
        rules::validate_email(email.as_deref())?;

        if let Some(email) = email.as_deref() {
            if self.repo.email_taken(email, exclude_id).await? {
                return Err(ServiceError::Validation(format!("Employee with email '{}' already exists", email)));
            }
        }
        if let Some(d) = draft.department_id {
            self.require_department(d).await?;
        }

        Ok(EmployeeDraft { full_name, address, phone, email, department_id: draft.department_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::InMemoryDirectory;

    struct Fixture {
        repo: Arc<InMemoryDirectory>,
        svc: EmployeeService<InMemoryDirectory>,
    }

    fn setup() -> Fixture {
        let repo = Arc::new(InMemoryDirectory::default());
        Fixture { repo: repo.clone(), svc: EmployeeService::new(repo) }
    }

    fn person(name: &str) -> NewEmployee {
        NewEmployee { full_name: Some(name.into()), ..Default::default() }
    }

    fn names(list: &[Employee]) -> Vec<&str> {
        list.iter().map(|e| e.full_name.as_str()).collect()
    }

    #[tokio::test]
    async fn create_normalizes_fields() {
        let f = setup();
        let d = f.repo.insert_department("Engineering").await.unwrap();
        let e = f
            .svc
            .create(NewEmployee {
                full_name: Some("  Ann Lee ".into()),
                address: Some("   ".into()),
                phone: Some(" +1-555-0101 ".into()),
                email: Some(" ann@example.com ".into()),
                department_id: Some(d.id),
            })
            .await
            .unwrap();
        assert_eq!(e.full_name, "Ann Lee");
        assert_eq!(e.address, None);
        assert_eq!(e.phone.as_deref(), Some("+1-555-0101"));
        assert_eq!(e.email.as_deref(), Some("ann@example.com"));
        assert_eq!(e.department_label(), "Engineering");
    }

    #[tokio::test]
    async fn create_validation_messages() {
        let f = setup();
        for input in [NewEmployee::default(), person("   ")] {
            let err = f.svc.create(input).await.unwrap_err();
            assert_eq!(err.to_string(), "Employee full name is required");
        }

        let bad_mail = NewEmployee { email: Some("not-an-email".into()), ..person("X") };
        assert_eq!(f.svc.create(bad_mail).await.unwrap_err().to_string(), "Email should be valid");

        let long_phone = NewEmployee { phone: Some("1".repeat(21)), ..person("X") };
        assert!(matches!(f.svc.create(long_phone).await, Err(ServiceError::Model(_))));

        let ghost = NewEmployee { department_id: Some(77), ..person("X") };
        let err = f.svc.create(ghost).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m == "Department not found with id: 77"));
        assert!(f.svc.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn email_must_be_unique_but_blank_never_conflicts() {
        let f = setup();
        f.svc.create(NewEmployee { email: Some("a@b.co".into()), ..person("First") }).await.unwrap();
        let err = f
            .svc
            .create(NewEmployee { email: Some("a@b.co".into()), ..person("Second") })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Employee with email 'a@b.co' already exists");

        f.svc.create(NewEmployee { email: Some("".into()), ..person("Blank One") }).await.unwrap();
        f.svc.create(NewEmployee { email: Some("  ".into()), ..person("Blank Two") }).await.unwrap();
    }

    #[tokio::test]
    async fn update_touches_only_provided_fields() {
        let f = setup();
        let d = f.repo.insert_department("Finance").await.unwrap();
        let e = f
            .svc
            .create(NewEmployee {
                email: Some("diana.davis@company.com".into()),
                department_id: Some(d.id),
                ..person("Diana Davis")
            })
            .await
            .unwrap();

        let patch = EmployeePatch { phone: Some("+1-555-0106".into()), ..Default::default() };
        let u = f.svc.update(e.id, patch).await.unwrap();
        assert_eq!(u.phone.as_deref(), Some("+1-555-0106"));
        assert_eq!(u.full_name, "Diana Davis");
        assert_eq!(u.email, e.email);
        assert_eq!(u.department_id, Some(d.id));

        // keeping its own email is not a conflict
        let same_mail = EmployeePatch { email: e.email.clone(), ..Default::default() };
        assert!(f.svc.update(e.id, same_mail).await.is_ok());

        let blank = EmployeePatch { full_name: Some(" ".into()), ..Default::default() };
        assert_eq!(f.svc.update(e.id, blank).await.unwrap_err().to_string(), "Employee full name is required");

        assert!(matches!(f.svc.update(500, EmployeePatch::default()).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_department_tri_state() {
        let f = setup();
        let a = f.repo.insert_department("Alpha").await.unwrap();
        let b = f.repo.insert_department("Beta").await.unwrap();
        let e = f.svc.create(NewEmployee { department_id: Some(a.id), ..person("Eve") }).await.unwrap();

        let kept = f.svc.update(e.id, EmployeePatch::default()).await.unwrap();
        assert_eq!(kept.department_id, Some(a.id));

        let moved = f
            .svc
            .update(e.id, EmployeePatch { department_id: Some(Some(b.id)), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(moved.department_name.as_deref(), Some("Beta"));

        let missing = EmployeePatch { department_id: Some(Some(999)), ..Default::default() };
        assert!(matches!(f.svc.update(e.id, missing).await, Err(ServiceError::Validation(_))));

        let cleared = f
            .svc
            .update(e.id, EmployeePatch { department_id: Some(None), ..Default::default() })
            .await
            .unwrap();
        assert_eq!((cleared.department_id, cleared.department_label()), (None, "Unassigned"));
    }

    #[tokio::test]
    async fn listing_and_search() {
        let f = setup();
        let eng = f.repo.insert_department("Engineering").await.unwrap();
        f.svc.create(NewEmployee { department_id: Some(eng.id), ..person("John Doe") }).await.unwrap();
        f.svc.create(person("Bob")).await.unwrap();
        f.svc.create(NewEmployee { department_id: Some(eng.id), ..person("Jane Smith") }).await.unwrap();

        assert_eq!(names(&f.svc.list_all().await.unwrap()), ["John Doe", "Bob", "Jane Smith"]);
        assert_eq!(names(&f.svc.search_by_name(Some("jo")).await.unwrap()), ["John Doe"]);
        assert_eq!(names(&f.svc.search_by_name(Some("  ")).await.unwrap()).len(), 3);
        assert_eq!(names(&f.svc.search_by_name(None).await.unwrap()).len(), 3);
        assert_eq!(names(&f.svc.list_by_department(Some(eng.id)).await.unwrap()), ["John Doe", "Jane Smith"]);
        assert_eq!(names(&f.svc.list_unassigned().await.unwrap()), ["Bob"]);
        assert_eq!(names(&f.svc.search_in_department(Some(eng.id), Some("SMITH")).await.unwrap()), ["Jane Smith"]);
        assert_eq!(names(&f.svc.search_in_department(None, Some("bo")).await.unwrap()), ["Bob"]);
        assert!(f.svc.search_in_department(None, Some("john")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn assign_and_unassign() {
        let f = setup();
        let d = f.repo.insert_department("Marketing").await.unwrap();
        let e = f.svc.create(person("Alice Brown")).await.unwrap();

        let assigned = f.svc.assign_to_department(e.id, Some(d.id)).await.unwrap();
        assert_eq!(assigned.department_name.as_deref(), Some("Marketing"));

        assert!(matches!(f.svc.assign_to_department(e.id, Some(404)).await, Err(ServiceError::Validation(_))));
        assert!(matches!(f.svc.assign_to_department(404, Some(d.id)).await, Err(ServiceError::NotFound(_))));

        let unassigned = f.svc.assign_to_department(e.id, None).await.unwrap();
        assert_eq!(unassigned.department_id, None);
    }

    #[tokio::test]
    async fn delete_reports_missing() {
        let f = setup();
        let e = f.svc.create(person("Frank Miller")).await.unwrap();
        f.svc.delete(e.id).await.unwrap();
        let err = f.svc.delete(e.id).await.unwrap_err();
        assert_eq!(err.to_string(), format!("Employee not found with id: {}", e.id));
        assert!(matches!(f.svc.get_by_id(e.id).await, Err(ServiceError::NotFound(_))));
    }
}
