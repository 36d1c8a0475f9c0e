use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::repo::SeaOrmRepository;
use service::{DepartmentService, EmployeeService};

/// Shared handler state: both services over one SeaORM-backed store.
#[derive(Clone)]
pub struct AppState {
    pub departments: Arc<DepartmentService<SeaOrmRepository>>,
    pub employees: Arc<EmployeeService<SeaOrmRepository>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let repo = Arc::new(SeaOrmRepository::new(db));
        Self {
            departments: Arc::new(DepartmentService::new(Arc::clone(&repo))),
            employees: Arc::new(EmployeeService::new(repo)),
        }
    }
}
