//! Service layer providing the department/employee business rules on top of models.
//! - Separates business logic from data access through repository traits.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod department;
pub mod employee;
pub mod repo;
pub mod db;
#[cfg(test)]
pub mod test_support;

pub use department::DepartmentService;
pub use employee::EmployeeService;
