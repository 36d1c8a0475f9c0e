//! Department module: domain types, repository contract and service.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::DepartmentService;
