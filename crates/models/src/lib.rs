//! SeaORM entities for the staff directory plus the field-level validation
//! rules shared by every write path.

pub mod errors;
pub mod db;
pub mod department;
pub mod employee;
