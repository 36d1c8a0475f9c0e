//! SeaORM query functions backing the repositories.
//!
//! Every function is generic over the connection so it can run against the
//! pool or inside an open transaction.

pub mod department_store;
pub mod employee_store;
pub mod seed;
