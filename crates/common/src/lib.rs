//! Types and helpers shared by the service and server crates.

pub mod types;
pub mod utils;
