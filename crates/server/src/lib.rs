pub mod routes;
pub mod startup;
pub mod state;
pub mod errors;
pub mod openapi;
pub mod extract;

pub use startup::run;
