//! Repository implementations: the SeaORM-backed store used by the server and
//! an in-memory directory for tests and doc examples.

pub mod memory;
pub mod seaorm;

pub use memory::InMemoryDirectory;
pub use seaorm::SeaOrmRepository;
