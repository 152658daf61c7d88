//! Repository implementations: `seaorm` for PostgreSQL, `memory` for tests
//! and local experiments.

pub mod memory;
pub mod seaorm;

pub use memory::InMemoryRepository;
pub use seaorm::SeaOrmRepository;
