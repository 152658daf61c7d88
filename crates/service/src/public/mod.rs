//! Unauthenticated status lookup for citizens, gated by an emailed code.

pub mod domain;
pub mod repository;
pub mod service;

pub use repository::PublicRepository;
pub use service::PublicService;
