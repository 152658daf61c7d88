//! Court cases opened from forwarded FIRs.

pub mod domain;
pub mod repository;
pub mod service;

pub use repository::CaseRepository;
pub use service::CaseService;
