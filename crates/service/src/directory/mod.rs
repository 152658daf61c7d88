//! Admin-maintained reference data: stations, officers, devices,
//! violations, courts and judges.

pub mod repository;
pub mod service;

pub use repository::DirectoryRepository;
pub use service::DirectoryService;
