//! Signed noise and gas readings captured by roadside devices.

pub mod domain;
pub mod repository;
pub mod service;

pub use repository::EmissionRepository;
pub use service::{EmissionPolicy, EmissionService};
