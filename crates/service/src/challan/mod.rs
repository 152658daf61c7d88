//! Challans: traffic citations issued against a vehicle and its driver.

pub mod domain;
pub mod repository;
pub mod service;

pub use repository::ChallanRepository;
pub use service::{ChallanPolicy, ChallanService};
