//! First Information Reports filed against cognizable challans.

pub mod domain;
pub mod repository;
pub mod service;

pub use repository::FirRepository;
pub use service::FirService;
