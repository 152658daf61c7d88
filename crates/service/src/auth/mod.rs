//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Login, account creation, password changes and OTP-backed password resets
//! live here. Tokens are HS256 JWTs carrying the caller's role.

pub mod domain;
pub mod errors;
pub mod password;
pub mod token;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
