//! Service layer for the enforcement workflow.
//! - Business rules live here; persistence sits behind repository traits.
//! - `repo::seaorm` talks to PostgreSQL, `repo::memory` backs unit tests.
//! - Validation and entity definitions are reused from the `models` crate.

pub mod errors;
pub mod pagination;
pub mod lookup;
pub mod mailer;
pub mod otp;
pub mod verification;
pub mod auth;
pub mod directory;
pub mod emission;
pub mod challan;
pub mod fir;
pub mod case;
pub mod public;
pub mod repo;
#[cfg(test)]
pub mod test_support;
