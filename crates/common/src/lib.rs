//! Shared building blocks for the NoiseSentinel workspace: logging setup,
//! the response envelope, and the field-digest signature helpers.

pub mod types;
pub mod crypto;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }
}
