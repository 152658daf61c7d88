//! Record signatures.
//!
//! A signature is the lowercase hex SHA-256 of the record's canonical fields
//! joined with `|`. Verification recomputes the digest and compares it with
//! the stored value.

use sha2::{Digest, Sha256};

const SEPARATOR: &[u8] = b"|";

/// Digest an ordered list of canonical field values.
pub fn digest_fields(fields: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            hasher.update(SEPARATOR);
        }
        hasher.update(field.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Digest of a single secret value (OTP codes, reset tokens).
pub fn digest_secret(value: &str) -> String {
    hex::encode(Sha256::digest(value.as_bytes()))
}

/// Equality check that does not short-circuit on the first differing byte.
pub fn signatures_match(stored: &str, computed: &str) -> bool {
    let a = stored.as_bytes();
    let b = computed.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Canonical text for an optional measurement: the shortest decimal that
/// parses back to the same `f64`, so every stored bit is covered.
pub fn canonical_f64(value: Option<f64>) -> String {
    value.map(|v| format!("{v}")).unwrap_or_default()
}
