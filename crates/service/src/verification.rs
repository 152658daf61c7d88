//! Result of recomputing a stored record signature.

use serde::Serialize;
use uuid::Uuid;

use common::crypto::signatures_match;

#[derive(Clone, Debug, Serialize)]
pub struct SignatureCheck {
    pub record_id: Uuid,
    pub is_valid: bool,
    pub stored_signature: String,
    pub computed_signature: String,
}

impl SignatureCheck {
    pub fn new(record_id: Uuid, stored: &str, computed: String) -> Self {
        Self {
            record_id,
            is_valid: signatures_match(stored, &computed),
            stored_signature: stored.to_string(),
            computed_signature: computed,
        }
    }
}

pub fn check_emission_report(r: &models::emission_report::Model) -> SignatureCheck {
    SignatureCheck::new(r.id, &r.digital_signature, r.compute_signature())
}

pub fn check_challan(c: &models::challan::Model) -> SignatureCheck {
    SignatureCheck::new(c.id, &c.digital_signature, c.compute_signature())
}
