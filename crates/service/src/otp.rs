//! One-time codes for password reset and public status lookup.
//!
//! Only the SHA-256 digest of a code is persisted. Issuing a code consumes
//! every outstanding code for the same email and purpose, so at most one is
//! ever live.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::Rng;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use common::crypto::{digest_secret, signatures_match};
use models::otp_token;
use models::status::OtpPurpose;
use models::validation::normalize_email;

use crate::errors::ServiceError;
use crate::mailer::Mailer;

#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Mark every unconsumed code for `(email, purpose)` as consumed.
    async fn invalidate_otps(&self, email: &str, purpose: OtpPurpose) -> Result<(), ServiceError>;
    async fn insert_otp(&self, token: otp_token::Model) -> Result<otp_token::Model, ServiceError>;
    /// Newest unconsumed code for `(email, purpose)`.
    async fn latest_otp(&self, email: &str, purpose: OtpPurpose) -> Result<Option<otp_token::Model>, ServiceError>;
    async fn save_otp(&self, token: otp_token::Model) -> Result<otp_token::Model, ServiceError>;
}

#[derive(Clone, Debug)]
pub struct OtpPolicy {
    pub length: usize,
    pub ttl_minutes: i64,
    pub max_attempts: i32,
}

impl From<&configs::OtpConfig> for OtpPolicy {
    fn from(c: &configs::OtpConfig) -> Self {
        Self { length: c.length, ttl_minutes: c.ttl_minutes, max_attempts: c.max_attempts }
    }
}

impl Default for OtpPolicy {
    fn default() -> Self { (&configs::OtpConfig::default()).into() }
}

#[derive(Clone, Debug, Serialize)]
pub struct OtpIssued {
    pub email: String,
    pub expires_at: DateTimeWithTimeZone,
}

/// Random numeric code of `len` digits.
pub fn generate_code(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect()
}

const INVALID_CODE: &str = "invalid or expired code";

pub struct OtpService {
    repo: Arc<dyn OtpRepository>,
    mailer: Arc<dyn Mailer>,
    policy: OtpPolicy,
}

impl OtpService {
    pub fn new(repo: Arc<dyn OtpRepository>, mailer: Arc<dyn Mailer>, policy: OtpPolicy) -> Self {
        Self { repo, mailer, policy }
    }

    /// Create and mail a fresh code. `subject` binds the code to an extra
    /// value that must be presented again on verification.
    #[instrument(skip(self), fields(purpose = ?purpose))]
    pub async fn issue(&self, email: &str, subject: Option<&str>, purpose: OtpPurpose) -> Result<OtpIssued, ServiceError> {
        let email = normalize_email(email);
        self.repo.invalidate_otps(&email, purpose).await?;

        let code = generate_code(self.policy.length);
        let now = Utc::now();
        let expires_at: DateTimeWithTimeZone = (now + Duration::minutes(self.policy.ttl_minutes)).into();
        self.repo
            .insert_otp(otp_token::Model {
                id: Uuid::new_v4(),
                email: email.clone(),
                subject: subject.map(str::to_string),
                purpose,
                code_hash: digest_secret(&code),
                attempts: 0,
                expires_at,
                consumed_at: None,
                created_at: now.into(),
            })
            .await?;

        let body = format!(
            "Your NoiseSentinel verification code is {}. It expires in {} minutes.",
            code, self.policy.ttl_minutes
        );
        self.mailer.send(&email, "NoiseSentinel verification code", &body).await?;
        info!(email = %email, "otp_issued");
        Ok(OtpIssued { email, expires_at })
    }

    /// Check a code and consume it on success. Mismatches count toward the
    /// attempt limit; an exhausted code never verifies again.
    #[instrument(skip(self, code), fields(purpose = ?purpose))]
    pub async fn verify(&self, email: &str, subject: Option<&str>, purpose: OtpPurpose, code: &str) -> Result<(), ServiceError> {
        let email = normalize_email(email);
        let mut token = self
            .repo
            .latest_otp(&email, purpose)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized(INVALID_CODE.into()))?;

        let now: DateTimeWithTimeZone = Utc::now().into();
        if token.expires_at <= now {
            return Err(ServiceError::Unauthorized(INVALID_CODE.into()));
        }
        if token.attempts >= self.policy.max_attempts {
            return Err(ServiceError::Unauthorized("too many attempts; request a new code".into()));
        }

        let subject_ok = match subject {
            Some(s) => token.subject.as_deref() == Some(s),
            None => true,
        };
        if !subject_ok || !signatures_match(&token.code_hash, &digest_secret(code.trim())) {
            token.attempts += 1;
            let attempts = token.attempts;
            self.repo.save_otp(token).await?;
            warn!(email = %email, attempts, "otp_mismatch");
            return Err(ServiceError::Unauthorized(INVALID_CODE.into()));
        }

        token.consumed_at = Some(now);
        self.repo.save_otp(token).await?;
        Ok(())
    }
}

/// Pull the digits out of a mailed code message.
#[cfg(test)]
pub(crate) fn code_from_body(body: &str) -> String {
    body.split_whitespace()
        .find(|w| w.trim_end_matches('.').chars().all(|c| c.is_ascii_digit()) && w.len() > 3)
        .map(|w| w.trim_end_matches('.').to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mailer::RecordingMailer;
    use crate::repo::memory::InMemoryRepository;

    fn service(policy: OtpPolicy) -> (OtpService, Arc<RecordingMailer>) {
        let mailer = Arc::new(RecordingMailer::default());
        let svc = OtpService::new(Arc::new(InMemoryRepository::default()), mailer.clone(), policy);
        (svc, mailer)
    }

    #[test]
    fn generated_codes_have_requested_length() {
        let code = generate_code(6);
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn code_verifies_once() {
        let (svc, mailer) = service(OtpPolicy::default());
        svc.issue("Citizen@Example.com", None, OtpPurpose::PasswordReset).await.unwrap();
        let code = code_from_body(&mailer.last_body_for("citizen@example.com").unwrap());
        assert_eq!(code.len(), 6);

        svc.verify("citizen@example.com", None, OtpPurpose::PasswordReset, &code).await.unwrap();
        let again = svc.verify("citizen@example.com", None, OtpPurpose::PasswordReset, &code).await;
        assert!(matches!(again, Err(ServiceError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn reissue_invalidates_previous_code() {
        let (svc, mailer) = service(OtpPolicy::default());
        svc.issue("a@b.pk", None, OtpPurpose::PasswordReset).await.unwrap();
        let first = code_from_body(&mailer.last_body_for("a@b.pk").unwrap());
        svc.issue("a@b.pk", None, OtpPurpose::PasswordReset).await.unwrap();
        let second = code_from_body(&mailer.last_body_for("a@b.pk").unwrap());

        if first != second {
            assert!(svc.verify("a@b.pk", None, OtpPurpose::PasswordReset, &first).await.is_err());
        }
        svc.verify("a@b.pk", None, OtpPurpose::PasswordReset, &second).await.unwrap();
    }

    #[tokio::test]
    async fn attempts_are_capped() {
        let (svc, mailer) = service(OtpPolicy { max_attempts: 2, ..OtpPolicy::default() });
        svc.issue("a@b.pk", None, OtpPurpose::StatusLookup).await.unwrap();
        let code = code_from_body(&mailer.last_body_for("a@b.pk").unwrap());
        let wrong = "not-a-code";

        assert!(svc.verify("a@b.pk", None, OtpPurpose::StatusLookup, wrong).await.is_err());
        assert!(svc.verify("a@b.pk", None, OtpPurpose::StatusLookup, wrong).await.is_err());
        let locked = svc.verify("a@b.pk", None, OtpPurpose::StatusLookup, &code).await;
        assert!(matches!(locked, Err(ServiceError::Unauthorized(m)) if m.contains("too many")));
    }

    #[tokio::test]
    async fn subject_must_match() {
        let (svc, mailer) = service(OtpPolicy::default());
        svc.issue("a@b.pk", Some("35202-1234567-1"), OtpPurpose::StatusLookup).await.unwrap();
        let code = code_from_body(&mailer.last_body_for("a@b.pk").unwrap());
        let other = svc.verify("a@b.pk", Some("35202-7654321-1"), OtpPurpose::StatusLookup, &code).await;
        assert!(other.is_err());
        svc.verify("a@b.pk", Some("35202-1234567-1"), OtpPurpose::StatusLookup, &code).await.unwrap();
    }

    #[tokio::test]
    async fn purposes_are_isolated() {
        let (svc, mailer) = service(OtpPolicy::default());
        svc.issue("a@b.pk", None, OtpPurpose::PasswordReset).await.unwrap();
        let code = code_from_body(&mailer.last_body_for("a@b.pk").unwrap());
        assert!(svc.verify("a@b.pk", None, OtpPurpose::StatusLookup, &code).await.is_err());
    }
}
