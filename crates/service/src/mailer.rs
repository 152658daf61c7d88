//! Outbound mail seam. Codes are only ever delivered through a `Mailer`.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::errors::ServiceError;

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ServiceError>;
}

/// Writes mail to the log instead of delivering it.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ServiceError> {
        info!(to = %to, subject = %subject, "mail_dispatched");
        debug!(to = %to, body = %body, "mail_body");
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Keeps every message in memory; used by tests to read issued codes.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Body of the newest message sent to `to`.
    pub fn last_body_for(&self, to: &str) -> Option<String> {
        self.sent().into_iter().rev().find(|m| m.to == to).map(|m| m.body)
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ServiceError> {
        let mut sent = self.sent.lock().map_err(|_| ServiceError::Db("mailer lock poisoned".into()))?;
        sent.push(SentMail { to: to.to_string(), subject: subject.to_string(), body: body.to_string() });
        Ok(())
    }
}
