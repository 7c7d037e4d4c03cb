#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::PortFuture;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    address: String,
    subject: String,
    body: String,
}

impl Notification {
    #[must_use]
    pub fn new(address: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Size in bytes counted against a notifier's payload limit.
    #[must_use]
    pub fn payload_len(&self) -> usize {
        self.subject.len() + self.body.len()
    }
}

/// Proof that a notifier accepted a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    message_id: Uuid,
    accepted_at: DateTime<Utc>,
    digest: String,
}

impl Receipt {
    #[must_use]
    pub fn new(message_id: Uuid, accepted_at: DateTime<Utc>, digest: impl Into<String>) -> Self {
        Self {
            message_id,
            accepted_at,
            digest: digest.into(),
        }
    }

    #[must_use]
    pub const fn message_id(&self) -> Uuid {
        self.message_id
    }

    #[must_use]
    pub const fn accepted_at(&self) -> DateTime<Utc> {
        self.accepted_at
    }

    #[must_use]
    pub fn digest(&self) -> &str {
        &self.digest
    }
}

/// Everything a `Notifier` implementation may fail with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("recipient unreachable: {0}")]
    RecipientUnreachable(String),

    #[error("payload of {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("notifier unavailable: {0}")]
    Unavailable(String),

    #[error("notifier timed out after {after_ms}ms")]
    TimedOut { after_ms: u64 },
}

impl NotifyError {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::RecipientUnreachable(_) => "NOTIFY_UNREACHABLE",
            Self::PayloadTooLarge { .. } => "NOTIFY_PAYLOAD_TOO_LARGE",
            Self::Unavailable(_) => "NOTIFY_UNAVAILABLE",
            Self::TimedOut { .. } => "NOTIFY_TIMEOUT",
        }
    }
}

pub trait Notifier {
    fn send<'a>(&'a self, notification: &'a Notification) -> PortFuture<'a, Receipt, NotifyError>;
}
