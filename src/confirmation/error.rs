#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::ports::AccountId;
use thiserror::Error;

/// The closed set of failures the confirmation service publishes.
///
/// One flat set: callers never see which port a failure came from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationError {
    #[error("temporarily unable to confirm, retry later: {0}")]
    RetryLater(String),

    #[error("not allowed: {0}")]
    NotAllowed(String),

    #[error("unknown account {0}")]
    UnknownAccount(AccountId),

    #[error("account {0} has not consented to notifications")]
    ConsentMissing(AccountId),

    #[error("notification could not be delivered: {0}")]
    NotificationFailed(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ConfirmationError {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::RetryLater(_) => "RETRY_LATER",
            Self::NotAllowed(_) => "NOT_ALLOWED",
            Self::UnknownAccount(_) => "UNKNOWN_ACCOUNT",
            Self::ConsentMissing(_) => "CONSENT_MISSING",
            Self::NotificationFailed(_) => "NOTIFICATION_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}
