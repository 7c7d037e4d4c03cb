#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::confirmation::{ConfirmationError, ConfirmationRecord, ConfirmationRequest, Confirmer};
use crate::ports::AccountId;
use serde::Serialize;
use tap::{Pipe, Tap};
use tracing::{info, warn};

/// How the application reacts to one confirmation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reaction", rename_all = "snake_case")]
pub enum Reaction {
    Confirmed { record: ConfirmationRecord },
    ScheduleRetry { reason: String },
    Deny { reason: String },
    UnknownAccount { account_id: AccountId },
    RequestConsent { account_id: AccountId },
    ReportUndeliverable { reason: String },
    Escalate { reason: String },
}

impl Reaction {
    /// Map a service outcome onto a reaction. Every `ConfirmationError`
    /// variant has its own arm; there is no catch-all.
    #[must_use]
    pub fn from_outcome(outcome: Result<ConfirmationRecord, ConfirmationError>) -> Self {
        match outcome {
            Ok(record) => Self::Confirmed { record },
            Err(ConfirmationError::RetryLater(reason)) => Self::ScheduleRetry { reason },
            Err(ConfirmationError::NotAllowed(reason)) => Self::Deny { reason },
            Err(ConfirmationError::UnknownAccount(account_id)) => {
                Self::UnknownAccount { account_id }
            }
            Err(ConfirmationError::ConsentMissing(account_id)) => {
                Self::RequestConsent { account_id }
            }
            Err(ConfirmationError::NotificationFailed(reason)) => {
                Self::ReportUndeliverable { reason }
            }
            Err(ConfirmationError::Internal(reason)) => Self::Escalate { reason },
        }
    }

    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }

    /// Process exit code for the CLI.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Confirmed { .. } => 0,
            Self::ScheduleRetry { .. } => 75,
            Self::Deny { .. } => 77,
            Self::UnknownAccount { .. } => 67,
            Self::RequestConsent { .. } => 65,
            Self::ReportUndeliverable { .. } => 69,
            Self::Escalate { .. } => 70,
        }
    }

    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Confirmed { record } => format!(
                "confirmation {} sent to {}",
                record.message_id, record.delivered_to
            ),
            Self::ScheduleRetry { reason } => format!("retry scheduled: {reason}"),
            Self::Deny { reason } => format!("denied: {reason}"),
            Self::UnknownAccount { account_id } => format!("no such account: {account_id}"),
            Self::RequestConsent { account_id } => {
                format!("asking {account_id} for notification consent")
            }
            Self::ReportUndeliverable { reason } => format!("undeliverable: {reason}"),
            Self::Escalate { reason } => format!("escalated to operators: {reason}"),
        }
    }
}

/// Send one order confirmation and decide what happens next.
pub struct SendConfirmation<S> {
    service: S,
}

impl<S> SendConfirmation<S>
where
    S: Confirmer + Sync,
{
    #[must_use]
    pub const fn new(service: S) -> Self {
        Self { service }
    }

    pub async fn execute(&self, request: &ConfirmationRequest) -> Reaction {
        self.service
            .confirm(request)
            .await
            .pipe(Reaction::from_outcome)
            .tap(|reaction| {
                if reaction.is_confirmed() {
                    info!("{}: {}", request.reference(), reaction.summary());
                } else {
                    warn!("{}: {}", request.reference(), reaction.summary());
                }
            })
    }
}
