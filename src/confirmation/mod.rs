#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod error;
pub mod translate;


pub use error::ConfirmationError;

use crate::journal::Journaled;
use crate::ports::{AccountDirectory, AccountId, Notification, Notifier, Receipt, Recipient};
use chrono::{DateTime, Utc};
use futures_util::TryFutureExt;
use itertools::Itertools;
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, warn};
use uuid::Uuid;

pub type ConfirmFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ConfirmationRecord, ConfirmationError>> + Send + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    account_id: AccountId,
    reference: String,
}

impl ConfirmationRequest {
    #[must_use]
    pub fn new(account_id: AccountId, reference: impl Into<String>) -> Self {
        Self {
            account_id,
            reference: reference.into(),
        }
    }

    #[must_use]
    pub const fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

/// What the caller gets back once a confirmation went out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationRecord {
    pub account_id: AccountId,
    pub reference: String,
    pub delivered_to: String,
    pub message_id: Uuid,
    pub digest: String,
    pub confirmed_at: DateTime<Utc>,
}

impl ConfirmationRecord {
    fn from_receipt(request: &ConfirmationRequest, recipient: &Recipient, receipt: Receipt) -> Self {
        Self {
            account_id: request.account_id().clone(),
            reference: request.reference().to_string(),
            delivered_to: recipient.address().to_string(),
            message_id: receipt.message_id(),
            confirmed_at: receipt.accepted_at(),
            digest: receipt.digest().to_string(),
        }
    }
}

/// Steps attempted by one confirmation, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    DirectoryLookup,
    ConsentCheck,
    NotificationDispatch,
}

impl Step {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DirectoryLookup => "directory-lookup",
            Self::ConsentCheck => "consent-check",
            Self::NotificationDispatch => "notification-dispatch",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Business interface consumed by usecases. Nothing about ports leaks here.
pub trait Confirmer {
    fn confirm<'a>(&'a self, request: &'a ConfirmationRequest) -> ConfirmFuture<'a>;
}

pub struct ConfirmationService<D, N> {
    directory: D,
    notifier: N,
}

impl<D, N> ConfirmationService<D, N>
where
    D: AccountDirectory + Sync,
    N: Notifier + Sync,
{
    #[must_use]
    pub const fn new(directory: D, notifier: N) -> Self {
        Self {
            directory,
            notifier,
        }
    }

    /// Resolve the account, require consent, then send the confirmation.
    ///
    /// The first failing step ends the run: later ports are not called and
    /// no partial record is produced. The journal lists every step attempted.
    pub async fn confirm_journaled(
        &self,
        request: &ConfirmationRequest,
    ) -> Journaled<ConfirmationRecord, ConfirmationError, Step> {
        let resolved = self
            .directory
            .resolve(request.account_id())
            .map_err(translate::from_directory)
            .await;

        let (checked, journal) = Journaled::from_result(resolved)
            .record(Step::DirectoryLookup)
            .and_then(require_consent)
            .into_parts();
        let recipient = match checked {
            Ok(recipient) => recipient,
            Err(error) => return Journaled::from_parts(Err(error), journal),
        };

        let notification = compose(request, &recipient);
        let sent = self
            .notifier
            .send(&notification)
            .map_err(translate::from_notifier)
            .await;

        Journaled::from_parts(sent, journal)
            .record(Step::NotificationDispatch)
            .map(|receipt| ConfirmationRecord::from_receipt(request, &recipient, receipt))
    }
}

impl<D, N> Confirmer for ConfirmationService<D, N>
where
    D: AccountDirectory + Sync,
    N: Notifier + Sync,
{
    fn confirm<'a>(&'a self, request: &'a ConfirmationRequest) -> ConfirmFuture<'a> {
        Box::pin(async move {
            let journaled = self.confirm_journaled(request).await;
            if let Err(error) = journaled.outcome() {
                warn!("confirmation for {} failed: {}", request.account_id(), error.code());
            }
            journaled.flush(|steps| {
                debug!(
                    "confirmation {} steps: {}",
                    request.reference(),
                    steps.iter().join(" -> ")
                );
            })
        })
    }
}

fn require_consent(recipient: Recipient) -> Journaled<Recipient, ConfirmationError, Step> {
    let checked = if recipient.consented() {
        Ok(recipient)
    } else {
        Err(ConfirmationError::ConsentMissing(
            recipient.account_id().clone(),
        ))
    };
    Journaled::from_result(checked).record(Step::ConsentCheck)
}

fn compose(request: &ConfirmationRequest, recipient: &Recipient) -> Notification {
    Notification::new(
        recipient.address(),
        format!("Order {} confirmed", request.reference()),
        format!(
            "Hello {},\n\nyour order {} has been confirmed.\n",
            recipient.display_name(),
            request.reference()
        ),
    )
}
