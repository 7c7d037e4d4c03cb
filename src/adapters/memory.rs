#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::payload_digest;
use crate::ports::{
    AccountDirectory, AccountId, DirectoryError, Notification, Notifier, NotifyError, PortFuture,
    Receipt, Recipient,
};
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// Directory backed by a map. A configured failure is returned for every lookup.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    recipients: HashMap<AccountId, Recipient>,
    failure: Option<DirectoryError>,
}

impl InMemoryDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_recipient(mut self, recipient: Recipient) -> Self {
        self.recipients
            .insert(recipient.account_id().clone(), recipient);
        self
    }

    #[must_use]
    pub fn failing_with(mut self, error: DirectoryError) -> Self {
        self.failure = Some(error);
        self
    }
}

impl AccountDirectory for InMemoryDirectory {
    fn resolve<'a>(
        &'a self,
        account_id: &'a AccountId,
    ) -> PortFuture<'a, Recipient, DirectoryError> {
        Box::pin(async move {
            if let Some(error) = &self.failure {
                return Err(error.clone());
            }
            self.recipients
                .get(account_id)
                .cloned()
                .ok_or_else(|| DirectoryError::AccountNotFound(account_id.clone()))
        })
    }
}

/// Notifier that keeps accepted notifications in memory.
#[derive(Debug)]
pub struct InMemoryNotifier {
    sent: Mutex<Vec<Notification>>,
    unreachable: HashSet<String>,
    max_payload_bytes: usize,
    failure: Option<NotifyError>,
}

impl Default for InMemoryNotifier {
    fn default() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            unreachable: HashSet::new(),
            max_payload_bytes: usize::MAX,
            failure: None,
        }
    }
}

impl InMemoryNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_payload_limit(mut self, max_payload_bytes: usize) -> Self {
        self.max_payload_bytes = max_payload_bytes;
        self
    }

    #[must_use]
    pub fn with_unreachable(mut self, address: impl Into<String>) -> Self {
        self.unreachable.insert(address.into());
        self
    }

    #[must_use]
    pub fn failing_with(mut self, error: NotifyError) -> Self {
        self.failure = Some(error);
        self
    }

    pub async fn sent(&self) -> Vec<Notification> {
        self.sent.lock().await.clone()
    }
}

impl Notifier for InMemoryNotifier {
    fn send<'a>(&'a self, notification: &'a Notification) -> PortFuture<'a, Receipt, NotifyError> {
        Box::pin(async move {
            if let Some(error) = &self.failure {
                return Err(error.clone());
            }
            if self.unreachable.contains(notification.address()) {
                return Err(NotifyError::RecipientUnreachable(
                    notification.address().to_string(),
                ));
            }
            let size = notification.payload_len();
            if size > self.max_payload_bytes {
                return Err(NotifyError::PayloadTooLarge {
                    size,
                    limit: self.max_payload_bytes,
                });
            }

            self.sent.lock().await.push(notification.clone());
            let receipt = Receipt::new(Uuid::new_v4(), Utc::now(), payload_digest(notification));
            debug!(
                "in-memory notifier accepted {} for {}",
                receipt.message_id(),
                notification.address()
            );
            Ok(receipt)
        })
    }
}
