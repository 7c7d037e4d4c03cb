#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::{duration_ms, payload_digest};
use crate::ports::{Notification, Notifier, NotifyError, PortFuture, Receipt};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// On-disk form of an accepted notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxMessage {
    pub message_id: Uuid,
    pub accepted_at: DateTime<Utc>,
    pub address: String,
    pub subject: String,
    pub body: String,
    pub digest: String,
}

/// Notifier that drops each notification as a JSON file into the
/// recipient's mailbox directory under `root`.
///
/// A recipient is reachable only when its mailbox directory exists.
#[derive(Debug, Clone)]
pub struct OutboxNotifier {
    root: PathBuf,
    max_payload_bytes: usize,
    timeout: Duration,
}

impl OutboxNotifier {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, max_payload_bytes: usize, timeout: Duration) -> Self {
        Self {
            root: root.into(),
            max_payload_bytes,
            timeout,
        }
    }

    /// Mailbox directory for `address`, or `None` when the address cannot
    /// name a directory inside the outbox.
    #[must_use]
    pub fn mailbox(&self, address: &str) -> Option<PathBuf> {
        mailbox_name(address).map(|name| self.root.join(name))
    }

    async fn deliver(&self, notification: &Notification) -> Result<Receipt, NotifyError> {
        if !is_dir(&self.root).await {
            return Err(NotifyError::Unavailable(format!(
                "outbox {} does not exist",
                self.root.display()
            )));
        }

        let unreachable =
            || NotifyError::RecipientUnreachable(notification.address().to_string());
        let mailbox = self
            .mailbox(notification.address())
            .ok_or_else(unreachable)?;
        if !is_dir(&mailbox).await {
            return Err(unreachable());
        }

        let message = OutboxMessage {
            message_id: Uuid::new_v4(),
            accepted_at: Utc::now(),
            address: notification.address().to_string(),
            subject: notification.subject().to_string(),
            body: notification.body().to_string(),
            digest: payload_digest(notification),
        };
        let encoded = serde_json::to_vec_pretty(&message)
            .map_err(|e| NotifyError::Unavailable(format!("encoding failed: {e}")))?;
        let target = mailbox.join(format!("{}.json", message.message_id));
        tokio::fs::write(&target, encoded)
            .await
            .map_err(|e| NotifyError::Unavailable(format!("{}: {e}", target.display())))?;

        debug!("wrote {}", target.display());
        Ok(Receipt::new(
            message.message_id,
            message.accepted_at,
            message.digest,
        ))
    }
}

impl Notifier for OutboxNotifier {
    fn send<'a>(&'a self, notification: &'a Notification) -> PortFuture<'a, Receipt, NotifyError> {
        Box::pin(async move {
            let size = notification.payload_len();
            if size > self.max_payload_bytes {
                return Err(NotifyError::PayloadTooLarge {
                    size,
                    limit: self.max_payload_bytes,
                });
            }

            let receipt = tokio::time::timeout(self.timeout, self.deliver(notification))
                .await
                .map_err(|_| NotifyError::TimedOut {
                    after_ms: duration_ms(self.timeout),
                })??;
            info!(
                "outbox accepted {} for {}",
                receipt.message_id(),
                notification.address()
            );
            Ok(receipt)
        })
    }
}

/// Directory name used for an address. Path separators and other unusual
/// characters collapse to `_`. An address without any alphanumeric
/// character (empty, `.`, `..`) has no mailbox.
fn mailbox_name(address: &str) -> Option<String> {
    if !address.chars().any(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    let name: String = address
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '-' | '_' | '+') {
                c
            } else {
                '_'
            }
        })
        .collect();
    Some(name)
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}
