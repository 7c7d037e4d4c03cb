#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod json_directory;
mod memory;
mod outbox;

pub use json_directory::JsonFileDirectory;
pub use memory::{InMemoryDirectory, InMemoryNotifier};
pub use outbox::{OutboxMessage, OutboxNotifier};

use crate::ports::Notification;
use sha2::{Digest, Sha256};
use std::time::Duration;

/// Hex sha256 over address, subject and body.
pub(crate) fn payload_digest(notification: &Notification) -> String {
    let mut hasher = Sha256::new();
    hasher.update(notification.address().as_bytes());
    hasher.update([0u8]);
    hasher.update(notification.subject().as_bytes());
    hasher.update([0u8]);
    hasher.update(notification.body().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
pub(crate) fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).map_or(u64::MAX, |value| value)
}
