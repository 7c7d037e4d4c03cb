#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::duration_ms;
use crate::ports::{AccountDirectory, AccountId, DirectoryError, PortFuture, Recipient};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct DirectoryFile {
    access_key: String,
    #[serde(default)]
    accounts: Vec<Recipient>,
}

/// Directory read from a JSON document on every lookup.
///
/// The document must carry the same `access_key` this adapter was built
/// with; a mismatch is reported as `BadCredentials`.
#[derive(Debug, Clone)]
pub struct JsonFileDirectory {
    path: PathBuf,
    access_key: String,
    timeout: Duration,
}

impl JsonFileDirectory {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, access_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            access_key: access_key.into(),
            timeout,
        }
    }

    async fn load(&self) -> Result<DirectoryFile, DirectoryError> {
        let read = tokio::time::timeout(self.timeout, tokio::fs::read_to_string(&self.path))
            .await
            .map_err(|_| DirectoryError::TimedOut {
                after_ms: duration_ms(self.timeout),
            })?;

        let content = read.map_err(|e| {
            warn!("directory file {} unreadable: {e}", self.path.display());
            match e.kind() {
                ErrorKind::NotFound => {
                    DirectoryError::Disconnected(format!("{} does not exist", self.path.display()))
                }
                _ => DirectoryError::Disconnected(e.to_string()),
            }
        })?;

        serde_json::from_str(&content).map_err(|e| {
            warn!("directory file {} is not valid: {e}", self.path.display());
            DirectoryError::Malformed(e.to_string())
        })
    }
}

impl AccountDirectory for JsonFileDirectory {
    fn resolve<'a>(
        &'a self,
        account_id: &'a AccountId,
    ) -> PortFuture<'a, Recipient, DirectoryError> {
        Box::pin(async move {
            let file = self.load().await?;
            if file.access_key != self.access_key {
                return Err(DirectoryError::BadCredentials);
            }

            let recipient = file
                .accounts
                .into_iter()
                .find(|recipient| recipient.account_id() == account_id)
                .ok_or_else(|| DirectoryError::AccountNotFound(account_id.clone()))?;
            debug!("resolved {account_id} from {}", self.path.display());
            Ok(recipient)
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::fs;

    const DOCUMENT: &str = r#"{
        "access_key": "k-123",
        "accounts": [
            {"account_id": "acc-1", "address": "alice@example.test", "display_name": "Alice", "consented": true},
            {"account_id": "acc-2", "address": "bob@example.test", "display_name": "Bob", "consented": false}
        ]
    }"#;

    fn directory_with(content: &str, key: &str) -> (tempfile::TempDir, JsonFileDirectory) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("directory.json");
        fs::write(&path, content).unwrap();
        let directory = JsonFileDirectory::new(path, key, Duration::from_secs(2));
        (dir, directory)
    }

    #[tokio::test]
    async fn resolves_account_from_document() {
        let (_dir, directory) = directory_with(DOCUMENT, "k-123");
        let recipient = directory.resolve(&AccountId::new("acc-2")).await.unwrap();
        assert_eq!(recipient.address(), "bob@example.test");
        assert!(!recipient.consented());
    }

    #[tokio::test]
    async fn wrong_key_is_bad_credentials() {
        let (_dir, directory) = directory_with(DOCUMENT, "other");
        assert_eq!(
            directory.resolve(&AccountId::new("acc-1")).await,
            Err(DirectoryError::BadCredentials)
        );
    }

    #[tokio::test]
    async fn unknown_account_is_not_found() {
        let (_dir, directory) = directory_with(DOCUMENT, "k-123");
        let id = AccountId::new("acc-9");
        assert_eq!(
            directory.resolve(&id).await,
            Err(DirectoryError::AccountNotFound(id))
        );
    }

    #[tokio::test]
    async fn missing_file_is_disconnected() {
        let dir = tempfile::tempdir().unwrap();
        let directory =
            JsonFileDirectory::new(dir.path().join("absent.json"), "k", Duration::from_secs(2));
        let result = directory.resolve(&AccountId::new("acc-1")).await;
        assert!(matches!(result, Err(DirectoryError::Disconnected(_))));
    }

    #[tokio::test]
    async fn invalid_json_is_malformed() {
        let (_dir, directory) = directory_with("{ not json", "k-123");
        let result = directory.resolve(&AccountId::new("acc-1")).await;
        assert!(matches!(result, Err(DirectoryError::Malformed(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn read_past_deadline_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("directory.json");
        fs::write(&path, DOCUMENT).unwrap();
        let directory = JsonFileDirectory::new(path, "k-123", Duration::ZERO);

        let result = directory.resolve(&AccountId::new("acc-1")).await;

        assert_eq!(result, Err(DirectoryError::TimedOut { after_ms: 0 }));
    }
}
