#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::PortFuture;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contact data for an account, as the directory knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    account_id: AccountId,
    address: String,
    display_name: String,
    consented: bool,
}

impl Recipient {
    #[must_use]
    pub fn new(
        account_id: AccountId,
        address: impl Into<String>,
        display_name: impl Into<String>,
        consented: bool,
    ) -> Self {
        Self {
            account_id,
            address: address.into(),
            display_name: display_name.into(),
            consented,
        }
    }

    #[must_use]
    pub const fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub const fn consented(&self) -> bool {
        self.consented
    }
}

/// Everything an `AccountDirectory` implementation may fail with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("account {0} not found")]
    AccountNotFound(AccountId),

    #[error("directory rejected the access key")]
    BadCredentials,

    #[error("directory disconnected: {0}")]
    Disconnected(String),

    #[error("directory lookup timed out after {after_ms}ms")]
    TimedOut { after_ms: u64 },

    #[error("directory returned malformed data: {0}")]
    Malformed(String),
}

impl DirectoryError {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "DIRECTORY_NOT_FOUND",
            Self::BadCredentials => "DIRECTORY_BAD_CREDENTIALS",
            Self::Disconnected(_) => "DIRECTORY_DISCONNECTED",
            Self::TimedOut { .. } => "DIRECTORY_TIMEOUT",
            Self::Malformed(_) => "DIRECTORY_MALFORMED",
        }
    }
}

pub trait AccountDirectory {
    fn resolve<'a>(&'a self, account_id: &'a AccountId) -> PortFuture<'a, Recipient, DirectoryError>;
}
