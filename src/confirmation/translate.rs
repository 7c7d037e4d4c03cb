#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

//! Port error sets mapped onto `ConfirmationError`.
//!
//! Both functions match without a wildcard arm, so a variant added to a
//! port's error set fails to compile here until it gets a destination.

use super::ConfirmationError;
use crate::ports::{DirectoryError, NotifyError};

#[must_use]
pub fn from_directory(error: DirectoryError) -> ConfirmationError {
    match error {
        DirectoryError::AccountNotFound(account_id) => ConfirmationError::UnknownAccount(account_id),
        DirectoryError::BadCredentials => {
            ConfirmationError::NotAllowed("bad credentials".to_string())
        }
        DirectoryError::Disconnected(_) | DirectoryError::TimedOut { .. } => {
            ConfirmationError::RetryLater("account directory unavailable".to_string())
        }
        DirectoryError::Malformed(_) => {
            ConfirmationError::Internal("account directory returned unreadable data".to_string())
        }
    }
}

#[must_use]
pub fn from_notifier(error: NotifyError) -> ConfirmationError {
    match error {
        NotifyError::RecipientUnreachable(address) => {
            ConfirmationError::NotificationFailed(format!("{address} is unreachable"))
        }
        NotifyError::PayloadTooLarge { size, limit } => ConfirmationError::Internal(format!(
            "confirmation message is {size} bytes, notifier accepts {limit}"
        )),
        NotifyError::Unavailable(_) | NotifyError::TimedOut { .. } => {
            ConfirmationError::RetryLater("notification channel unavailable".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::AccountId;

    #[test]
    fn every_directory_error_has_one_destination() {
        let cases = [
            (
                DirectoryError::AccountNotFound(AccountId::new("acc-1")),
                "UNKNOWN_ACCOUNT",
            ),
            (DirectoryError::BadCredentials, "NOT_ALLOWED"),
            (DirectoryError::Disconnected("eof".to_string()), "RETRY_LATER"),
            (DirectoryError::TimedOut { after_ms: 10 }, "RETRY_LATER"),
            (DirectoryError::Malformed("bad json".to_string()), "INTERNAL"),
        ];

        for (source, expected) in cases {
            let label = source.code();
            assert_eq!(
                from_directory(source).code(),
                expected,
                "{label} should map to {expected}"
            );
        }
    }

    #[test]
    fn every_notify_error_has_one_destination() {
        let cases = [
            (
                NotifyError::RecipientUnreachable("a@b".to_string()),
                "NOTIFICATION_FAILED",
            ),
            (NotifyError::PayloadTooLarge { size: 9, limit: 1 }, "INTERNAL"),
            (NotifyError::Unavailable("down".to_string()), "RETRY_LATER"),
            (NotifyError::TimedOut { after_ms: 10 }, "RETRY_LATER"),
        ];

        for (source, expected) in cases {
            let label = source.code();
            assert_eq!(
                from_notifier(source).code(),
                expected,
                "{label} should map to {expected}"
            );
        }
    }

    #[test]
    fn unknown_account_keeps_the_account_id() {
        let id = AccountId::new("acc-77");
        assert_eq!(
            from_directory(DirectoryError::AccountNotFound(id.clone())),
            ConfirmationError::UnknownAccount(id)
        );
    }

    #[test]
    fn transport_detail_does_not_leak_into_retry_message() {
        let translated = from_directory(DirectoryError::Disconnected("tcp reset by 10.0.0.4".to_string()));
        assert!(!translated.to_string().contains("10.0.0.4"));
    }

    #[test]
    fn parse_detail_does_not_leak_into_internal_message() {
        let translated = from_directory(DirectoryError::Malformed(
            "expected value at line 1 column 3".to_string(),
        ));
        assert_eq!(
            translated,
            ConfirmationError::Internal("account directory returned unreadable data".to_string())
        );
    }
}
