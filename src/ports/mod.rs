#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

//! Driven ports. Each port declares its success types, its method
//! signatures and its own closed error set in one place.

mod directory;
mod notifier;

pub use directory::{AccountDirectory, AccountId, DirectoryError, Recipient};
pub use notifier::{Notification, Notifier, NotifyError, Receipt};

use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by every port method, carrying that port's error set.
pub type PortFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;
