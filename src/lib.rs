pub mod adapters;
pub mod config;
pub mod confirmation;
pub mod error;
pub mod journal;
pub mod outcome;
pub mod ports;
pub mod usecase;

pub use confirmation::{
    ConfirmationError, ConfirmationRecord, ConfirmationRequest, ConfirmationService, Confirmer,
};
pub use error::{AppError, Result};
pub use journal::Journaled;
pub use outcome::OutcomeExt;
pub use usecase::{Reaction, SendConfirmation};
