//! Receipt intake: structural validation, points scoring, and the thin service/router
//! layer that stores scores under generated identifiers.
//!
//! Validation and scoring are pure functions of a [`PurchaseRecord`]. Nothing in
//! [`validation`] or [`scoring`] touches the repository; [`ReceiptService`] is the only
//! place the two are composed.

pub mod amount;
pub mod calendar;
pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use amount::{Amount, AmountError};
pub use calendar::{CalendarError, PurchaseDate, PurchaseTime};
pub use domain::{LineItem, PurchaseRecord, ReceiptId};
pub use repository::{ReceiptRepository, RepositoryError, StoredReceipt};
pub use router::receipt_router;
pub use scoring::{score, score_breakdown, PointsBreakdown, ScoreComponent, ScoringRule};
pub use service::{ReceiptService, ReceiptServiceError};
pub use validation::{validate, ValidationFailure, ValidationOutcome};
