//! Receipt validation and reward-points scoring.
//!
//! [`receipts::validate`] decides whether a purchase record is well formed and
//! [`receipts::score`] turns an accepted record into a points total. The HTTP
//! router and the in-process [`receipts::ReceiptService`] compose the two.

pub mod config;
pub mod error;
pub mod receipts;
pub mod telemetry;
