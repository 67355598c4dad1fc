//! Ordered structural checks over a [`PurchaseRecord`].
//!
//! The order of the checks is part of the contract: a record with several problems is
//! reported with the first one in the sequence below.
//!
//! 1. at least one recognized field
//! 2. retailer
//! 3. purchase date
//! 4. purchase time
//! 5. items present
//! 6. each item's description, then its price
//! 7. total
//! 8. total against the sum of item prices

use rust_decimal::Decimal;
use serde::Serialize;

use super::amount::Amount;
use super::calendar::{PurchaseDate, PurchaseTime};
use super::domain::{has_text, PurchaseRecord};

/// Absolute difference allowed between the total and the summed item prices (0.001).
pub fn total_tolerance() -> Decimal {
    Decimal::new(1, 3)
}

/// Reason a record was rejected. Messages are what HTTP clients see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum ValidationFailure {
    #[error("Empty payload")]
    EmptyPayload,
    #[error("Blank Retailer")]
    BlankRetailer,
    #[error("Invalid Date")]
    InvalidDate,
    #[error("Invalid Time")]
    InvalidTime,
    #[error("Empty Items")]
    EmptyItems,
    #[error("No short description")]
    MissingDescription,
    #[error("Invalid item price")]
    InvalidItemPrice,
    #[error("Invalid total values")]
    InvalidTotal,
    #[error("Total not equal to sum of items value")]
    TotalMismatch,
}

impl ValidationFailure {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationFailure::EmptyPayload => "empty_payload",
            ValidationFailure::BlankRetailer => "blank_retailer",
            ValidationFailure::InvalidDate => "invalid_date",
            ValidationFailure::InvalidTime => "invalid_time",
            ValidationFailure::EmptyItems => "empty_items",
            ValidationFailure::MissingDescription => "missing_description",
            ValidationFailure::InvalidItemPrice => "invalid_item_price",
            ValidationFailure::InvalidTotal => "invalid_total",
            ValidationFailure::TotalMismatch => "total_mismatch",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(ValidationFailure),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    pub fn failure(&self) -> Option<ValidationFailure> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid(failure) => Some(*failure),
        }
    }

    pub fn into_result(self) -> Result<(), ValidationFailure> {
        match self {
            ValidationOutcome::Valid => Ok(()),
            ValidationOutcome::Invalid(failure) => Err(failure),
        }
    }
}

impl From<Result<(), ValidationFailure>> for ValidationOutcome {
    fn from(value: Result<(), ValidationFailure>) -> Self {
        match value {
            Ok(()) => ValidationOutcome::Valid,
            Err(failure) => ValidationOutcome::Invalid(failure),
        }
    }
}

/// Runs every check in order and reports the first failure.
pub fn validate(record: &PurchaseRecord) -> ValidationOutcome {
    check(record).into()
}

fn check(record: &PurchaseRecord) -> Result<(), ValidationFailure> {
    if record.is_empty() {
        return Err(ValidationFailure::EmptyPayload);
    }

    if !has_text(record.retailer.as_deref()) {
        return Err(ValidationFailure::BlankRetailer);
    }

    record
        .purchase_date
        .as_deref()
        .and_then(|raw| PurchaseDate::parse(raw).ok())
        .ok_or(ValidationFailure::InvalidDate)?;

    record
        .purchase_time
        .as_deref()
        .and_then(|raw| PurchaseTime::parse(raw).ok())
        .ok_or(ValidationFailure::InvalidTime)?;

    let items = record.items();
    if items.is_empty() {
        return Err(ValidationFailure::EmptyItems);
    }

    let mut prices = Vec::with_capacity(items.len());
    for item in items {
        if !has_text(item.short_description.as_deref()) {
            return Err(ValidationFailure::MissingDescription);
        }
        let price =
            parse_amount(item.price.as_deref()).ok_or(ValidationFailure::InvalidItemPrice)?;
        prices.push(price);
    }

    let total = parse_amount(record.total.as_deref()).ok_or(ValidationFailure::InvalidTotal)?;

    if !matches_item_sum(total, &prices) {
        return Err(ValidationFailure::TotalMismatch);
    }

    Ok(())
}

fn parse_amount(raw: Option<&str>) -> Option<Amount> {
    raw.and_then(|raw| Amount::parse(raw).ok())
}

fn matches_item_sum(total: Amount, prices: &[Amount]) -> bool {
    let sum = prices
        .iter()
        .try_fold(Amount::ZERO, |sum, price| sum.checked_add(*price));

    match sum {
        Some(sum) => (total.value() - sum.value()).abs() < total_tolerance(),
        // A sum that overflows the decimal range cannot equal any parsed total.
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_is_one_thousandth() {
        assert_eq!(total_tolerance().to_string(), "0.001");
    }

    #[test]
    fn item_sum_tolerance_is_exclusive() {
        let amount = |raw: &str| Amount::parse(raw).expect("valid amount");
        let prices = [amount("1.00"), amount("2.00")];
        assert!(matches_item_sum(amount("3.0009"), &prices));
        assert!(matches_item_sum(amount("2.9991"), &prices));
        assert!(!matches_item_sum(amount("3.001"), &prices));
        assert!(!matches_item_sum(amount("3.0011"), &prices));
    }

    #[test]
    fn outcome_converts_to_result() {
        assert_eq!(ValidationOutcome::Valid.into_result(), Ok(()));
        assert_eq!(
            ValidationOutcome::Invalid(ValidationFailure::InvalidTime).into_result(),
            Err(ValidationFailure::InvalidTime)
        );
        assert_eq!(
            ValidationOutcome::Invalid(ValidationFailure::EmptyItems).failure(),
            Some(ValidationFailure::EmptyItems)
        );
    }

    #[test]
    fn codes_match_serialized_names() {
        for failure in [
            ValidationFailure::EmptyPayload,
            ValidationFailure::MissingDescription,
            ValidationFailure::TotalMismatch,
        ] {
            let serialized = serde_json::to_value(failure).expect("serializes");
            assert_eq!(serialized, serde_json::json!(failure.code()));
        }
    }
}
