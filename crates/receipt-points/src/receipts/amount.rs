//! Currency amounts carried as text on the wire.
//!
//! Checking happens in two steps: [`is_well_formed`] applies the grammar
//! (`digits? ('.' digits?)?`, at least one digit, nothing else) and [`Amount::parse`]
//! then converts the text to an exact decimal. Keeping them apart lets callers tell a
//! malformed amount from one that is merely too large to represent.

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("'{0}' is not a non-negative decimal amount")]
    Malformed(String),
    #[error("'{0}' is outside the representable amount range")]
    OutOfRange(String),
}

/// Exact non-negative decimal amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub fn parse(raw: &str) -> Result<Self, AmountError> {
        if !is_well_formed(raw) {
            return Err(AmountError::Malformed(raw.to_string()));
        }

        // The grammar admits "5." and ".5"; the decimal parser wants both sides.
        let (whole, fraction) = raw.split_once('.').unwrap_or((raw, ""));
        let whole = if whole.is_empty() { "0" } else { whole };
        let normalized = if fraction.is_empty() {
            whole.to_string()
        } else {
            format!("{whole}.{fraction}")
        };

        Decimal::from_str(&normalized)
            .map(Amount)
            .map_err(|_| AmountError::OutOfRange(raw.to_string()))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_whole(&self) -> bool {
        self.0.fract().is_zero()
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Amount::parse(raw)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Grammar check only; says nothing about whether the value fits a [`Decimal`].
pub fn is_well_formed(raw: &str) -> bool {
    let (whole, fraction) = match raw.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (raw, ""),
    };

    let digits_only = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());

    digits_only(whole) && digits_only(fraction) && !(whole.is_empty() && fraction.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grammar_accepts_optional_parts() {
        for raw in ["0", "6.49", "12.", ".25", "000.000", "35"] {
            assert!(is_well_formed(raw), "{raw} should be well formed");
        }
    }

    #[test]
    fn grammar_rejects_signs_exponents_and_garbage() {
        for raw in [
            "", ".", "-1", "+1", "1e3", " 1", "1 ", "1.2.3", "1,00", "$5", "0x10", "١",
        ] {
            assert!(!is_well_formed(raw), "{raw:?} should be malformed");
        }
    }

    #[test]
    fn parse_normalizes_bare_fraction_and_trailing_point() {
        assert_eq!(Amount::parse(".5").expect("parses").value(), Decimal::new(5, 1));
        assert_eq!(Amount::parse("12.").expect("parses").value(), Decimal::from(12));
    }

    #[test]
    fn oversized_integer_part_is_out_of_range_not_malformed() {
        let raw = "9".repeat(40);
        match Amount::parse(&raw) {
            Err(AmountError::OutOfRange(value)) => assert_eq!(value, raw),
            other => panic!("expected out-of-range error, got {other:?}"),
        }
        assert!(matches!(
            Amount::parse("1.2.3"),
            Err(AmountError::Malformed(_))
        ));
    }

    #[test]
    fn whole_amounts_ignore_trailing_zeros() {
        assert!(Amount::parse("9.00").expect("parses").is_whole());
        assert!(!Amount::parse("9.01").expect("parses").is_whole());
    }
}
