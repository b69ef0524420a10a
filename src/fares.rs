//! Fares

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use rusty_money::{Money, iso};
use thiserror::Error;

/// Errors raised while resolving a fare class from user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FareError {
    /// The text does not name any fare class.
    #[error("unknown fare class: {0:?}")]
    UnknownFareClass(String),
}

/// Flight service tier, each with a fixed base price in pounds sterling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FareClass {
    /// Highest class with premium services.
    Premium,

    /// Luxury class with extra amenities.
    FirstClass,

    /// Mid-tier seating.
    SecondClass,

    /// Standard budget option.
    Economy,
}

impl FareClass {
    /// Every fare class, in catalogue order.
    pub const ALL: [FareClass; 4] = [
        FareClass::Premium,
        FareClass::FirstClass,
        FareClass::SecondClass,
        FareClass::Economy,
    ];

    /// Lower-case option key typed at the booking prompt.
    pub fn key(self) -> &'static str {
        match self {
            FareClass::Premium => "premium",
            FareClass::FirstClass => "first_class",
            FareClass::SecondClass => "second_class",
            FareClass::Economy => "economy",
        }
    }

    /// Title-cased name written to the bookings file.
    pub fn display_name(self) -> &'static str {
        match self {
            FareClass::Premium => "Premium",
            FareClass::FirstClass => "First Class",
            FareClass::SecondClass => "Second Class",
            FareClass::Economy => "Economy",
        }
    }

    /// Base price before discounts and VAT, in pounds.
    pub fn base_price(self) -> Decimal {
        match self {
            FareClass::Premium => Decimal::new(950_000, 2),
            FareClass::FirstClass => Decimal::new(750_000, 2),
            FareClass::SecondClass => Decimal::new(553_570, 2),
            FareClass::Economy => Decimal::new(350_000, 2),
        }
    }

    /// Base price as GBP money, for display.
    pub fn base_money(self) -> Money<'static, iso::Currency> {
        Money::from_decimal(self.base_price(), iso::GBP)
    }
}

impl fmt::Display for FareClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for FareClass {
    type Err = FareError;

    /// Case-insensitive; spaces are read as underscores, so both `first_class`
    /// and `First Class` resolve.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(' ', "_");

        FareClass::ALL
            .into_iter()
            .find(|fare| fare.key() == key)
            .ok_or_else(|| FareError::UnknownFareClass(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("premium", FareClass::Premium; "premium key")]
    #[test_case("first_class", FareClass::FirstClass; "first class key")]
    #[test_case("Second Class", FareClass::SecondClass; "display name with space")]
    #[test_case("  ECONOMY \n", FareClass::Economy; "upper case with whitespace")]
    #[test_case("fIrSt cLaSs", FareClass::FirstClass; "mixed case")]
    fn parses_fare_class(input: &str, expected: FareClass) {
        assert_eq!(input.parse::<FareClass>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_fare_class() {
        assert_eq!(
            "business\n".parse::<FareClass>(),
            Err(FareError::UnknownFareClass("business".to_string()))
        );
        assert!("".parse::<FareClass>().is_err());
        assert!("first__class".parse::<FareClass>().is_err());
    }

    #[test]
    fn base_prices_match_catalogue() {
        let prices: Vec<_> = FareClass::ALL.iter().map(|f| f.base_price()).collect();

        assert_eq!(
            prices,
            [
                Decimal::new(9500, 0),
                Decimal::new(7500, 0),
                Decimal::new(553_570, 2),
                Decimal::new(3500, 0),
            ]
        );
    }

    #[test]
    fn display_uses_title_case_name() {
        assert_eq!(FareClass::SecondClass.to_string(), "Second Class");
        assert_eq!(FareClass::Premium.to_string(), "Premium");
    }

    #[test]
    fn base_money_is_gbp() {
        let money = FareClass::Economy.base_money();

        assert_eq!(money.currency(), iso::GBP);
        assert_eq!(*money.amount(), Decimal::new(3500, 0));
    }
}
