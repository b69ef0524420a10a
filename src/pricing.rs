//! Pricing
//!
//! Ticket prices are computed at full decimal precision. Amounts are only
//! rounded to pence when they are displayed or written to the bookings file.

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso};
use smallvec::SmallVec;

use crate::fares::FareClass;

/// Passengers younger than this many years receive the child discount.
pub const CHILD_AGE_LIMIT: u32 = 8;

/// Value added tax applied to the post-discount price.
pub fn vat_rate() -> Percentage {
    Percentage::from(Decimal::new(15, 2))
}

/// A discount that can apply to a single ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountKind {
    /// Passenger is under [`CHILD_AGE_LIMIT`].
    Child,

    /// Customer reported a previous booking.
    ReturningCustomer,
}

impl DiscountKind {
    /// Fraction of the base price taken off by this discount.
    pub fn rate(self) -> Percentage {
        match self {
            DiscountKind::Child => Percentage::from(Decimal::new(20, 2)),
            DiscountKind::ReturningCustomer => Percentage::from(Decimal::new(10, 2)),
        }
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountKind::Child => f.write_str("Child discount (20%)"),
            DiscountKind::ReturningCustomer => f.write_str("Returning customer discount (10%)"),
        }
    }
}

/// Full-precision price breakdown for one ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    fare_class: FareClass,
    base: Decimal,
    discount: Decimal,
    vat: Decimal,
    total: Decimal,
    applied: SmallVec<[DiscountKind; 2]>,
}

impl Quote {
    /// Fare class the quote was computed for.
    pub fn fare_class(&self) -> FareClass {
        self.fare_class
    }

    /// Base price of the fare class.
    pub fn base(&self) -> Decimal {
        self.base
    }

    /// Sum of every applied discount.
    pub fn discount(&self) -> Decimal {
        self.discount
    }

    /// Price after discounts, before VAT.
    pub fn net(&self) -> Decimal {
        self.base - self.discount
    }

    /// VAT charged on the net price.
    pub fn vat(&self) -> Decimal {
        self.vat
    }

    /// Amount the passenger pays.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Discounts that contributed to [`Quote::discount`], in application order.
    pub fn applied_discounts(&self) -> &[DiscountKind] {
        &self.applied
    }
}

/// Prices a ticket.
///
/// Both discounts are taken from the original base price, so a returning
/// customer booking a child ticket gets 30% off, not a compounded 28%.
pub fn price(fare_class: FareClass, age: u32, is_returning: bool) -> Quote {
    let base = fare_class.base_price();

    let mut applied: SmallVec<[DiscountKind; 2]> = SmallVec::new();

    if age < CHILD_AGE_LIMIT {
        applied.push(DiscountKind::Child);
    }

    if is_returning {
        applied.push(DiscountKind::ReturningCustomer);
    }

    let discount = applied
        .iter()
        .fold(Decimal::ZERO, |acc, kind| acc + kind.rate() * base);

    let net = base - discount;
    let vat = vat_rate() * net;

    Quote {
        fare_class,
        base,
        discount,
        vat,
        total: net + vat,
        applied,
    }
}

/// Running total across the tickets of one booking session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTotal {
    tickets: usize,
    total: Decimal,
}

impl SessionTotal {
    /// Adds a ticket's total.
    pub fn add(&mut self, quote: &Quote) {
        self.tickets += 1;
        self.total += quote.total();
    }

    /// Number of tickets added.
    pub fn tickets(&self) -> usize {
        self.tickets
    }

    /// Unrounded sum of ticket totals.
    pub fn total(&self) -> Decimal {
        self.total
    }
}

/// Rounds an amount to pence, midpoint away from zero.
pub fn round_pence(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount with exactly two decimal places and no currency symbol.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", round_pence(amount))
}

/// Rounds an amount to pence and wraps it as GBP for display.
pub fn to_money(amount: Decimal) -> Money<'static, iso::Currency> {
    Money::from_decimal(round_pence(amount), iso::GBP)
}
