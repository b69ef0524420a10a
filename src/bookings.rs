//! Bookings
//!
//! A booking is stored as one line of nine comma-separated fields:
//! name, phone, age, email, class, base price, discount, VAT and total.
//! Fields are not escaped, so a comma inside a name or email shifts the
//! columns of that row.

use thiserror::Error;

use crate::pricing::{Quote, format_amount};

/// Number of fields in a stored booking line.
pub const FIELD_COUNT: usize = 9;

/// Separator between stored fields.
pub const FIELD_SEPARATOR: char = ',';

/// Validated passenger details for one ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passenger {
    /// Full name
    pub name: String,

    /// Mobile number, 11 digits
    pub phone: String,

    /// Age in years
    pub age: u32,

    /// Email address
    pub email: String,
}

/// A finalised ticket purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRecord {
    passenger: Passenger,
    quote: Quote,
}

impl BookingRecord {
    /// Create a booking for a passenger and their priced ticket.
    pub fn new(passenger: Passenger, quote: Quote) -> Self {
        Self { passenger, quote }
    }

    /// Passenger details.
    pub fn passenger(&self) -> &Passenger {
        &self.passenger
    }

    /// Price breakdown.
    pub fn quote(&self) -> &Quote {
        &self.quote
    }

    /// Stored field values, in file order, with amounts rounded to pence.
    pub fn fields(&self) -> [String; FIELD_COUNT] {
        [
            self.passenger.name.clone(),
            self.passenger.phone.clone(),
            self.passenger.age.to_string(),
            self.passenger.email.clone(),
            self.quote.fare_class().display_name().to_string(),
            format_amount(self.quote.base()),
            format_amount(self.quote.discount()),
            format_amount(self.quote.vat()),
            format_amount(self.quote.total()),
        ]
    }

    /// Encode as a stored line, without the trailing newline.
    pub fn to_line(&self) -> String {
        self.fields().join(",")
    }
}

/// A booking row read back from the bookings file.
///
/// Fields keep their stored text; the listing only displays them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBooking {
    /// 1-based line number in the bookings file
    pub line: usize,

    /// Full name
    pub name: String,

    /// Mobile number
    pub phone: String,

    /// Age
    pub age: String,

    /// Email address
    pub email: String,

    /// Fare class display name
    pub class: String,

    /// Base price, two decimals
    pub base: String,

    /// Discount, two decimals
    pub discount: String,

    /// VAT, two decimals
    pub vat: String,

    /// Total paid, two decimals
    pub total: String,
}

impl StoredBooking {
    /// Parse one stored line. Surrounding whitespace is ignored and fields
    /// past the ninth are dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`MalformedRow`] when the line has fewer than [`FIELD_COUNT`] fields.
    pub fn parse(line: usize, text: &str) -> Result<Self, MalformedRow> {
        let raw = text.trim();
        let mut parts = raw.split(FIELD_SEPARATOR).map(str::to_string);

        let (
            Some(name),
            Some(phone),
            Some(age),
            Some(email),
            Some(class),
            Some(base),
            Some(discount),
            Some(vat),
            Some(total),
        ) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        )
        else {
            return Err(MalformedRow {
                line,
                fields: raw.split(FIELD_SEPARATOR).count(),
                raw: raw.to_string(),
            });
        };

        Ok(Self {
            line,
            name,
            phone,
            age,
            email,
            class,
            base,
            discount,
            vat,
            total,
        })
    }

    /// Field values in stored order.
    pub fn fields(&self) -> [&str; FIELD_COUNT] {
        [
            self.name.as_str(),
            self.phone.as_str(),
            self.age.as_str(),
            self.email.as_str(),
            self.class.as_str(),
            self.base.as_str(),
            self.discount.as_str(),
            self.vat.as_str(),
            self.total.as_str(),
        ]
    }
}

/// A stored line with too few fields to be a booking.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("line {line} has {fields} of {} fields: {raw}", FIELD_COUNT)]
pub struct MalformedRow {
    /// 1-based line number in the bookings file
    pub line: usize,

    /// Number of fields found
    pub fields: usize,

    /// Trimmed line text
    pub raw: String,
}
