//! Flightdesk prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    bookings::{BookingRecord, MalformedRow, Passenger, StoredBooking},
    config::{Config, LogFormat, LoggingConfig},
    fares::{FareClass, FareError},
    logging::LoggingError,
    menu::{MenuChoice, Session, SessionError},
    pricing::{DiscountKind, Quote, SessionTotal, price},
    prompt::{InputError, PromptError, Prompter},
    store::{BookingStore, ListedRow, Listing, StoreError},
};
