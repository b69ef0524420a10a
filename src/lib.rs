//! Flightdesk
//!
//! Flightdesk is a console flight-ticket booking tool: it prices tickets with
//! child and returning-customer discounts plus VAT, appends each booking to a
//! flat file, and lists saved bookings back.

pub mod bookings;
pub mod config;
pub mod fares;
pub mod logging;
pub mod menu;
pub mod prelude;
pub mod pricing;
pub mod prompt;
pub mod store;
