//! Menu loop
//!
//! [`Session`] runs the interactive menu: book tickets, list saved bookings,
//! or quit.

use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;
use tracing::info;

use crate::{
    bookings::{BookingRecord, Passenger, StoredBooking},
    fares::FareClass,
    pricing::{SessionTotal, price, to_money},
    prompt::{InputError, PromptError, Prompter},
    store::{BookingStore, ListedRow, Listing, StoreError},
};

const BANNER: &str = "==== Welcome to Temmy Flight Booking System Menu ====";
const FAREWELL: &str = "👋 Thanks for using our service, hope to see you again. Goodbye!😊";

/// Errors that end a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A prompt could not be answered.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// The bookings file could not be used.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Console output failed.
    #[error("failed to write to console: {0}")]
    Io(#[from] io::Error),
}

/// Top level menu option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Book one or more tickets.
    Book,

    /// Show all saved bookings.
    View,

    /// Leave the program.
    Quit,
}

impl FromStr for MenuChoice {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::Book),
            "2" => Ok(MenuChoice::View),
            "3" => Ok(MenuChoice::Quit),
            _ => Err(InputError::InvalidChoice),
        }
    }
}

/// An interactive booking session over an input and output stream.
#[derive(Debug)]
pub struct Session<R, W> {
    prompter: Prompter<R, W>,
    store: BookingStore,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session reading answers from `input`, writing to `output` and
    /// saving bookings to `store`.
    pub fn new(input: R, output: W, store: BookingStore) -> Self {
        Self {
            prompter: Prompter::new(input, output),
            store,
        }
    }

    /// Give back the output stream.
    pub fn into_output(self) -> W {
        self.prompter.into_parts().1
    }

    /// Show the menu until the user quits.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if input ends, the console cannot be
    /// written, or the bookings file fails.
    pub fn run(&mut self) -> Result<(), SessionError> {
        loop {
            self.write_menu()?;

            let line = self.prompter.read_line("Enter your choice (1, 2 or 3): ")?;

            match line.parse::<MenuChoice>() {
                Ok(MenuChoice::Book) => {
                    self.book_flights()?;
                }
                Ok(MenuChoice::View) => {
                    self.view_bookings()?;
                }
                Ok(MenuChoice::Quit) => {
                    writeln!(self.prompter.output(), "{FAREWELL}")?;

                    return Ok(());
                }
                Err(err) => self.prompter.reject(&err)?,
            }
        }
    }

    /// Book one or more tickets, saving each as it is priced.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if a prompt fails or a booking cannot be saved.
    pub fn book_flights(&mut self) -> Result<SessionTotal, SessionError> {
        let is_returning = self
            .prompter
            .read_yes_no("\nAre you a returning customer? (yes/no): ")?;

        let tickets: usize = self
            .prompter
            .read_integer("\nHow many tickets would you like to book? ", 1)?;

        let mut session_total = SessionTotal::default();

        for number in 1..=tickets {
            let record = self.book_ticket(number, is_returning)?;

            session_total.add(record.quote());
        }

        info!(
            tickets = session_total.tickets(),
            total = %session_total.total(),
            "booking session completed"
        );

        writeln!(
            self.prompter.output(),
            "\n✅ All bookings completed! Total cost for all tickets: {}",
            to_money(session_total.total())
        )?;

        Ok(session_total)
    }

    /// Collect, price and save a single ticket.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if a prompt fails or the booking cannot be saved.
    pub fn book_ticket(
        &mut self,
        number: usize,
        is_returning: bool,
    ) -> Result<BookingRecord, SessionError> {
        writeln!(self.prompter.output(), "\n=== Booking {number} ===")?;
        write_fare_options(self.prompter.output())?;

        let fare_class = self.prompter.read_fare_class("Enter your booking option: ")?;
        let name = self.prompter.read_nonempty_text("Full Name: ")?;
        let phone = self.prompter.read_phone("Mobile Number: ")?;
        let age: u32 = self.prompter.read_integer("Age: ", 0)?;
        let email = self.prompter.read_nonempty_text("Email address: ")?;

        let quote = price(fare_class, age, is_returning);

        let out = self.prompter.output();

        for discount in quote.applied_discounts() {
            writeln!(out, "✅ {discount} applied.")?;
        }

        writeln!(out, "Total price for this ticket: {}", to_money(quote.total()))?;

        let record = BookingRecord::new(
            Passenger {
                name,
                phone,
                age,
                email,
            },
            quote,
        );

        self.store.append(&record)?;

        Ok(record)
    }

    /// Print every saved booking.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the bookings file cannot be read or the
    /// console cannot be written.
    pub fn view_bookings(&mut self) -> Result<Listing, SessionError> {
        let listing = self.store.list_all()?;

        write_listing(self.prompter.output(), &listing)?;

        Ok(listing)
    }

    fn write_menu(&mut self) -> io::Result<()> {
        let out = self.prompter.output();

        writeln!(out, "\n{BANNER}")?;
        writeln!(out, "1. Book a Flight")?;
        writeln!(out, "2. View All Bookings")?;
        writeln!(out, "3. Quit")
    }
}

/// Write the fare classes and base prices as a table.
///
/// # Errors
///
/// Returns an IO error if the output cannot be written.
pub fn write_fare_options(out: &mut impl Write) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["Option", "Class", "Price"]);

    for fare in FareClass::ALL {
        builder.push_record([
            fare.key().to_string(),
            fare.display_name().to_string(),
            fare.base_money().to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..3), Alignment::right());

    writeln!(out, "\nAvailable booking options:\n{table}")
}

/// Write a listing with labelled fields, one block per booking.
///
/// # Errors
///
/// Returns an IO error if the output cannot be written.
pub fn write_listing(out: &mut impl Write, listing: &Listing) -> io::Result<()> {
    let rows = match listing {
        Listing::Missing => {
            return writeln!(out, "\n📝 No bookings information found. Book a flight first.");
        }
        Listing::Rows(rows) if rows.is_empty() => {
            return writeln!(out, "\n📝 No bookings found.");
        }
        Listing::Rows(rows) => rows,
    };

    writeln!(out, "\n📋 All Bookings:")?;

    for row in rows {
        match row {
            ListedRow::Booking(booking) => write_booking(out, booking)?,
            ListedRow::Malformed(row) => writeln!(out, "❌ Data is incomplete: {}", row.raw)?,
        }
    }

    Ok(())
}

fn write_booking(out: &mut impl Write, booking: &StoredBooking) -> io::Result<()> {
    writeln!(out, "\nBooking {}:", booking.line)?;
    writeln!(out, " Name: {}", booking.name)?;
    writeln!(out, " Mobile Number: {}", booking.phone)?;
    writeln!(out, " Age: {}", booking.age)?;
    writeln!(out, " Email: {}", booking.email)?;
    writeln!(out, " Class: {}", booking.class)?;
    writeln!(out, " Base Price: £{}", booking.base)?;
    writeln!(out, " Discount: -£{}", booking.discount)?;
    writeln!(out, " VAT (15%): +£{}", booking.vat)?;
    writeln!(out, " Total Paid: £{}", booking.total)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tempfile::tempdir;
    use testresult::TestResult;

    use super::*;
    use crate::bookings::MalformedRow;

    fn session(input: &str, store: BookingStore) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
        Session::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), store)
    }

    fn rendered(write: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> TestResult<String> {
        let mut out = Vec::new();
        write(&mut out)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn menu_choice_parsing() {
        assert_eq!("1".parse::<MenuChoice>(), Ok(MenuChoice::Book));
        assert_eq!(" 2 \n".parse::<MenuChoice>(), Ok(MenuChoice::View));
        assert_eq!("3".parse::<MenuChoice>(), Ok(MenuChoice::Quit));
        assert_eq!("4".parse::<MenuChoice>(), Err(InputError::InvalidChoice));
        assert_eq!("one".parse::<MenuChoice>(), Err(InputError::InvalidChoice));
    }

    #[test]
    fn fare_options_list_every_class_in_order() -> TestResult {
        let text = rendered(|out| write_fare_options(out))?;

        let positions: Vec<_> = FareClass::ALL
            .iter()
            .filter_map(|fare| text.find(fare.key()))
            .collect();

        assert_eq!(positions.len(), 4);
        assert!(positions.windows(2).all(|pair| pair.first() < pair.last()));
        assert!(text.starts_with("\nAvailable booking options:\n"));
        assert!(text.contains("Second Class"));

        Ok(())
    }

    #[test]
    fn listing_missing_store() -> TestResult {
        let text = rendered(|out| write_listing(out, &Listing::Missing))?;

        assert_eq!(
            text,
            "\n📝 No bookings information found. Book a flight first.\n"
        );

        Ok(())
    }

    #[test]
    fn listing_empty_store() -> TestResult {
        let text = rendered(|out| write_listing(out, &Listing::Rows(Vec::new())))?;

        assert_eq!(text, "\n📝 No bookings found.\n");

        Ok(())
    }

    #[test]
    fn listing_labels_fields_and_flags_incomplete_rows() -> TestResult {
        let booking = StoredBooking::parse(
            1,
            "Jane,07123456789,10,jane@example.com,Economy,3500.00,0.00,525.00,4025.00",
        )?;

        let listing = Listing::Rows(vec![
            ListedRow::Booking(booking),
            ListedRow::Malformed(MalformedRow {
                line: 2,
                fields: 2,
                raw: "broken,row".to_string(),
            }),
        ]);

        let text = rendered(|out| write_listing(out, &listing))?;

        assert_eq!(
            text,
            "\n📋 All Bookings:\n\
             \nBooking 1:\n \
             Name: Jane\n \
             Mobile Number: 07123456789\n \
             Age: 10\n \
             Email: jane@example.com\n \
             Class: Economy\n \
             Base Price: £3500.00\n \
             Discount: -£0.00\n \
             VAT (15%): +£525.00\n \
             Total Paid: £4025.00\n\
             ❌ Data is incomplete: broken,row\n"
        );

        Ok(())
    }

    #[test]
    fn book_ticket_saves_record() -> TestResult {
        let dir = tempdir()?;
        let store = BookingStore::new(dir.path().join("bookings.txt"));
        let mut session = session(
            "economy\nJane Doe\n07123456789\n10\njane@example.com\n",
            store.clone(),
        );

        let record = session.book_ticket(1, false)?;

        assert_eq!(record.passenger().name, "Jane Doe");
        assert_eq!(
            record.to_line(),
            "Jane Doe,07123456789,10,jane@example.com,Economy,3500.00,0.00,525.00,4025.00"
        );
        assert_eq!(store.list_all()?.bookings().count(), 1);

        let output = String::from_utf8(session.into_output())?;
        assert!(output.contains("=== Booking 1 ==="));
        assert!(output.contains("Total price for this ticket: "));
        assert!(!output.contains("discount"));

        Ok(())
    }

    #[test]
    fn book_ticket_announces_discounts() -> TestResult {
        let dir = tempdir()?;
        let store = BookingStore::new(dir.path().join("bookings.txt"));
        let mut session = session("Premium\nTim\n07123456789\n5\ntim@example.com\n", store);

        let record = session.book_ticket(2, true)?;

        assert_eq!(record.fields().last().map(String::as_str), Some("7647.50"));

        let output = String::from_utf8(session.into_output())?;
        assert!(output.contains("=== Booking 2 ==="));
        assert!(output.contains("✅ Child discount (20%) applied."));
        assert!(output.contains("✅ Returning customer discount (10%) applied."));

        Ok(())
    }

    #[test]
    fn run_rejects_unknown_choice_then_quits() -> TestResult {
        let dir = tempdir()?;
        let mut session = session("9\n3\n", BookingStore::new(dir.path().join("b.txt")));

        session.run()?;

        let output = String::from_utf8(session.into_output())?;
        assert_eq!(output.matches(BANNER).count(), 2);
        assert!(output.contains("❌ Invalid choice. Please select 1, 2, or 3."));
        assert!(output.ends_with(&format!("{FAREWELL}\n")));

        Ok(())
    }

    #[test]
    fn run_fails_when_input_ends() -> TestResult {
        let dir = tempdir()?;
        let mut session = session("2\n", BookingStore::new(dir.path().join("b.txt")));

        let result = session.run();

        assert!(matches!(
            result,
            Err(SessionError::Prompt(PromptError::EndOfInput))
        ));

        Ok(())
    }
}
