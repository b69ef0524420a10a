//! Booking store
//!
//! An append-only text file with one booking per line. The file is opened
//! for each call and closed before it returns. There is no locking, so a
//! single process should own the file.

use std::{
    fs::{File, OpenOptions},
    io::{self, BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::bookings::{BookingRecord, MalformedRow, StoredBooking};

/// Default bookings file, relative to the working directory.
pub const DEFAULT_BOOKINGS_FILE: &str = "bookings.txt";

/// Errors raised while reading or writing the bookings file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The booking could not be appended.
    #[error("failed to append booking to {}: {source}", .path.display())]
    Append {
        /// Bookings file path
        path: PathBuf,
        /// Underlying IO error
        source: io::Error,
    },

    /// The bookings file exists but could not be read.
    #[error("failed to read bookings from {}: {source}", .path.display())]
    Read {
        /// Bookings file path
        path: PathBuf,
        /// Underlying IO error
        source: io::Error,
    },
}

/// One line of the bookings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListedRow {
    /// A complete booking.
    Booking(StoredBooking),

    /// A line with too few fields.
    Malformed(MalformedRow),
}

/// Result of reading the bookings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// No bookings file exists yet.
    Missing,

    /// Every line of the file, in file order.
    Rows(Vec<ListedRow>),
}

impl Listing {
    /// Parsed bookings, oldest first. Malformed lines are skipped.
    pub fn bookings(&self) -> impl Iterator<Item = &StoredBooking> {
        self.rows().iter().filter_map(|row| match row {
            ListedRow::Booking(booking) => Some(booking),
            ListedRow::Malformed(_) => None,
        })
    }

    /// Lines that could not be parsed.
    pub fn malformed(&self) -> impl Iterator<Item = &MalformedRow> {
        self.rows().iter().filter_map(|row| match row {
            ListedRow::Malformed(row) => Some(row),
            ListedRow::Booking(_) => None,
        })
    }

    /// True when the file is missing or has no lines.
    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }

    fn rows(&self) -> &[ListedRow] {
        match self {
            Listing::Missing => &[],
            Listing::Rows(rows) => rows.as_slice(),
        }
    }
}

/// Bookings file handle.
#[derive(Debug, Clone)]
pub struct BookingStore {
    path: PathBuf,
}

impl BookingStore {
    /// Create a store backed by the file at `path`. Nothing is opened until
    /// the first append or listing.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the bookings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a booking as one line, creating the file if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Append`] if the file cannot be opened or written.
    pub fn append(&self, record: &BookingRecord) -> Result<(), StoreError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.append_error(source))?;

        writeln!(file, "{}", record.to_line()).map_err(|source| self.append_error(source))?;

        info!(
            path = %self.path.display(),
            class = record.quote().fare_class().key(),
            "booking saved"
        );

        Ok(())
    }

    /// Read every booking line, in file order.
    ///
    /// A missing file is reported as [`Listing::Missing`]. Lines with too few
    /// fields are kept as [`ListedRow::Malformed`] and do not stop the listing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the file exists but cannot be read.
    pub fn list_all(&self) -> Result<Listing, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no bookings file yet");

                return Ok(Listing::Missing);
            }
            Err(source) => return Err(self.read_error(source)),
        };

        let mut rows = Vec::new();

        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| self.read_error(source))?;

            match StoredBooking::parse(idx + 1, &line) {
                Ok(booking) => rows.push(ListedRow::Booking(booking)),
                Err(malformed) => {
                    warn!(path = %self.path.display(), "skipping booking: {malformed}");

                    rows.push(ListedRow::Malformed(malformed));
                }
            }
        }

        debug!(path = %self.path.display(), lines = rows.len(), "bookings read");

        Ok(Listing::Rows(rows))
    }

    fn append_error(&self, source: io::Error) -> StoreError {
        StoreError::Append {
            path: self.path.clone(),
            source,
        }
    }

    fn read_error(&self, source: io::Error) -> StoreError {
        StoreError::Read {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new(DEFAULT_BOOKINGS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;
    use testresult::TestResult;

    use super::*;
    use crate::{bookings::Passenger, fares::FareClass, pricing::price};

    fn record(name: &str, fare: FareClass, age: u32, returning: bool) -> BookingRecord {
        BookingRecord::new(
            Passenger {
                name: name.to_string(),
                phone: "07123456789".to_string(),
                age,
                email: format!("{}@example.com", name.to_lowercase()),
            },
            price(fare, age, returning),
        )
    }

    #[test]
    fn missing_file_lists_as_missing() -> TestResult {
        let dir = tempdir()?;
        let store = BookingStore::new(dir.path().join("bookings.txt"));

        let listing = store.list_all()?;

        assert_eq!(listing, Listing::Missing);
        assert!(listing.is_empty());

        Ok(())
    }

    #[test]
    fn empty_file_lists_no_rows() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("bookings.txt");
        fs::write(&path, "")?;

        let listing = BookingStore::new(&path).list_all()?;

        assert_eq!(listing, Listing::Rows(Vec::new()));
        assert!(listing.is_empty());

        Ok(())
    }

    #[test]
    fn append_creates_file_and_appends_lines() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("bookings.txt");
        let store = BookingStore::new(&path);

        store.append(&record("Ada", FareClass::Economy, 10, false))?;
        store.append(&record("Alan", FareClass::Premium, 5, true))?;

        assert_eq!(
            fs::read_to_string(&path)?,
            "Ada,07123456789,10,ada@example.com,Economy,3500.00,0.00,525.00,4025.00\n\
             Alan,07123456789,5,alan@example.com,Premium,9500.00,2850.00,997.50,7647.50\n"
        );

        Ok(())
    }

    #[test]
    fn appended_records_list_back_in_order() -> TestResult {
        let dir = tempdir()?;
        let store = BookingStore::new(dir.path().join("bookings.txt"));

        let first = record("Grace", FareClass::SecondClass, 30, true);
        let second = record("Edsger", FareClass::FirstClass, 6, false);

        store.append(&first)?;
        store.append(&second)?;

        let listing = store.list_all()?;
        let bookings: Vec<_> = listing.bookings().collect();

        assert_eq!(bookings.len(), 2);

        for (stored, original) in bookings.iter().zip([&first, &second]) {
            assert_eq!(
                stored.fields(),
                original.fields().each_ref().map(String::as_str)
            );
        }

        assert_eq!(listing.malformed().count(), 0);

        Ok(())
    }

    #[test]
    fn malformed_rows_are_kept_separately() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("bookings.txt");

        fs::write(
            &path,
            "Ada,07123456789,10,ada@example.com,Economy,3500.00,0.00,525.00,4025.00\n\
             broken,row\n\
             Alan,07123456789,5,alan@example.com,Premium,9500.00,2850.00,997.50,7647.50\n",
        )?;

        let listing = BookingStore::new(&path).list_all()?;

        let names: Vec<_> = listing
            .bookings()
            .map(|b| (b.line, b.name.as_str()))
            .collect();
        assert_eq!(names, [(1, "Ada"), (3, "Alan")]);

        let malformed: Vec<_> = listing.malformed().collect();
        assert_eq!(
            malformed,
            [&MalformedRow {
                line: 2,
                fields: 2,
                raw: "broken,row".to_string(),
            }]
        );

        Ok(())
    }

    #[test]
    fn append_to_directory_fails() -> TestResult {
        let dir = tempdir()?;
        let store = BookingStore::new(dir.path());

        let result = store.append(&record("Ada", FareClass::Economy, 10, false));

        assert!(matches!(result, Err(StoreError::Append { .. })));

        Ok(())
    }

    #[test]
    fn default_store_uses_relative_bookings_file() {
        assert_eq!(BookingStore::default().path(), Path::new("bookings.txt"));
    }
}
