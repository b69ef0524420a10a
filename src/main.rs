//! Flightdesk console entry point.

use std::{io, process::ExitCode};

use flightdesk::{config::Config, logging, menu::Session, store::BookingStore};
use tracing::{error, info};

#[expect(clippy::print_stderr, reason = "fatal errors are reported on the console")]
fn main() -> ExitCode {
    let config = Config::load().unwrap_or_else(|err| err.exit());

    if let Err(err) = logging::init(&config.logging) {
        eprintln!("{err}");

        return ExitCode::FAILURE;
    }

    info!(bookings_file = %config.bookings_file.display(), "starting booking console");

    let mut session = Session::new(
        io::stdin().lock(),
        io::stdout().lock(),
        BookingStore::new(config.bookings_file),
    );

    match session.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "booking session aborted");
            eprintln!("\n{err}");

            ExitCode::FAILURE
        }
    }
}
