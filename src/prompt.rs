//! Console prompts
//!
//! [`Prompter`] reads answers line by line from any [`BufRead`] and writes
//! prompts to any [`Write`], so the booking flow can be driven from a script
//! or a test as easily as from a terminal. Invalid answers are reported and
//! asked again, with no limit on attempts.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::fares::{FareClass, FareError};

/// Number of digits in a valid mobile number.
pub const PHONE_DIGITS: usize = 11;

/// Errors that end a prompt without an answer.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Input closed before a valid answer was given.
    #[error("input ended before a value was entered")]
    EndOfInput,

    /// Reading input or writing the prompt failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Reasons an answer is rejected. The message is shown to the user before
/// asking again.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// Not an integer.
    #[error("Invalid input. Please enter a valid number.")]
    NotANumber,

    /// Integer smaller than the allowed minimum.
    #[error("Enter a number greater than or equal to {min}.")]
    BelowMinimum {
        /// Smallest accepted value
        min: i64,
    },

    /// Blank answer.
    #[error("This field cannot be empty. Please enter valid text.")]
    Empty,

    /// Not exactly eleven digits.
    #[error("Invalid mobile number. Please enter exactly 11 digits.")]
    InvalidPhone,

    /// Unknown fare class.
    #[error("Invalid option. Please choose from the available options.")]
    UnknownFareClass(#[source] FareError),

    /// Not one of the menu options.
    #[error("Invalid choice. Please select 1, 2, or 3.")]
    InvalidChoice,
}

/// Parse an integer answer and check it against `min_value`.
///
/// # Errors
///
/// Returns [`InputError::NotANumber`] or [`InputError::BelowMinimum`].
pub fn parse_integer(text: &str, min_value: i64) -> Result<i64, InputError> {
    let value: i64 = text.trim().parse().map_err(|_err| InputError::NotANumber)?;

    if value < min_value {
        return Err(InputError::BelowMinimum { min: min_value });
    }

    Ok(value)
}

/// Check that `text` is exactly eleven ASCII digits.
///
/// # Errors
///
/// Returns [`InputError::InvalidPhone`] otherwise.
pub fn validate_phone(text: &str) -> Result<(), InputError> {
    if text.len() == PHONE_DIGITS && text.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(InputError::InvalidPhone)
    }
}

/// Line-oriented question and answer over an input and an output stream.
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter reading answers from `input` and writing to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Output stream, for messages that are not prompts.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Give back the underlying streams.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Show `prompt` and read one raw line, including its line ending.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::EndOfInput`] when the input is exhausted.
    pub fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();

        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::EndOfInput);
        }

        Ok(line)
    }

    /// Ask until the answer is an integer of at least `min_value` that fits in `T`.
    ///
    /// # Errors
    ///
    /// Returns a [`PromptError`] if input ends or IO fails.
    pub fn read_integer<T: TryFrom<i64>>(
        &mut self,
        prompt: &str,
        min_value: i64,
    ) -> Result<T, PromptError> {
        loop {
            let line = self.read_line(prompt)?;

            match parse_integer(&line, min_value).map(<T as TryFrom<i64>>::try_from) {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(_)) => self.reject(&InputError::NotANumber)?,
                Err(err) => self.reject(&err)?,
            }
        }
    }

    /// Ask until the trimmed answer is not empty, and return it trimmed.
    ///
    /// # Errors
    ///
    /// Returns a [`PromptError`] if input ends or IO fails.
    pub fn read_nonempty_text(&mut self, prompt: &str) -> Result<String, PromptError> {
        loop {
            let line = self.read_line(prompt)?;
            let text = line.trim();

            if text.is_empty() {
                self.reject(&InputError::Empty)?;
            } else {
                return Ok(text.to_string());
            }
        }
    }

    /// Ask until the answer is an eleven digit mobile number.
    ///
    /// # Errors
    ///
    /// Returns a [`PromptError`] if input ends or IO fails.
    pub fn read_phone(&mut self, prompt: &str) -> Result<String, PromptError> {
        loop {
            let phone = self.read_nonempty_text(prompt)?;

            match validate_phone(&phone) {
                Ok(()) => return Ok(phone),
                Err(err) => self.reject(&err)?,
            }
        }
    }

    /// Ask once; only `yes` (any case) counts as agreement.
    ///
    /// # Errors
    ///
    /// Returns a [`PromptError`] if input ends or IO fails.
    pub fn read_yes_no(&mut self, prompt: &str) -> Result<bool, PromptError> {
        let line = self.read_line(prompt)?;

        Ok(line.trim().eq_ignore_ascii_case("yes"))
    }

    /// Ask until the answer names a fare class.
    ///
    /// # Errors
    ///
    /// Returns a [`PromptError`] if input ends or IO fails.
    pub fn read_fare_class(&mut self, prompt: &str) -> Result<FareClass, PromptError> {
        loop {
            let line = self.read_line(prompt)?;

            match line.parse::<FareClass>() {
                Ok(fare) => return Ok(fare),
                Err(err) => self.reject(&InputError::UnknownFareClass(err))?,
            }
        }
    }

    /// Report a rejected answer.
    ///
    /// # Errors
    ///
    /// Returns a [`PromptError`] if the message cannot be written.
    pub fn reject(&mut self, err: &InputError) -> Result<(), PromptError> {
        writeln!(self.output, "❌ {err}")?;

        Ok(())
    }
}
