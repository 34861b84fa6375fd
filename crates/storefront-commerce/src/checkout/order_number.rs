//! Order numbers.
//!
//! An order number is the order date as `DDMMYYYY`, a dash, and a
//! sequence: `18102026-3`.

use crate::error::CommerceError;
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DATE_FORMAT: &str = "%d%m%Y";

/// Upper bound (exclusive) for sequences picked by [`OrderNumber::random`].
pub const RANDOM_SEQUENCE_LIMIT: u32 = 1000;

/// A `DDMMYYYY-N` order number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderNumber {
    date: NaiveDate,
    sequence: u32,
}

impl OrderNumber {
    /// Create an order number from its parts.
    pub fn new(date: NaiveDate, sequence: u32) -> Self {
        Self { date, sequence }
    }

    /// Next number for `date`, given the order numbers already issued.
    ///
    /// The sequence is one more than the number of existing orders that
    /// share the date prefix. Numbers for other dates are ignored.
    pub fn sequential<I, S>(date: NaiveDate, existing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let prefix = format!("{}-", date.format(DATE_FORMAT));
        let issued = existing
            .into_iter()
            .filter(|n| n.as_ref().starts_with(&prefix))
            .count();
        let sequence = u32::try_from(issued).unwrap_or(u32::MAX - 1) + 1;
        Self::new(date, sequence)
    }

    /// Number for `date` with a random sequence below
    /// [`RANDOM_SEQUENCE_LIMIT`].
    ///
    /// Used when no order history is available to count against, such as
    /// an anonymous checkout. Collisions are possible.
    pub fn random(date: NaiveDate) -> Self {
        let sequence = rand::thread_rng().gen_range(0..RANDOM_SEQUENCE_LIMIT);
        Self::new(date, sequence)
    }

    /// The order date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The sequence within the day.
    pub fn sequence(&self) -> u32 {
        self.sequence
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.date.format(DATE_FORMAT), self.sequence)
    }
}

impl FromStr for OrderNumber {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CommerceError::InvalidOrderNumber(s.to_string());

        let (date, sequence) = s.split_once('-').ok_or_else(invalid)?;
        if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if sequence.is_empty() || !sequence.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| invalid())?;
        let sequence = sequence.parse().map_err(|_| invalid())?;
        Ok(Self::new(date, sequence))
    }
}

impl TryFrom<String> for OrderNumber {
    type Error = CommerceError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<OrderNumber> for String {
    fn from(n: OrderNumber) -> Self {
        n.to_string()
    }
}
