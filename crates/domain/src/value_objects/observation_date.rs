//! Observation date value object
//!
//! A calendar date whose only accepted text form is the zero-padded
//! ISO 8601 `YYYY-MM-DD`. Because parsing rejects every other spelling,
//! ordering two `ObservationDate`s gives the same answer as comparing their
//! text, which is what the storage layer does.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::ObservationDate;
//!
//! let date = ObservationDate::parse("2017-08-23").expect("valid date");
//! assert_eq!(date.to_string(), "2017-08-23");
//!
//! // Only the canonical form is accepted
//! assert!(ObservationDate::parse("2017-8-23").is_err());
//! assert!(ObservationDate::parse("23/08/2017").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// `chrono` format string of the canonical representation
const FORMAT: &str = "%Y-%m-%d";

/// Length of `YYYY-MM-DD`
const CANONICAL_LEN: usize = 10;

/// A validated observation date
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObservationDate(NaiveDate);

impl ObservationDate {
    /// Parse a canonical `YYYY-MM-DD` date
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDate` for anything that is not a real
    /// calendar date written in exactly that form.
    ///
    /// # Examples
    ///
    /// ```
    /// use domain::value_objects::ObservationDate;
    ///
    /// assert!(ObservationDate::parse("2016-02-29").is_ok());
    /// assert!(ObservationDate::parse("2017-02-29").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        if input.len() != CANONICAL_LEN {
            return Err(DomainError::invalid_date(input));
        }

        let date = NaiveDate::parse_from_str(input, FORMAT)
            .map_err(|_| DomainError::invalid_date(input))?;
        let parsed = Self(date);

        // chrono tolerates unpadded fields; the text must round-trip exactly
        if parsed.to_string() != input {
            return Err(DomainError::invalid_date(input));
        }

        Ok(parsed)
    }

    /// Wrap an existing `NaiveDate`
    #[must_use]
    pub const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Get the underlying `NaiveDate`
    #[must_use]
    pub const fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// The same calendar day one year earlier
    ///
    /// Uses calendar arithmetic rather than a fixed 365 days. February 29th
    /// lands on February 28th when the previous year is not a leap year.
    ///
    /// # Examples
    ///
    /// ```
    /// use domain::value_objects::ObservationDate;
    ///
    /// let leap = ObservationDate::parse("2016-02-29").unwrap();
    /// assert_eq!(leap.one_year_earlier().unwrap().to_string(), "2015-02-28");
    /// ```
    pub fn one_year_earlier(self) -> Result<Self, DomainError> {
        self.0
            .checked_sub_months(Months::new(12))
            .map(Self)
            .ok_or_else(|| DomainError::invalid_date(format!("one year before {self}")))
    }
}

impl fmt::Display for ObservationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl FromStr for ObservationDate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for ObservationDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for ObservationDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Custom deserialization that only accepts the canonical form
impl<'de> Deserialize<'de> for ObservationDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}
