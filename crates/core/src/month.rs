//! Month keys and calendar arithmetic.
//!
//! A month is identified by a `YYYY-MM` key. Expenses belong to the month of
//! their date; range queries use the half-open interval
//! `[first_day, next_month_start)` so month-end boundaries are exact.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// A calendar month, e.g. `2025-02`.
///
/// Internally stored as the first day of the month, so ordering follows the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey(NaiveDate);

impl MonthKey {
    /// Creates a month key from a year and a 1-based month.
    ///
    /// Returns `None` unless the year has four digits and the month is 1..=12.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(0..=9999).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// Returns the month containing `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// Calendar year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Calendar month, 1-based.
    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// First day of the month (inclusive lower bound).
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.0
    }

    /// First day of the following month (exclusive upper bound).
    #[must_use]
    pub fn next_month_start(self) -> NaiveDate {
        // Four-digit years never overflow chrono's range.
        self.0
            .checked_add_months(Months::new(1))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Last day of the month.
    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        self.next_month_start().pred_opt().unwrap_or(self.0)
    }

    /// Number of days in the month (28..=31).
    #[must_use]
    pub fn day_count(self) -> u32 {
        self.last_day().day()
    }

    /// Returns true if `date` falls inside this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.first_day() && date < self.next_month_start()
    }

    /// Days left in the month as seen from `today`, counting today.
    ///
    /// - Past months have nothing left: `0`.
    /// - Future months have every day left: [`Self::day_count`].
    /// - The current month counts from today to month end, floored at `1`.
    #[must_use]
    pub fn days_remaining(self, today: NaiveDate) -> u32 {
        let current = Self::from_date(today);
        let last_day = self.day_count();

        match self.cmp(&current) {
            std::cmp::Ordering::Less => 0,
            std::cmp::Ordering::Greater => last_day,
            std::cmp::Ordering::Equal => (last_day + 1).saturating_sub(today.day()).max(1),
        }
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl std::str::FromStr for MonthKey {
    type Err = ValidationError;

    /// Parses `^\d{4}-(0[1-9]|1[0-2])$`, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bytes = s.as_bytes();

        let well_formed = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit);
        if !well_formed {
            return Err(ValidationError::InvalidMonth);
        }

        let year: i32 = s[..4].parse().map_err(|_| ValidationError::InvalidMonth)?;
        let month: u32 = s[5..].parse().map_err(|_| ValidationError::InvalidMonth)?;

        Self::new(year, month).ok_or(ValidationError::InvalidMonth)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
