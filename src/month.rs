//! Calendar month keys in `YYYY-MM` form.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::AppError;

lazy_static! {
    static ref MONTH_KEY: Regex = Regex::new(r"^(\d{4})-(0[1-9]|1[0-2])$").expect("Invalid month key pattern");
}

pub const SHORT_MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const LONG_MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month, the grouping key shared by budgets and transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || !(1..=9999).contains(&year) {
            return None;
        }
        Some(Self { year, month })
    }

    /// The month a date falls in.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month number, 1-based.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Exclusive upper bound of the month's date range.
    pub fn next_month_start(&self) -> NaiveDate {
        self.next().first_day()
    }

    pub fn days_in_month(&self) -> u32 {
        let days = self
            .next_month_start()
            .signed_duration_since(self.first_day())
            .num_days();
        days as u32
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }

    /// Human label such as "July 2025".
    pub fn long_label(&self) -> String {
        format!("{} {}", LONG_MONTH_NAMES[(self.month - 1) as usize], self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid =
            || AppError::ValidationError(format!("Month '{s}' must be in YYYY-MM format"));

        let captures = MONTH_KEY.captures(s.trim()).ok_or_else(invalid)?;
        let year = captures[1].parse::<i32>().map_err(|_| invalid())?;
        let month = captures[2].parse::<u32>().map_err(|_| invalid())?;

        YearMonth::new(year, month).ok_or_else(invalid)
    }
}

impl serde::Serialize for YearMonth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for YearMonth {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Validator hook for DTO fields that carry a month key.
pub fn validate_month_key(value: &str) -> Result<(), validator::ValidationError> {
    if MONTH_KEY.is_match(value) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_month"))
    }
}
