use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub type Count = u64;

/// Date format used both for user input and for the store's `Timestamp` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Header row of the backing store, in column order.
pub const STORE_HEADER: [&str; 4] = [
    "Timestamp",
    "StepsCount",
    "CaloriesBurned",
    "WorkoutDurationMinutes",
];

/// One logged day. Every numeric field is unsigned so the "never negative"
/// invariant is carried by the type itself; the date has no time-of-day.
///
/// Several records may share a date: the store doesn't care, only the
/// eraser treats the date as a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Record {
    #[serde(rename = "Timestamp")]
    pub date: NaiveDate,
    #[serde(rename = "StepsCount")]
    pub steps: Count,
    #[serde(rename = "CaloriesBurned")]
    pub calories: Count,
    #[serde(rename = "WorkoutDurationMinutes")]
    pub duration_minutes: Count,
}

impl Record {
    pub fn new(date: NaiveDate, steps: Count, calories: Count, duration_minutes: Count) -> Self {
        Self {
            date,
            steps,
            calories,
            duration_minutes,
        }
    }
}

/// Everything that can go wrong in the fitness log. The first three are
/// user input problems and get recovered by reprompting; the others abort
/// the current operation and are reported to the user, the process lives on.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid date format `{0}`. Please use YYYY-MM-DD.")]
    InvalidDate(String),
    #[error("Invalid input `{0}`. Please enter a positive whole number.")]
    InvalidNumber(String),
    #[error("Invalid input `{0}`. The value cannot be negative.")]
    Negative(String),
    #[error("The data file ({}) is not found. Please add data first.", .0.display())]
    StoreNotFound(PathBuf),
    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },
    #[error("Invalid date range: {0}")]
    InvalidRange(String),
}
