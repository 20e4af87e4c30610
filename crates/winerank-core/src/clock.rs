//! Run date source
//!
//! The pipeline stamps every record with the date of the run. Reading the date
//! through `Clock` lets tests pin it instead of depending on wall-clock time.

use chrono::{Local, NaiveDate};

/// Source of the run date
pub trait Clock {
    /// The current calendar date
    fn today(&self) -> NaiveDate;
}

/// Local process time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock frozen at a single date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
