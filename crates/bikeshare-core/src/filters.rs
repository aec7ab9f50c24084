//! Filtering module for trips
//!
//! A `TripFilter` restricts a table by the derived month number and
//! day-of-week of each trip's start time. Both axes are optional and match
//! by exact equality.
//!
//! # Examples
//!
//! ```
//! use bikeshare_core::{filters::TripFilter, types::Month};
//! use chrono::Weekday;
//!
//! // Fridays in March
//! let filter = TripFilter::new()
//!     .with_month(Month::March)
//!     .with_day(Weekday::Fri);
//! assert!(!filter.is_unrestricted());
//! ```

use crate::types::{Month, Trip};
use chrono::Weekday;

/// Filter configuration for trips
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TripFilter {
    /// Month to keep
    pub month: Option<Month>,
    /// Day of week to keep
    pub day: Option<Weekday>,
}

impl TripFilter {
    /// Create a new filter with no restrictions
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the month filter
    pub fn with_month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }

    /// Set the day-of-week filter
    pub fn with_day(mut self, day: Weekday) -> Self {
        self.day = Some(day);
        self
    }

    /// True when the filter keeps every trip
    pub fn is_unrestricted(&self) -> bool {
        self.month.is_none() && self.day.is_none()
    }

    /// Check if a trip passes the filter
    pub fn matches(&self, trip: &Trip) -> bool {
        if let Some(month) = self.month {
            if trip.month != month.number() {
                return false;
            }
        }

        if let Some(day) = self.day {
            if trip.day_of_week != day {
                return false;
            }
        }

        true
    }
}
