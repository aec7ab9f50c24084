//! Fixed answer sets accepted at the interactive prompts
//!
//! The lists are plain constants. Callers receive them through a
//! [`Vocabulary`] value so tests can hand in the same sets explicitly.

use chrono::Weekday;

use crate::types::{City, FilterMode, Month};

pub const CITY_NAMES: &[&str] = &["chicago", "new york city", "washington"];

/// Month answers; "all" sits at position 0 so january is 1
pub const MONTH_NAMES: &[&str] = &[
    "all", "january", "february", "march", "april", "may", "june",
];

/// Day answers; "all" sits at position 0 so monday is 1
pub const DAY_NAMES: &[&str] = &[
    "all",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

pub const FILTER_MODE_NAMES: &[&str] = &["none", "month", "day", "both"];

pub const YES_NO: &[&str] = &["yes", "no"];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// The answer sets used by the filter prompts
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary {
    pub cities: &'static [&'static str],
    pub months: &'static [&'static str],
    pub days: &'static [&'static str],
    pub filter_modes: &'static [&'static str],
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            cities: CITY_NAMES,
            months: MONTH_NAMES,
            days: DAY_NAMES,
            filter_modes: FILTER_MODE_NAMES,
        }
    }
}

impl Vocabulary {
    /// Resolve an accepted city answer
    pub fn city(&self, token: &str) -> Option<City> {
        if !self.cities.contains(&token) {
            return None;
        }
        token.parse().ok()
    }

    /// Resolve an accepted filter-mode answer
    pub fn filter_mode(&self, token: &str) -> Option<FilterMode> {
        if !self.filter_modes.contains(&token) {
            return None;
        }
        token.parse().ok()
    }

    /// Resolve an accepted month answer
    ///
    /// Returns `Some(None)` for "all" and `Some(Some(month))` for a month
    /// name; `None` if the token is not in the vocabulary.
    pub fn month(&self, token: &str) -> Option<Option<Month>> {
        match self.months.iter().position(|m| *m == token)? {
            0 => Some(None),
            index => Month::from_number(u32::try_from(index).ok()?).map(Some),
        }
    }

    /// Resolve an accepted day answer, same shape as [`Vocabulary::month`]
    pub fn day(&self, token: &str) -> Option<Option<Weekday>> {
        match self.days.iter().position(|d| *d == token)? {
            0 => Some(None),
            index => WEEKDAYS.get(index - 1).copied().map(Some),
        }
    }
}
