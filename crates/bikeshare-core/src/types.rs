//! Core domain types for bikeshare
//!
//! These types give strong typing to the concepts the rest of the program
//! passes around: which city is being explored, which month/day restricts
//! it, and the trips themselves.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{BikeshareError, Result};
use crate::filters::TripFilter;
use tracing::debug;

/// Supported bike-share cities
///
/// # Examples
/// ```
/// use bikeshare_core::types::City;
///
/// let city: City = "New York City".parse().unwrap();
/// assert_eq!(city, City::NewYorkCity);
/// assert_eq!(city.file_name(), "new_york_city.csv");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    #[serde(rename = "chicago")]
    Chicago,
    #[serde(rename = "new york city")]
    NewYorkCity,
    #[serde(rename = "washington")]
    Washington,
}

impl City {
    /// Every supported city, in prompt order
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lowercase name as typed at the prompt
    pub fn name(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Name of the CSV file holding this city's trips
    pub fn file_name(&self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|city| city.name() == wanted)
            .ok_or_else(|| BikeshareError::UnknownCity(s.to_string()))
    }
}

/// Months covered by the datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    pub const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    /// Calendar number, January = 1
    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }

    pub fn from_number(number: u32) -> Option<Self> {
        let index = usize::try_from(number.checked_sub(1)?).ok()?;
        Month::ALL.get(index).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Full English name of a weekday, e.g. "Friday"
pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Which axes the user wants to restrict the data by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    None,
    Month,
    Day,
    Both,
}

impl FilterMode {
    pub fn includes_month(&self) -> bool {
        matches!(self, FilterMode::Month | FilterMode::Both)
    }

    pub fn includes_day(&self) -> bool {
        matches!(self, FilterMode::Day | FilterMode::Both)
    }
}

impl FromStr for FilterMode {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(FilterMode::None),
            "month" => Ok(FilterMode::Month),
            "day" => Ok(FilterMode::Day),
            "both" => Ok(FilterMode::Both),
            other => Err(BikeshareError::InvalidArgument(format!(
                "unknown filter mode '{other}'"
            ))),
        }
    }
}

/// The city, month, and day chosen for one session iteration
///
/// `None` for month or day means "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: City,
    pub month: Option<Month>,
    pub day: Option<Weekday>,
}

impl FilterSelection {
    /// A selection with no month or day restriction
    pub fn unrestricted(city: City) -> Self {
        Self {
            city,
            month: None,
            day: None,
        }
    }

    /// The row filter this selection describes
    pub fn filter(&self) -> TripFilter {
        let mut filter = TripFilter::new();
        if let Some(month) = self.month {
            filter = filter.with_month(month);
        }
        if let Some(day) = self.day {
            filter = filter.with_day(day);
        }
        filter
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = self.month.map_or("all", |m| m.name());
        let day = self.day.map_or("all", day_name);
        write!(f, "city={} month={} day={}", self.city, month, day)
    }
}

/// A single trip with its derived time columns
///
/// `month`, `day_of_week` and `hour` are computed once from `start_time`
/// when the trip is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    /// 0-based position of the record in its source file
    pub row_id: usize,
    pub start_time: NaiveDateTime,
    /// End time as written in the file
    pub end_time: Option<String>,
    /// Duration in seconds
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    pub month: u32,
    pub day_of_week: Weekday,
    pub hour: u32,
}

impl Trip {
    pub fn new(
        row_id: usize,
        start_time: NaiveDateTime,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        trip_duration: f64,
    ) -> Self {
        Self {
            row_id,
            start_time,
            end_time: None,
            trip_duration,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: None,
            gender: None,
            birth_year: None,
            month: start_time.month(),
            day_of_week: start_time.weekday(),
            hour: start_time.hour(),
        }
    }

    pub fn with_end_time(mut self, end_time: impl Into<String>) -> Self {
        self.end_time = Some(end_time.into());
        self
    }

    pub fn with_user_type(mut self, user_type: impl Into<String>) -> Self {
        self.user_type = Some(user_type.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_birth_year(mut self, birth_year: i32) -> Self {
        self.birth_year = Some(birth_year);
        self
    }
}

/// Which optional columns the source file carried
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableColumns {
    pub end_time: bool,
    pub user_type: bool,
    pub gender: bool,
    pub birth_year: bool,
}

impl TableColumns {
    /// Every optional column present
    pub fn all() -> Self {
        Self {
            end_time: true,
            user_type: true,
            gender: true,
            birth_year: true,
        }
    }
}

/// An in-memory table of trips for one city
#[derive(Debug, Clone, Default)]
pub struct TripTable {
    trips: Vec<Trip>,
    columns: TableColumns,
}

impl TripTable {
    pub fn new(trips: Vec<Trip>, columns: TableColumns) -> Self {
        Self { trips, columns }
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn columns(&self) -> TableColumns {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trip> {
        self.trips.iter()
    }

    /// Drop every trip the filter rejects; returns how many were dropped
    pub fn retain(&mut self, filter: &TripFilter) -> usize {
        let before = self.trips.len();
        self.trips.retain(|trip| filter.matches(trip));
        let dropped = before - self.trips.len();
        debug!(before, kept = self.trips.len(), ?filter, "Applied trip filter");
        dropped
    }
}

impl<'a> IntoIterator for &'a TripTable {
    type Item = &'a Trip;
    type IntoIter = std::slice::Iter<'a, Trip>;

    fn into_iter(self) -> Self::IntoIter {
        self.trips.iter()
    }
}
