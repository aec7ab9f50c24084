//! Statistics over a loaded trip table
//!
//! Four independent reports are computed from a `&TripTable`:
//!
//! - [`TimeStats`]: most common month, day of week and start hour
//! - [`StationStats`]: most common start station, end station and route
//! - [`DurationStats`]: total and mean trip duration
//! - [`UserStats`]: user type and gender counts, birth year extremes
//!
//! Reports never modify the table; anything derived (such as the route
//! string) is built locally and dropped when the report is done.
//!
//! # Ties and empty tables
//!
//! When several values share the highest count, [`mode`] returns the
//! smallest of them. Fields that cannot be computed because there are no
//! rows (or no non-empty values) are `None`.
//!
//! # Examples
//!
//! ```
//! use bikeshare::aggregation::{DurationStats, TimeStats};
//! use bikeshare_core::{TableColumns, Trip, TripTable};
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2017, 6, 23).unwrap().and_hms_opt(15, 9, 32).unwrap();
//! let table = TripTable::new(
//!     vec![Trip::new(0, start, "Wood St", "Damen Ave", 321.0)],
//!     TableColumns::default(),
//! );
//!
//! assert_eq!(TimeStats::from_table(&table).popular_hour, Some(15));
//! assert_eq!(DurationStats::from_table(&table).total_seconds, Some(321.0));
//! ```

use bikeshare_core::types::day_name;
use bikeshare_core::{Month, TripTable};
use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Most frequent value and its count
///
/// Ties go to the smallest value. Returns `None` for an empty input.
///
/// ```
/// use bikeshare::aggregation::mode;
///
/// assert_eq!(mode(["b", "a", "b", "a", "c"]), Some(("a", 2)));
/// assert_eq!(mode(Vec::<u32>::new()), None);
/// ```
pub fn mode<K, I>(values: I) -> Option<(K, usize)>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut best: Option<(K, usize)> = None;
    for (value, count) in counts {
        // Ascending key order: only a strictly higher count replaces the leader
        if best.as_ref().is_none_or(|(_, top)| count > *top) {
            best = Some((value, count));
        }
    }
    best
}

/// Count occurrences of each distinct value
fn value_counts<'a>(values: impl Iterator<Item = &'a str>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Lowercase month name for a calendar month number
pub fn month_name(number: u32) -> String {
    if let Some(month) = Month::from_number(number) {
        return month.name().to_string();
    }
    NaiveDate::from_ymd_opt(2000, number, 1)
        .map(|date| date.format("%B").to_string().to_lowercase())
        .unwrap_or_else(|| number.to_string())
}

/// Most frequent times of travel
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeStats {
    /// Month name, e.g. "june"
    pub popular_month: Option<String>,
    /// Day name, e.g. "Friday"
    pub popular_day: Option<String>,
    /// Hour of day, 0-23
    pub popular_hour: Option<u32>,
}

impl TimeStats {
    pub fn from_table(table: &TripTable) -> Self {
        let popular_month = mode(table.iter().map(|t| t.month)).map(|(m, _)| month_name(m));

        // Key by position in the week so ties resolve in calendar order
        let popular_day = mode(table.iter().map(|t| t.day_of_week.num_days_from_monday()))
            .and_then(|(index, _)| weekday_from_index(index))
            .map(|day| day_name(day).to_string());

        let popular_hour = mode(table.iter().map(|t| t.hour)).map(|(h, _)| h);

        Self {
            popular_month,
            popular_day,
            popular_hour,
        }
    }
}

fn weekday_from_index(index: u32) -> Option<Weekday> {
    let week = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];
    week.get(usize::try_from(index).ok()?).copied()
}

/// A start-to-end route and how many trips took it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteCount {
    pub route: String,
    pub count: usize,
}

/// Most popular stations and trip
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StationStats {
    pub popular_start_station: Option<String>,
    pub popular_end_station: Option<String>,
    /// Route written as "<start> to <end>"
    pub popular_route: Option<RouteCount>,
}

impl StationStats {
    pub fn from_table(table: &TripTable) -> Self {
        let popular_start_station = mode(table.iter().map(|t| t.start_station.as_str()))
            .map(|(station, _)| station.to_string());
        let popular_end_station = mode(table.iter().map(|t| t.end_station.as_str()))
            .map(|(station, _)| station.to_string());
        let popular_route = mode(
            table
                .iter()
                .map(|t| format!("{} to {}", t.start_station, t.end_station)),
        )
        .map(|(route, count)| RouteCount { route, count });

        Self {
            popular_start_station,
            popular_end_station,
            popular_route,
        }
    }
}

/// Total and average trip duration
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DurationStats {
    pub trip_count: usize,
    pub total_seconds: Option<f64>,
    pub mean_seconds: Option<f64>,
}

impl DurationStats {
    pub fn from_table(table: &TripTable) -> Self {
        let trip_count = table.len();
        if trip_count == 0 {
            return Self::default();
        }

        let total: f64 = table.iter().map(|t| t.trip_duration).sum();
        Self {
            trip_count,
            total_seconds: Some(total),
            mean_seconds: Some(total / trip_count as f64),
        }
    }
}

/// Oldest, youngest and most common birth year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
    pub most_common_count: usize,
}

/// Demographics of the riders
///
/// A `None` category means the source file had no such column. A present
/// column with no values gives an empty map (or `None` birth years).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: Option<BTreeMap<String, usize>>,
    pub genders: Option<BTreeMap<String, usize>>,
    pub birth_years: Option<BirthYearStats>,
}

impl UserStats {
    pub fn from_table(table: &TripTable) -> Self {
        let columns = table.columns();

        let user_types = columns
            .user_type
            .then(|| value_counts(table.iter().filter_map(|t| t.user_type.as_deref())));

        let genders = columns
            .gender
            .then(|| value_counts(table.iter().filter_map(|t| t.gender.as_deref())));

        let birth_years = if columns.birth_year {
            let years = || table.iter().filter_map(|t| t.birth_year);
            match (years().min(), years().max(), mode(years())) {
                (Some(earliest), Some(most_recent), Some((most_common, most_common_count))) => {
                    Some(BirthYearStats {
                        earliest,
                        most_recent,
                        most_common,
                        most_common_count,
                    })
                }
                _ => None,
            }
        } else {
            None
        };

        Self {
            user_types,
            genders,
            birth_years,
        }
    }
}

/// A report together with how long it took to compute
#[derive(Debug, Clone)]
pub struct Timed<T> {
    pub stats: T,
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Run `compute` and record its wall-clock time
    pub fn measure(compute: impl FnOnce() -> T) -> Self {
        let started = Instant::now();
        let stats = compute();
        Self {
            stats,
            elapsed: started.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::{TableColumns, Trip};
    use chrono::{NaiveDateTime, Timelike};

    fn at(month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn trip(row_id: usize, start: NaiveDateTime, from: &str, to: &str, secs: f64) -> Trip {
        Trip::new(row_id, start, from, to, secs)
    }

    fn sample_table() -> TripTable {
        let trips = vec![
            // 2017-03-17 is a Friday
            trip(0, at(3, 17, 8), "Canal St", "Clark St", 300.0)
                .with_user_type("Subscriber")
                .with_gender("Male")
                .with_birth_year(1985),
            trip(1, at(3, 17, 17), "Canal St", "Clark St", 600.0)
                .with_user_type("Subscriber")
                .with_gender("Female")
                .with_birth_year(1990),
            trip(2, at(3, 24, 17), "Wells St", "Canal St", 900.0)
                .with_user_type("Customer")
                .with_birth_year(1990),
            trip(3, at(4, 3, 17), "Canal St", "Wells St", 1200.0).with_user_type("Subscriber"),
        ];
        TripTable::new(trips, TableColumns::all())
    }

    #[test]
    fn test_mode_tie_breaks_to_smallest() {
        assert_eq!(mode([3, 1, 3, 1, 2]), Some((1, 2)));
        assert_eq!(mode(["x", "y", "y"]), Some(("y", 2)));
        assert_eq!(mode([7]), Some((7, 1)));
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "january");
        assert_eq!(month_name(6), "june");
        assert_eq!(month_name(7), "july");
        assert_eq!(month_name(13), "13");
    }

    #[test]
    fn test_time_stats() {
        let stats = TimeStats::from_table(&sample_table());
        assert_eq!(stats.popular_month.as_deref(), Some("march"));
        assert_eq!(stats.popular_day.as_deref(), Some("Friday"));
        assert_eq!(stats.popular_hour, Some(17));
    }

    #[test]
    fn test_time_stats_hour_matches_column_mode() {
        let table = sample_table();
        let hours: Vec<u32> = table.iter().map(|t| t.start_time.hour()).collect();
        let expected = mode(hours).map(|(h, _)| h);
        assert_eq!(TimeStats::from_table(&table).popular_hour, expected);
    }

    #[test]
    fn test_station_stats() {
        let stats = StationStats::from_table(&sample_table());
        assert_eq!(stats.popular_start_station.as_deref(), Some("Canal St"));
        assert_eq!(stats.popular_end_station.as_deref(), Some("Clark St"));
        assert_eq!(
            stats.popular_route,
            Some(RouteCount {
                route: "Canal St to Clark St".to_string(),
                count: 2,
            })
        );
    }

    #[test]
    fn test_duration_stats() {
        let stats = DurationStats::from_table(&sample_table());
        assert_eq!(stats.trip_count, 4);
        assert_eq!(stats.total_seconds, Some(3000.0));
        assert_eq!(stats.mean_seconds, Some(750.0));
    }

    #[test]
    fn test_user_stats() {
        let stats = UserStats::from_table(&sample_table());

        let user_types = stats.user_types.unwrap();
        assert_eq!(user_types["Subscriber"], 3);
        assert_eq!(user_types["Customer"], 1);

        // Trips without a gender are not counted
        let genders = stats.genders.unwrap();
        assert_eq!(genders.values().sum::<usize>(), 2);

        assert_eq!(
            stats.birth_years,
            Some(BirthYearStats {
                earliest: 1985,
                most_recent: 1990,
                most_common: 1990,
                most_common_count: 2,
            })
        );
    }

    #[test]
    fn test_user_stats_without_columns() {
        let table = TripTable::new(
            vec![trip(0, at(1, 2, 9), "A", "B", 60.0)],
            TableColumns::default(),
        );
        let stats = UserStats::from_table(&table);
        assert_eq!(stats.user_types, None);
        assert_eq!(stats.genders, None);
        assert_eq!(stats.birth_years, None);
    }

    #[test]
    fn test_empty_table() {
        let table = TripTable::new(Vec::new(), TableColumns::all());

        assert_eq!(TimeStats::from_table(&table), TimeStats::default());
        assert_eq!(StationStats::from_table(&table), StationStats::default());
        assert_eq!(DurationStats::from_table(&table), DurationStats::default());

        let users = UserStats::from_table(&table);
        assert_eq!(users.user_types, Some(BTreeMap::new()));
        assert_eq!(users.birth_years, None);
    }

    #[test]
    fn test_reports_leave_table_untouched() {
        let table = sample_table();
        let before = table.trips().to_vec();
        let _ = TimeStats::from_table(&table);
        let _ = StationStats::from_table(&table);
        let _ = DurationStats::from_table(&table);
        let _ = UserStats::from_table(&table);
        assert_eq!(table.trips(), before.as_slice());
    }
}
