//! Output formatting module for bikeshare
//!
//! This module renders the statistics reports and pages of raw trips:
//! - Narrative text for interactive terminal use
//! - JSON for machine-readable output
//!
//! # Examples
//!
//! ```
//! use bikeshare::aggregation::{DurationStats, Timed};
//! use bikeshare::output::get_formatter;
//! use bikeshare_core::TripTable;
//!
//! let report = Timed::measure(|| DurationStats::from_table(&TripTable::default()));
//!
//! let text = get_formatter(false).format_duration_stats(&report);
//! assert!(text.contains("No data"));
//!
//! let json = get_formatter(true).format_duration_stats(&report);
//! assert!(json.contains("\"trip_count\": 0"));
//! ```

use crate::aggregation::{DurationStats, StationStats, TimeStats, Timed, UserStats};
use crate::data_loader::{
    BIRTH_YEAR, END_STATION, END_TIME, GENDER, START_STATION, START_TIME, TRIP_DURATION,
    USER_TYPE,
};
use bikeshare_core::types::day_name;
use bikeshare_core::{TableColumns, Trip};
use prettytable::{Cell, Row, Table, format, row};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Duration;

const NO_DATA: &str = "No data";
const SEPARATOR: &str = "----------------------------------------";

/// Trait for output formatters
///
/// Each report method receives the computed statistics together with the
/// time it took to compute them.
pub trait OutputFormatter {
    /// Format the most frequent times of travel
    fn format_time_stats(&self, report: &Timed<TimeStats>) -> String;

    /// Format the most popular stations and route
    fn format_station_stats(&self, report: &Timed<StationStats>) -> String;

    /// Format total and mean trip duration
    fn format_duration_stats(&self, report: &Timed<DurationStats>) -> String;

    /// Format rider demographics
    fn format_user_stats(&self, report: &Timed<UserStats>) -> String;

    /// Format a page of raw trips
    fn format_trips(&self, trips: &[Trip], columns: TableColumns) -> String;
}

/// Narrative formatter for human-readable output
pub struct TableFormatter;

impl TableFormatter {
    /// Render seconds as e.g. "1d 2h 3m 4s", dropping leading zero units
    fn format_duration(seconds: f64) -> String {
        let total = seconds.round().max(0.0) as u64;
        let (days, hours, minutes, secs) = (
            total / 86_400,
            total % 86_400 / 3_600,
            total % 3_600 / 60,
            total % 60,
        );

        if days > 0 {
            format!("{days}d {hours}h {minutes}m {secs}s")
        } else if hours > 0 {
            format!("{hours}h {minutes}m {secs}s")
        } else if minutes > 0 {
            format!("{minutes}m {secs}s")
        } else {
            format!("{secs}s")
        }
    }

    fn or_no_data<T: ToString>(value: Option<T>) -> String {
        value.map_or_else(|| NO_DATA.to_string(), |v| v.to_string())
    }

    fn footer(output: &mut String, elapsed: Duration) {
        let _ = write!(
            output,
            "\nThis took {:.6} seconds.\n{SEPARATOR}",
            elapsed.as_secs_f64()
        );
    }

    fn counts_table(title: &str, counts: &BTreeMap<String, usize>) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> title, b -> "Count"]);
        for (value, count) in counts {
            table.add_row(row![value, r -> count]);
        }
        table.to_string()
    }
}

impl OutputFormatter for TableFormatter {
    fn format_time_stats(&self, report: &Timed<TimeStats>) -> String {
        let stats = &report.stats;
        let mut output = String::from("\nCalculating The Most Frequent Times of Travel...\n\n");

        let _ = writeln!(output, "What is the most popular month for traveling?");
        let _ = writeln!(output, "{}\n", Self::or_no_data(stats.popular_month.as_ref()));
        let _ = writeln!(output, "What is the most popular day for traveling?");
        let _ = writeln!(output, "{}\n", Self::or_no_data(stats.popular_day.as_ref()));
        let _ = writeln!(output, "What is the most popular hour for traveling?");
        let _ = writeln!(output, "{}", Self::or_no_data(stats.popular_hour));

        Self::footer(&mut output, report.elapsed);
        output
    }

    fn format_station_stats(&self, report: &Timed<StationStats>) -> String {
        let stats = &report.stats;
        let mut output = String::from("\nCalculating The Most Popular Stations and Trip...\n\n");

        let _ = writeln!(
            output,
            "Most trips start from: {}",
            Self::or_no_data(stats.popular_start_station.as_ref())
        );
        let _ = writeln!(
            output,
            "While most of them end at: {}",
            Self::or_no_data(stats.popular_end_station.as_ref())
        );
        match &stats.popular_route {
            Some(route) => {
                let _ = writeln!(
                    output,
                    "A total of {} trips go from {}, which makes it the most used line!",
                    route.count, route.route
                );
            }
            None => {
                let _ = writeln!(output, "Most used line: {NO_DATA}");
            }
        }

        Self::footer(&mut output, report.elapsed);
        output
    }

    fn format_duration_stats(&self, report: &Timed<DurationStats>) -> String {
        let stats = &report.stats;
        let mut output = String::from("\nCalculating Trip Duration...\n\n");

        match (stats.total_seconds, stats.mean_seconds) {
            (Some(total), Some(mean)) => {
                let _ = writeln!(
                    output,
                    "Total duration: {total:.1} seconds ({})",
                    Self::format_duration(total)
                );
                let _ = writeln!(
                    output,
                    "Avg duration: {mean:.1} seconds ({}) over {} trips",
                    Self::format_duration(mean),
                    stats.trip_count
                );
            }
            _ => {
                let _ = writeln!(output, "Total duration: {NO_DATA}");
                let _ = writeln!(output, "Avg duration: {NO_DATA}");
            }
        }

        Self::footer(&mut output, report.elapsed);
        output
    }

    fn format_user_stats(&self, report: &Timed<UserStats>) -> String {
        let stats = &report.stats;
        let mut output = String::from("\nCalculating User Stats...\n\n");

        match &stats.user_types {
            Some(counts) if !counts.is_empty() => {
                output.push_str(&Self::counts_table(USER_TYPE, counts));
            }
            _ => {
                let _ = writeln!(output, "No user types data to share");
            }
        }

        match &stats.genders {
            Some(counts) if !counts.is_empty() => {
                output.push('\n');
                output.push_str(&Self::counts_table(GENDER, counts));
            }
            _ => {
                let _ = writeln!(output, "\nNo gender data to share");
            }
        }

        let _ = writeln!(
            output,
            "\nWhat is the oldest, youngest, and most popular year of birth, respectively?"
        );
        match &stats.birth_years {
            Some(years) => {
                let _ = writeln!(
                    output,
                    "({}, {}, {} as {} share this birth year)",
                    years.earliest, years.most_recent, years.most_common, years.most_common_count
                );
            }
            None => {
                let _ = writeln!(output, "No birth year data to share");
            }
        }

        Self::footer(&mut output, report.elapsed);
        output
    }

    fn format_trips(&self, trips: &[Trip], columns: TableColumns) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        let mut titles = vec![Cell::new(""), Cell::new(START_TIME).style_spec("b")];
        if columns.end_time {
            titles.push(Cell::new(END_TIME).style_spec("b"));
        }
        for title in [TRIP_DURATION, START_STATION, END_STATION] {
            titles.push(Cell::new(title).style_spec("b"));
        }
        for (present, title) in [
            (columns.user_type, USER_TYPE),
            (columns.gender, GENDER),
            (columns.birth_year, BIRTH_YEAR),
        ] {
            if present {
                titles.push(Cell::new(title).style_spec("b"));
            }
        }
        titles.push(Cell::new("month").style_spec("b"));
        titles.push(Cell::new("day_of_week").style_spec("b"));
        table.set_titles(Row::new(titles));

        for trip in trips {
            let mut cells = vec![
                Cell::new(&trip.row_id.to_string()),
                Cell::new(&trip.start_time.format("%Y-%m-%d %H:%M:%S").to_string()),
            ];
            if columns.end_time {
                cells.push(Cell::new(trip.end_time.as_deref().unwrap_or("")));
            }
            cells.push(Cell::new(&trip.trip_duration.to_string()).style_spec("r"));
            cells.push(Cell::new(&trip.start_station));
            cells.push(Cell::new(&trip.end_station));
            if columns.user_type {
                cells.push(Cell::new(trip.user_type.as_deref().unwrap_or("")));
            }
            if columns.gender {
                cells.push(Cell::new(trip.gender.as_deref().unwrap_or("")));
            }
            if columns.birth_year {
                let year = trip.birth_year.map(|y| y.to_string()).unwrap_or_default();
                cells.push(Cell::new(&year));
            }
            cells.push(Cell::new(&trip.month.to_string()).style_spec("c"));
            cells.push(Cell::new(day_name(trip.day_of_week)));
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }
}

/// JSON formatter for machine-readable output
///
/// Each report is one pretty-printed JSON object keyed by report name.
pub struct JsonFormatter;

impl JsonFormatter {
    fn render(key: &str, stats: Value, elapsed: Duration) -> String {
        let mut output = Map::new();
        output.insert(key.to_string(), stats);
        output.insert("elapsed_seconds".to_string(), json!(elapsed.as_secs_f64()));
        format!("{:#}", Value::Object(output))
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_time_stats(&self, report: &Timed<TimeStats>) -> String {
        Self::render("time_stats", json!(report.stats), report.elapsed)
    }

    fn format_station_stats(&self, report: &Timed<StationStats>) -> String {
        Self::render("station_stats", json!(report.stats), report.elapsed)
    }

    fn format_duration_stats(&self, report: &Timed<DurationStats>) -> String {
        Self::render("duration_stats", json!(report.stats), report.elapsed)
    }

    fn format_user_stats(&self, report: &Timed<UserStats>) -> String {
        Self::render("user_stats", json!(report.stats), report.elapsed)
    }

    fn format_trips(&self, trips: &[Trip], columns: TableColumns) -> String {
        let rows: Vec<Value> = trips
            .iter()
            .map(|trip| {
                let mut row = json!({
                    "row": trip.row_id,
                    "start_time": trip.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
                    "trip_duration": trip.trip_duration,
                    "start_station": trip.start_station,
                    "end_station": trip.end_station,
                    "month": trip.month,
                    "day_of_week": day_name(trip.day_of_week),
                });
                if columns.end_time {
                    row["end_time"] = json!(trip.end_time);
                }
                if columns.user_type {
                    row["user_type"] = json!(trip.user_type);
                }
                if columns.gender {
                    row["gender"] = json!(trip.gender);
                }
                if columns.birth_year {
                    row["birth_year"] = json!(trip.birth_year);
                }
                row
            })
            .collect();

        format!("{:#}", json!({ "trips": rows }))
    }
}

/// Get appropriate formatter based on JSON flag
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter)
    }
}
