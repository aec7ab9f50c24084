//! Common test utilities and fixtures for bikeshare tests
//!
//! Fixture trips are generated deterministically so tests can recompute
//! any statistic independently from the same row index.

#![allow(dead_code)]

use bikeshare::{
    data_loader::DataLoader, output::get_formatter, prompt::Prompter, session::Session,
};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::io::Cursor;
use std::path::Path;
use tempfile::TempDir;

/// Stations used by the generated trips
pub const TEST_STATIONS: &[&str] = &[
    "Canal St & Adams St",
    "Clinton St & Washington Blvd",
    "Streeter Dr & Grand Ave",
    "Lake Shore Dr & Monroe St",
    "Michigan Ave & Oak St",
];

pub const FULL_HEADER: &str =
    ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year";
pub const NARROW_HEADER: &str = ",Start Time,End Time,Trip Duration,Start Station,End Station";

/// Start time of generated trip `i`
///
/// Trips are spaced 19h07m apart from 2017-01-01 so a couple of hundred rows
/// cover January to June and every weekday and hour.
pub fn start_time(i: usize) -> NaiveDateTime {
    let base = NaiveDate::from_ymd_opt(2017, 1, 1)
        .unwrap()
        .and_hms_opt(0, 5, 0)
        .unwrap();
    base + Duration::minutes(i as i64 * (19 * 60 + 7))
}

pub fn duration(i: usize) -> f64 {
    (60 + (i * 37) % 1500) as f64
}

pub fn start_station(i: usize) -> &'static str {
    TEST_STATIONS[i % TEST_STATIONS.len()]
}

pub fn end_station(i: usize) -> &'static str {
    TEST_STATIONS[(i * 3 + 1) % TEST_STATIONS.len()]
}

/// One CSV line for trip `i`, with or without the rider columns
pub fn trip_line(i: usize, with_riders: bool) -> String {
    let start = start_time(i);
    let end = start + Duration::seconds(duration(i) as i64);
    let mut line = format!(
        "{},{},{},{},{},{}",
        1000 + i,
        start.format("%Y-%m-%d %H:%M:%S"),
        end.format("%Y-%m-%d %H:%M:%S"),
        duration(i),
        start_station(i),
        end_station(i),
    );

    if with_riders {
        let user_type = if i % 3 == 0 { "Customer" } else { "Subscriber" };
        let gender = match i % 4 {
            0 => "Male",
            1 => "Female",
            _ => "",
        };
        let birth_year = if i % 7 == 0 {
            String::new()
        } else {
            format!("{}.0", 1950 + i % 50)
        };
        line.push_str(&format!(",{user_type},{gender},{birth_year}"));
    }

    line
}

/// Write a city file with `rows` generated trips
pub fn write_city_file(dir: &Path, file_name: &str, rows: usize, with_riders: bool) {
    let header = if with_riders { FULL_HEADER } else { NARROW_HEADER };
    let mut contents = String::from(header);
    contents.push('\n');
    for i in 0..rows {
        contents.push_str(&trip_line(i, with_riders));
        contents.push('\n');
    }
    std::fs::write(dir.join(file_name), contents).unwrap();
}

/// A data directory holding all three city files
///
/// Washington is written without rider columns.
pub fn create_data_dir(rows: usize) -> TempDir {
    let dir = TempDir::new().unwrap();
    write_city_file(dir.path(), "chicago.csv", rows, true);
    write_city_file(dir.path(), "new_york_city.csv", rows, true);
    write_city_file(dir.path(), "washington.csv", rows, false);
    dir
}

/// A session reading `script` as its input and capturing its output
pub fn scripted_session(
    data_dir: &Path,
    script: &str,
    json: bool,
) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
    let prompter = Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
    Session::new(prompter, DataLoader::new(data_dir), get_formatter(json))
}
