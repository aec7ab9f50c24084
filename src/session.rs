//! The interactive session loop
//!
//! One iteration collects filters, loads the matching trips, prints the four
//! reports in a fixed order (time, station, duration, user), offers to page
//! through raw rows and finally asks whether to start over.

use crate::aggregation::{DurationStats, StationStats, TimeStats, Timed, UserStats};
use crate::data_loader::DataLoader;
use crate::error::Result;
use crate::output::OutputFormatter;
use crate::prompt::Prompter;
use crate::selection::collect_filters;
use crate::viewer::RowViewer;
use bikeshare_core::{TripTable, Vocabulary};
use std::io::{BufRead, Write};
use tracing::info;

pub const RESTART_PROMPT: &str = "\nWould you like to restart? Enter yes or no.\n";

/// Ties the prompts, the loader and the reports together
pub struct Session<R, W> {
    prompter: Prompter<R, W>,
    loader: DataLoader,
    formatter: Box<dyn OutputFormatter>,
    vocabulary: Vocabulary,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        prompter: Prompter<R, W>,
        loader: DataLoader,
        formatter: Box<dyn OutputFormatter>,
    ) -> Self {
        Self {
            prompter,
            loader,
            formatter,
            vocabulary: Vocabulary::default(),
        }
    }

    /// Run iterations until the user declines to restart
    ///
    /// Returns the number of completed iterations.
    pub fn run(&mut self) -> Result<usize> {
        let mut iterations = 0;
        loop {
            let restart = self.run_once()?;
            iterations += 1;
            if !restart {
                info!("Session finished after {iterations} iteration(s)");
                return Ok(iterations);
            }
        }
    }

    /// Run one iteration; returns true if the user asked to restart
    pub fn run_once(&mut self) -> Result<bool> {
        let selection = collect_filters(&mut self.prompter, &self.vocabulary)?;
        let table = self.loader.load(&selection)?;
        info!("Reporting on {} trips", table.len());

        self.report(&table)?;
        RowViewer::new(&table, self.formatter.as_ref()).run(&mut self.prompter)?;

        let answer = self.prompter.ask(RESTART_PROMPT)?;
        Ok(answer == "yes")
    }

    /// Print the four reports for `table`
    pub fn report(&mut self, table: &TripTable) -> Result<()> {
        let time = Timed::measure(|| TimeStats::from_table(table));
        self.prompter.say(self.formatter.format_time_stats(&time))?;

        let stations = Timed::measure(|| StationStats::from_table(table));
        self.prompter
            .say(self.formatter.format_station_stats(&stations))?;

        let durations = Timed::measure(|| DurationStats::from_table(table));
        self.prompter
            .say(self.formatter.format_duration_stats(&durations))?;

        let users = Timed::measure(|| UserStats::from_table(table));
        self.prompter.say(self.formatter.format_user_stats(&users))?;

        Ok(())
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }
}
