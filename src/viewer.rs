//! Paging through raw trips
//!
//! After the reports, the user may page through the filtered table five
//! rows at a time until they decline or the rows run out.

use crate::error::Result;
use crate::output::OutputFormatter;
use crate::prompt::Prompter;
use bikeshare_core::TripTable;
use std::io::{BufRead, Write};
use tracing::debug;

pub const PAGE_SIZE: usize = 5;

pub const VIEW_PROMPT: &str =
    "\nWould you like to view 5 rows of individual trip data? Enter yes or no\n";
pub const CONTINUE_PROMPT: &str = "Do you wish to continue?: ";
pub const VIEW_RETRY: &str = "\nSorry couldn't understand :(! Please enter yes or no only\n";
pub const EXHAUSTED: &str = "No more data to show!";

/// How a paging run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerOutcome {
    /// Rows printed in total
    pub rows_shown: usize,
    /// True when the last row was reached and announced
    pub exhausted: bool,
}

/// Pages through a table on demand
pub struct RowViewer<'a> {
    table: &'a TripTable,
    formatter: &'a dyn OutputFormatter,
    page_size: usize,
}

impl<'a> RowViewer<'a> {
    pub fn new(table: &'a TripTable, formatter: &'a dyn OutputFormatter) -> Self {
        Self {
            table,
            formatter,
            page_size: PAGE_SIZE,
        }
    }

    /// Ask yes/no and print pages until "no" or the end of the table
    ///
    /// Answers other than yes/no re-ask with [`VIEW_RETRY`]. An empty
    /// table prints nothing after the first question.
    pub fn run<R: BufRead, W: Write>(&self, prompter: &mut Prompter<R, W>) -> Result<ViewerOutcome> {
        let trips = self.table.trips();
        let mut cursor = 0;
        let mut exhausted = false;

        let mut answer = prompter.ask(VIEW_PROMPT)?;
        while answer != "no" && cursor < trips.len() {
            if answer == "yes" {
                let end = (cursor + self.page_size).min(trips.len());
                let page = self.formatter.format_trips(&trips[cursor..end], self.table.columns());
                prompter.say(page)?;
                debug!("Showed rows {cursor}..{end} of {}", trips.len());
                cursor = end;

                if cursor < trips.len() {
                    answer = prompter.ask(CONTINUE_PROMPT)?;
                } else {
                    prompter.say(EXHAUSTED)?;
                    exhausted = true;
                }
            } else {
                answer = prompter.ask(VIEW_RETRY)?;
            }
        }

        Ok(ViewerOutcome {
            rows_shown: cursor,
            exhausted,
        })
    }
}
