//! Filter collection
//!
//! Walks the user through choosing a city, a filter mode and, depending on
//! the mode, a month and/or a day. Every answer is checked against the
//! [`Vocabulary`] it belongs to, so the returned [`FilterSelection`] only
//! ever holds supported values.

use crate::error::{BikeshareError, Result};
use crate::prompt::Prompter;
use bikeshare_core::{FilterSelection, Vocabulary};
use std::io::{BufRead, Write};
use tracing::info;

pub const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
pub const CITY_PROMPT: &str =
    "Would you like to see data for Chicago, New York City, or Washington?\n";
pub const FILTER_PROMPT: &str = "Would you like to filter the data by month, day, both or none of the previous? Type \"none\" to apply no filters\n";
pub const FILTER_RETRY: &str = "Can't understand this filter :( Please reenter in the same format";
pub const MONTH_PROMPT: &str = "Which month? Please enter a month name from January till June, or \"all\"\n";
pub const DAY_PROMPT: &str =
    "Which day? Please type the full name (e.g. Saturday, Sunday, Monday, ...etc.), or \"all\"\n";
pub const CHOICE_RETRY: &str = "Can't understand! Can you please tell me again";

pub const SEPARATOR: &str = "----------------------------------------";

/// Ask for city, filter mode, month and day
///
/// An unknown city is asked again silently; an unknown filter mode prints
/// [`FILTER_RETRY`] first. Month and day go through
/// [`Prompter::choose`] and are only asked when the filter mode covers
/// them.
pub fn collect_filters<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    vocabulary: &Vocabulary,
) -> Result<FilterSelection> {
    prompter.say(GREETING)?;

    let city = loop {
        let answer = prompter.ask(CITY_PROMPT)?;
        if let Some(city) = vocabulary.city(&answer) {
            break city;
        }
    };

    let mode = loop {
        let answer = prompter.ask(FILTER_PROMPT)?;
        match vocabulary.filter_mode(&answer) {
            Some(mode) => break mode,
            None => prompter.complain(FILTER_RETRY)?,
        }
    };

    let month = if mode.includes_month() {
        let answer = prompter.choose(MONTH_PROMPT, vocabulary.months, CHOICE_RETRY)?;
        vocabulary.month(&answer).ok_or_else(|| {
            BikeshareError::InvalidArgument(format!("unsupported month '{answer}'"))
        })?
    } else {
        None
    };

    let day = if mode.includes_day() {
        let answer = prompter.choose(DAY_PROMPT, vocabulary.days, CHOICE_RETRY)?;
        vocabulary.day(&answer).ok_or_else(|| {
            BikeshareError::InvalidArgument(format!("unsupported day '{answer}'"))
        })?
    } else {
        None
    };

    prompter.say(SEPARATOR)?;

    let selection = FilterSelection { city, month, day };
    info!("Collected filters: {selection}");
    Ok(selection)
}
