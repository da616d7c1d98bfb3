// src/period.rs

use chrono::NaiveDate;

use crate::error::DateRangeProblem;

pub const INPUT_FORMAT: &str = "%Y-%m-%d";
pub const REGISTRY_FORMAT: &str = "%Y%m%d";
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Inclusive calendar-date window requested by the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    /// Parses both ends as `YYYY-MM-DD`; an equal start and end is a one-day window.
    pub fn parse(start: &str, end: &str) -> Result<Self, DateRangeProblem> {
        let start = parse_input("inicial", start)?;
        let end = parse_input("final", end)?;

        if start > end {
            return Err(DateRangeProblem::Inverted);
        }

        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Registry query form of the window, separators stripped.
    pub fn registry_bounds(&self) -> (String, String) {
        (
            self.start.format(REGISTRY_FORMAT).to_string(),
            self.end.format(REGISTRY_FORMAT).to_string(),
        )
    }
}

fn parse_input(field: &'static str, value: &str) -> Result<NaiveDate, DateRangeProblem> {
    NaiveDate::parse_from_str(value.trim(), INPUT_FORMAT).map_err(|_| {
        DateRangeProblem::Unparseable {
            field,
            value: value.to_string(),
        }
    })
}

/// Reads a date coming from the registry. Timestamps keep only their date part.
pub fn parse_upstream(value: &str) -> Option<NaiveDate> {
    let date_part = value.split('T').next().unwrap_or(value);

    NaiveDate::parse_from_str(date_part.trim(), INPUT_FORMAT).ok()
}

/// `2024-03-01` -> `01/03/2024`; anything unparseable is shown as received.
pub fn display(value: &str) -> String {
    match parse_upstream(value) {
        Some(date) => date.format(DISPLAY_FORMAT).to_string(),
        None => value.to_string(),
    }
}
