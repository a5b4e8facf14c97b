use itertools::Itertools;
use snafu::ensure;
use std::fmt;

use crate::error::{self, Error, Result};

/// The admissible values of one date or time component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionBounds {
    pub name: &'static str,
    pub min: u32,
    pub max: u32,
}

impl SelectionBounds {
    fn check(&self, value: u32) -> Result<(), String> {
        if (self.min..=self.max).contains(&value) {
            Ok(())
        } else {
            Err(format!("{value} is outside of {}..={}", self.min, self.max))
        }
    }
}

pub const YEARS: SelectionBounds = SelectionBounds {
    name: "year",
    min: 1940,
    max: 2039,
};

pub const MONTHS: SelectionBounds = SelectionBounds {
    name: "month",
    min: 1,
    max: 12,
};

pub const DAYS: SelectionBounds = SelectionBounds {
    name: "day",
    min: 1,
    max: 31,
};

pub const HOURS: SelectionBounds = SelectionBounds {
    name: "hour",
    min: 0,
    max: 23,
};

/// A non-empty, sorted set of requested years, months, days or hours.
///
/// Parsed from an inclusive range `start:stop`, a comma-separated list `a,b,c` or a single value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    values: Vec<u32>,
}

impl Selection {
    pub fn parse(input: &str, bounds: SelectionBounds) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidSelection {
            name: bounds.name,
            input: input.to_string(),
            reason,
        };
        let parse_value = |value: &str| {
            value
                .trim()
                .parse::<u32>()
                .map_err(|e| invalid(format!("`{}` is not a number: {e}", value.trim())))
        };

        let values: Vec<u32> = if let Some((start, stop)) = input.split_once(':') {
            let start = parse_value(start)?;
            let stop = parse_value(stop)?;

            ensure!(
                start <= stop,
                error::InvalidSelection {
                    name: bounds.name,
                    input,
                    reason: format!("stop {stop} is before start {start}"),
                }
            );

            // endpoints first, the range is only materialized within bounds
            bounds.check(start).map_err(&invalid)?;
            bounds.check(stop).map_err(&invalid)?;

            (start..=stop).collect()
        } else if input.contains(',') {
            input
                .split(',')
                .filter(|value| !value.trim().is_empty())
                .map(parse_value)
                .collect::<Result<_>>()?
        } else {
            vec![parse_value(input)?]
        };

        ensure!(
            !values.is_empty(),
            error::InvalidSelection {
                name: bounds.name,
                input,
                reason: "no values given",
            }
        );

        for &value in &values {
            bounds.check(value).map_err(&invalid)?;
        }

        Ok(Self {
            values: values.into_iter().sorted_unstable().dedup().collect(),
        })
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn contains(&self, value: u32) -> bool {
        self.values.binary_search(&value).is_ok()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.values.iter().join(","))
    }
}

/// Value parsers for `clap`
pub fn parse_years(input: &str) -> Result<Selection, String> {
    Selection::parse(input, YEARS).map_err(|e| e.to_string())
}

pub fn parse_months(input: &str) -> Result<Selection, String> {
    Selection::parse(input, MONTHS).map_err(|e| e.to_string())
}

pub fn parse_days(input: &str) -> Result<Selection, String> {
    Selection::parse(input, DAYS).map_err(|e| e.to_string())
}

pub fn parse_hours(input: &str) -> Result<Selection, String> {
    Selection::parse(input, HOURS).map_err(|e| e.to_string())
}
