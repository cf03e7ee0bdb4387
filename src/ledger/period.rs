use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Reporting granularity used to bucket records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Day, Period::Week, Period::Month, Period::Year];

    /// Returns the bucket a record dated `date` belongs to.
    pub fn bucket_for(self, date: NaiveDate) -> BucketKey {
        match self {
            Period::Day => BucketKey::Day(date),
            Period::Week => {
                let start = week_start(date);
                BucketKey::Week {
                    start,
                    end: start + Duration::days(6),
                }
            }
            Period::Month => BucketKey::Month {
                year: date.year(),
                month: date.month(),
            },
            Period::Year => BucketKey::Year(date.year()),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::Day => "Daily",
            Period::Week => "Weekly",
            Period::Month => "Monthly",
            Period::Year => "Yearly",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" => Ok(Period::Day),
            "week" | "weekly" => Ok(Period::Week),
            "month" | "monthly" => Ok(Period::Month),
            "year" | "yearly" => Ok(Period::Year),
            other => Err(CoreError::InvalidArgument(format!(
                "unknown period `{other}` (expected day, week, month or year)"
            ))),
        }
    }
}

/// Identifies one time window produced by [`Period::bucket_for`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BucketKey {
    Day(NaiveDate),
    Week { start: NaiveDate, end: NaiveDate },
    /// `month` is 1-based.
    Month { year: i32, month: u32 },
    Year(i32),
}

impl BucketKey {
    pub fn start_date(&self) -> NaiveDate {
        match *self {
            BucketKey::Day(date) => date,
            BucketKey::Week { start, .. } => start,
            BucketKey::Month { year, month } => {
                NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
            }
            BucketKey::Year(year) => NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            BucketKey::Day(day) => day == date,
            BucketKey::Week { start, end } => date >= start && date <= end,
            BucketKey::Month { year, month } => date.year() == year && date.month() == month,
            BucketKey::Year(year) => date.year() == year,
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Day(date) => write!(f, "{date}"),
            BucketKey::Week { start, end } => write!(f, "{start}..{end}"),
            BucketKey::Month { year, month } => write!(f, "{year}-{month:02}"),
            BucketKey::Year(year) => write!(f, "{year}"),
        }
    }
}

/// Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let delta = date.weekday().num_days_from_monday() as i64;
    date - Duration::days(delta)
}
