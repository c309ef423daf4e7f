use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid period '{0}'; expected YYYY-MM")]
pub struct PeriodParseError(pub String);

/// A calendar month, the time axis for every table in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Option<Period> {
        if (1..=12).contains(&month) {
            Some(Period { year, month })
        } else {
            None
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn next(self) -> Period {
        if self.month == 12 {
            Period {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Period {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn range_inclusive(start: Period, end: Period) -> Vec<Period> {
        let mut periods = Vec::new();
        let mut current = start;
        while current <= end {
            periods.push(current);
            current = current.next();
        }
        periods
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        // Only the exact YYYY-MM shape is accepted; chrono rejects
        // out-of-range months and non-digit characters.
        if value.len() != 7 || value.as_bytes()[4] != b'-' {
            return Err(PeriodParseError(value.to_string()));
        }
        let date = NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
            .map_err(|_| PeriodParseError(value.to_string()))?;
        Ok(Period {
            year: date.year(),
            month: date.month(),
        })
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_strict_year_month() {
        let period: Period = "2025-03".parse().unwrap();
        assert_eq!(period.year(), 2025);
        assert_eq!(period.month(), 3);
        assert_eq!(period.to_string(), "2025-03");
    }

    #[test]
    fn rejects_malformed_values() {
        for value in ["2025-13", "2025-00", "2025-1", "25-01", "2025/01", "2025-01-01", ""] {
            assert!(value.parse::<Period>().is_err(), "accepted '{value}'");
        }
    }

    #[test]
    fn next_rolls_over_december() {
        let december = Period::new(2025, 12).unwrap();
        assert_eq!(december.next(), Period::new(2026, 1).unwrap());
        let june = Period::new(2025, 6).unwrap();
        assert_eq!(june.next(), Period::new(2025, 7).unwrap());
    }

    #[test]
    fn orders_by_year_then_month() {
        let earlier = Period::new(2024, 12).unwrap();
        let later = Period::new(2025, 1).unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn range_inclusive_spans_year_boundary() {
        let range = Period::range_inclusive(
            Period::new(2025, 11).unwrap(),
            Period::new(2026, 2).unwrap(),
        );
        let rendered: Vec<String> = range.iter().map(Period::to_string).collect();
        assert_eq!(rendered, ["2025-11", "2025-12", "2026-01", "2026-02"]);
    }

    #[test]
    fn new_rejects_invalid_month() {
        assert!(Period::new(2025, 0).is_none());
        assert!(Period::new(2025, 13).is_none());
    }
}
