//! Pay month model.
//!
//! A [`PayMonth`] is the unit payroll is computed for. Its `Display` form is
//! the `"{month}-{year}"` key used by the leave ledgers, with the month never
//! zero-padded.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Earliest year accepted for payroll.
pub const MIN_PAY_YEAR: i32 = 1970;

/// Latest year accepted for payroll.
pub const MAX_PAY_YEAR: i32 = 9999;

/// A validated calendar month.
///
/// # Examples
///
/// ```
/// use payroll_engine::models::PayMonth;
///
/// let june = PayMonth::new(6, 2024).unwrap();
/// assert_eq!(june.to_string(), "6-2024");
/// assert_eq!(june.days_in_month(), 30);
///
/// let parsed: PayMonth = "06-2024".parse().unwrap();
/// assert_eq!(parsed, june);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PayMonth {
    year: i32,
    month: u32,
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl PayMonth {
    /// Creates a pay month, returning `None` when the month is outside 1–12
    /// or the year outside [`MIN_PAY_YEAR`]..=[`MAX_PAY_YEAR`].
    pub fn new(month: u32, year: i32) -> Option<Self> {
        if !(MIN_PAY_YEAR..=MAX_PAY_YEAR).contains(&year) {
            return None;
        }
        let first_day = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        let last_day = next_first.pred_opt()?;
        Some(Self {
            year,
            month,
            first_day,
            last_day,
        })
    }

    /// The month number, 1–12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The first calendar day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// The last calendar day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    /// Number of calendar days in the month (28–31).
    pub fn days_in_month(&self) -> u32 {
        self.last_day.day()
    }

    /// Returns true if `timestamp`, read on the company calendar described
    /// by `offset`, falls on any day of this month.
    pub fn contains(&self, timestamp: DateTime<Utc>, offset: FixedOffset) -> bool {
        let local_date = timestamp.with_timezone(&offset).date_naive();
        local_date >= self.first_day && local_date <= self.last_day
    }

    /// Returns the closed UTC interval covering this month on the company
    /// calendar: local midnight of the first day through the last
    /// nanosecond of the last day.
    pub fn utc_bounds(&self, offset: FixedOffset) -> (DateTime<Utc>, DateTime<Utc>) {
        let shift = Duration::seconds(i64::from(offset.local_minus_utc()));
        let start_local = self.first_day.and_time(NaiveTime::MIN);
        let end_local =
            self.last_day.and_time(NaiveTime::MIN) + Duration::days(1) - Duration::nanoseconds(1);
        (
            DateTime::<Utc>::from_naive_utc_and_offset(start_local - shift, Utc),
            DateTime::<Utc>::from_naive_utc_and_offset(end_local - shift, Utc),
        )
    }
}

impl fmt::Display for PayMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.month, self.year)
    }
}

/// Error returned when a month-year key cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMonthYear(pub String);

impl fmt::Display for InvalidMonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid month-year key '{}'", self.0)
    }
}

impl std::error::Error for InvalidMonthYear {}

impl FromStr for PayMonth {
    type Err = InvalidMonthYear;

    /// Parses `"{month}-{year}"`, tolerating a zero-padded month.
    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidMonthYear(key.to_string());
        let (month, year) = key.trim().split_once('-').ok_or_else(invalid)?;
        let month: u32 = month.trim().parse().map_err(|_| invalid())?;
        let year: i32 = year.trim().parse().map_err(|_| invalid())?;
        PayMonth::new(month, year).ok_or_else(invalid)
    }
}
