mod consts;
mod duration;
mod error;
mod format;
pub mod ordinal;
pub mod plural;
mod prelude;
mod range;
mod types;
mod week;

#[cfg(test)]
mod test_utils;

pub use consts::*;
pub use duration::Duration;
pub use error::CalendarError;
pub use plural::{EnglishPlural, NeutralPlural, Plural};
pub use range::{DateInterval, Interval, Step};
pub use types::{Day, Month, Precision, Weekday};
pub use week::Week;

use crate::prelude::*;
use chrono::Datelike;
use ordinal::{days_in_month, days_in_year, is_leap_year, to_ordinal};
use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

/// A proleptic Gregorian date known to year, month or day precision.
///
/// Ordering and equality follow the `(year, month, day)` triple with 0 for an unknown
/// component, so a month sorts before every day in it and never equals its first day.
/// Year 0 doubles as "no year" when displaying and parsing (`15-Jan`, `Jan`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "(i32, u8, u8)", into = "(i32, u8, u8)")]
pub enum CalendarDate {
    /// Full date with day, month, and year
    Day {
        year:  i32,
        month: types::Month,
        day:   types::Day,
    },
    /// Month and year only
    Month { year: i32, month: types::Month },
    /// Year only
    Year { year: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Unknown month name: {_0}")]
    UnknownMonth(String),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// Creates a full-precision date.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if `month` is outside `1..=12` or `day` is
    /// outside the month.
    pub const fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        let Some(valid_month) = types::Month::new(month) else {
            return Err(CalendarError::InvalidDate { year, month, day });
        };
        let Some(valid_day) = types::Day::new(day, year, valid_month) else {
            return Err(CalendarError::InvalidDate { year, month, day });
        };
        Ok(Self::Day {
            year,
            month: valid_month,
            day: valid_day,
        })
    }

    /// Creates a month-precision value.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if `month` is outside `1..=12`.
    pub const fn month_value(year: i32, month: u8) -> Result<Self, CalendarError> {
        match types::Month::new(month) {
            Some(month) => Ok(Self::Month { year, month }),
            None => Err(CalendarError::InvalidDate { year, month, day: 0 }),
        }
    }

    /// Creates a year-precision value.
    pub const fn year_value(year: i32) -> Self {
        Self::Year { year }
    }

    /// Creates a value of any precision from a triple where 0 marks an unknown component.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDate` for an invalid month or day, or a day without a
    /// month.
    pub const fn from_ymd(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        match (month, day) {
            (0, 0) => Ok(Self::year_value(year)),
            (0, _) => Err(CalendarError::InvalidDate { year, month, day }),
            (_, 0) => Self::month_value(year, month),
            _ => Self::new(year, month, day),
        }
    }

    /// Full-precision date for a day ordinal (1 is 0001-01-01).
    ///
    /// # Errors
    /// Returns `CalendarError::OrdinalOutOfRange` if the year would not fit an `i32`.
    pub const fn from_ordinal(n: i64) -> Result<Self, CalendarError> {
        if n < ordinal::MIN_ORDINAL || n > ordinal::MAX_ORDINAL {
            return Err(CalendarError::OrdinalOutOfRange(n));
        }
        let (year, month, day) = ordinal::from_ordinal(n);
        Self::new(year, month, day)
    }

    /// Today's date in the local time zone.
    ///
    /// # Errors
    /// Only if the local date cannot be represented, which chrono's date range rules out.
    pub fn today() -> Result<Self, CalendarError> {
        Self::try_from(chrono::Local::now().date_naive())
    }

    /// # Errors
    /// See [`CalendarDate::today`].
    pub fn tomorrow() -> Result<Self, CalendarError> {
        Self::today()?.add_days(1)
    }

    /// # Errors
    /// See [`CalendarDate::today`].
    pub fn yesterday() -> Result<Self, CalendarError> {
        Self::today()?.add_days(-1)
    }

    pub const fn precision(&self) -> Precision {
        match self {
            Self::Day { .. } => Precision::Day,
            Self::Month { .. } => Precision::Month,
            Self::Year { .. } => Precision::Year,
        }
    }

    /// Returns the year component (always present)
    pub const fn year(&self) -> i32 {
        match *self {
            Self::Day { year, .. } | Self::Month { year, .. } | Self::Year { year } => year,
        }
    }

    /// Returns the month component if present
    pub const fn month(&self) -> Option<u8> {
        match self {
            Self::Day { month, .. } | Self::Month { month, .. } => Some(month.get()),
            Self::Year { .. } => None,
        }
    }

    /// Returns the day component if present
    pub const fn day(&self) -> Option<u8> {
        match self {
            Self::Day { day, .. } => Some(day.get()),
            Self::Month { .. } | Self::Year { .. } => None,
        }
    }

    /// The `(year, month, day)` triple, with 0 for unknown components
    pub const fn ymd(&self) -> (i32, u8, u8) {
        match *self {
            Self::Day { year, month, day } => (year, month.get(), day.get()),
            Self::Month { year, month } => (year, month.get(), 0),
            Self::Year { year } => (year, 0, 0),
        }
    }

    pub const fn is_leap_year(&self) -> bool {
        is_leap_year(self.year())
    }

    /// Day ordinal of a full-precision date.
    ///
    /// # Errors
    /// Returns `CalendarError::Precision` for month and year values.
    pub fn as_ordinal(&self) -> Result<i64, CalendarError> {
        match *self {
            Self::Day { year, month, day } => Ok(to_ordinal(year, month.get(), day.get())),
            _ => Err(CalendarError::precision("take the ordinal of", self.precision())),
        }
    }

    /// # Errors
    /// Returns `CalendarError::Precision` for month and year values.
    pub fn weekday(&self) -> Result<Weekday, CalendarError> {
        self.as_ordinal().map(ordinal::weekday)
    }

    /// Moves a full-precision date by an exact number of days.
    ///
    /// # Errors
    /// Returns `CalendarError::Precision` for month and year values, or
    /// `CalendarError::OrdinalOutOfRange` past the supported calendar.
    pub fn add_days(&self, days: i64) -> Result<Self, CalendarError> {
        let ordinal = self.as_ordinal()?;
        let target = ordinal
            .checked_add(days)
            .ok_or(CalendarError::OrdinalOutOfRange(ordinal))?;
        Self::from_ordinal(target)
    }

    /// # Errors
    /// See [`CalendarDate::add_days`].
    pub fn sub_days(&self, days: i64) -> Result<Self, CalendarError> {
        self.add_days(days.checked_neg().ok_or(CalendarError::Overflow)?)
    }

    /// Adds a calendar duration; see [`Duration::apply_to`].
    ///
    /// # Errors
    /// See [`Duration::apply_to`].
    pub fn apply(&self, duration: Duration) -> Result<Self, CalendarError> {
        duration.apply_to(*self)
    }

    /// Subtracts a calendar duration by applying its negation.
    ///
    /// # Errors
    /// See [`Duration::apply_to`].
    pub fn subtract(&self, duration: Duration) -> Result<Self, CalendarError> {
        duration.negate().apply_to(*self)
    }

    /// The month this value falls in (a year value stays a year value).
    pub const fn to_month(&self) -> Self {
        match *self {
            Self::Day { year, month, .. } | Self::Month { year, month } => {
                Self::Month { year, month }
            }
            Self::Year { year } => Self::Year { year },
        }
    }

    /// The year this value falls in.
    pub const fn to_year(&self) -> Self {
        Self::Year { year: self.year() }
    }

    /// The Sunday-to-Saturday week containing a full-precision date.
    ///
    /// # Errors
    /// Returns `CalendarError::Precision` for month and year values.
    pub fn week(&self) -> Result<Week, CalendarError> {
        Week::new(*self)
    }

    /// Interval from this date to `end`, both inclusive.
    pub const fn until(&self, end: Self) -> DateInterval {
        DateInterval::between(*self, end)
    }

    /// Number of days covered: 1 for a full date, the month or year length otherwise.
    pub fn length(&self) -> i64 {
        match *self {
            Self::Day { .. } => 1,
            Self::Month { year, month } => i64::from(days_in_month(year, month.get())),
            Self::Year { year } => i64::from(days_in_year(year)),
        }
    }

    /// Whether `other` lies within this value: a month contains its days, a year its
    /// months and days, and a full date only itself.
    pub fn contains(&self, other: &Self) -> bool {
        match *self {
            Self::Day { .. } => self == other,
            Self::Month { year, month } => {
                other.year() == year && other.month() == Some(month.get())
            }
            Self::Year { year } => other.year() == year,
        }
    }

    /// Whether day number `day` exists in this month (or, for a full date, is its day).
    pub fn has_day(&self, day: u8) -> bool {
        match *self {
            Self::Day { day: own, .. } => own.get() == day,
            Self::Month { .. } => day != 0 && i64::from(day) <= self.length(),
            Self::Year { .. } => false,
        }
    }

    /// The full dates covered by this value, in order.
    pub fn iter(&self) -> Days {
        let (first, last) = self.ordinal_span();
        Days::new(first, last)
    }

    /// 1-based day within a month or year value; negative indices count back from the end
    /// (`-1` is the last day).
    ///
    /// # Errors
    /// Returns `CalendarError::Precision` for full dates and `CalendarError::Index` for 0
    /// or an index past either end.
    pub fn nth_day(&self, index: i64) -> Result<Self, CalendarError> {
        if self.precision() == Precision::Day {
            return Err(CalendarError::precision("index the days of", Precision::Day));
        }
        let length = self.length();
        if index == 0 || index.unsigned_abs() > length.unsigned_abs() {
            return Err(CalendarError::index(index, length));
        }
        let position = if index < 0 { length + index + 1 } else { index };
        let (first, _) = self.ordinal_span();
        Self::from_ordinal(first + position - 1)
    }

    /// Every date with the given weekday inside a month or year value, ascending.
    ///
    /// # Errors
    /// Returns `CalendarError::Precision` for full dates.
    pub fn days_on(&self, weekday: Weekday) -> Result<Vec<Self>, CalendarError> {
        if self.precision() == Precision::Day {
            return Err(CalendarError::precision("list the weekdays of", Precision::Day));
        }
        let (first, last) = self.ordinal_span();
        let lead = (i64::from(weekday.index()) - first).rem_euclid(i64::from(DAYS_PER_WEEK));
        Ok(Days::new(first + lead, last)
            .step_by(usize::from(DAYS_PER_WEEK))
            .collect())
    }

    /// First and last day ordinals covered, inclusive.
    fn ordinal_span(&self) -> (i64, i64) {
        match *self {
            Self::Day { year, month, day } => {
                let ordinal = to_ordinal(year, month.get(), day.get());
                (ordinal, ordinal)
            }
            Self::Month { year, month } => {
                let first = to_ordinal(year, month.get(), MIN_DAY);
                (first, to_ordinal(year, month.get(), days_in_month(year, month.get())))
            }
            Self::Year { year } => (
                to_ordinal(year, JANUARY, MIN_DAY),
                to_ordinal(year, DECEMBER, DAYS_IN_MONTH[DECEMBER as usize]),
            ),
        }
    }
}

/// Joins two rendered components with the date separator when both are non-empty.
fn hyphenate(f: &mut fmt::Formatter<'_>, head: &dyn fmt::Display, tail: &str) -> fmt::Result {
    let head = head.to_string();
    match (head.is_empty(), tail.is_empty()) {
        (false, false) => write!(f, "{head}{DATE_SEPARATOR}{tail}"),
        _ => write!(f, "{head}{tail}"),
    }
}

/// Renders `15-Jan-2013`, `Jan-2013` or `2013`, with year 0 left out.
///
/// Negative years render with their sign (`1-Jan--005`). `FromStr` reads only non-negative
/// years, so those strings do not parse back; use the serde triple to store such dates.
impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Year { year: 0 } => Ok(()),
            Self::Year { year } => write!(f, "{year:04}"),
            Self::Month { year, month } => {
                hyphenate(f, &month, &Self::year_value(year).to_string())
            }
            Self::Day { year, month, day } => {
                hyphenate(f, &day, &Self::Month { year, month }.to_string())
            }
        }
    }
}

impl FromStr for CalendarDate {
    type Err = CalendarError;

    /// Parses the display forms (`15-Jan-2013`, `Jan-2013`, `15-Jan`, `Jan`, `2013`) and ISO
    /// `2013-01-15` / `2013-01`. A missing year parses as year 0.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput.into());
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();

        match parts.as_slice() {
            [year] if is_numeric(year) => Ok(Self::year_value(parse_number(year)?)),
            [month] => Self::month_value(0, parse_month(month)?),
            [year, month] if is_numeric(year) && is_numeric(month) => {
                Self::month_value(parse_number(year)?, parse_number(month)?)
            }
            [day, month] if is_numeric(day) => {
                Self::new(0, parse_month(month)?, parse_number(day)?)
            }
            [month, year] => Self::month_value(parse_number(year)?, parse_month(month)?),
            [year, month, day] if is_numeric(month) => Self::new(
                parse_number(year)?,
                parse_number(month)?,
                parse_number(day)?,
            ),
            [day, month, year] => Self::new(
                parse_number(year)?,
                parse_month(month)?,
                parse_number(day)?,
            ),
            _ => Err(ParseError::InvalidFormat(format!(
                "Too many {DATE_SEPARATOR} separators: expected 0-2, found {}",
                parts.len() - 1
            ))
            .into()),
        }
    }
}

fn is_numeric(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
}

fn parse_number<T: FromStr>(s: &str) -> Result<T, CalendarError> {
    s.parse::<T>()
        .map_err(|_| ParseError::InvalidFormat(s.to_owned()).into())
}

fn parse_month(s: &str) -> Result<u8, CalendarError> {
    types::Month::from_name(s)
        .map(types::Month::get)
        .ok_or_else(|| ParseError::UnknownMonth(s.to_owned()).into())
}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ymd().cmp(&other.ymd())
    }
}

impl TryFrom<(i32, u8, u8)> for CalendarDate {
    type Error = CalendarError;

    fn try_from((year, month, day): (i32, u8, u8)) -> Result<Self, Self::Error> {
        Self::from_ymd(year, month, day)
    }
}

impl TryFrom<chrono::NaiveDate> for CalendarDate {
    type Error = CalendarError;

    fn try_from(date: chrono::NaiveDate) -> Result<Self, Self::Error> {
        let month = u8::try_from(date.month()).map_err(|_| CalendarError::Overflow)?;
        let day = u8::try_from(date.day()).map_err(|_| CalendarError::Overflow)?;
        Self::new(date.year(), month, day)
    }
}

impl From<CalendarDate> for (i32, u8, u8) {
    fn from(date: CalendarDate) -> Self {
        date.ymd()
    }
}

impl IntoIterator for CalendarDate {
    type Item = Self;
    type IntoIter = Days;

    fn into_iter(self) -> Days {
        self.iter()
    }
}

/// Consecutive full dates between two day ordinals, inclusive.
///
/// Cloning gives an independent iterator, so a sequence can be walked again from the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Days {
    next: i64,
    last: i64,
}

impl Days {
    pub(crate) const fn new(first: i64, last: i64) -> Self {
        Self { next: first, last }
    }
}

impl Iterator for Days {
    type Item = CalendarDate;

    fn next(&mut self) -> Option<CalendarDate> {
        if self.next > self.last {
            return None;
        }
        let date = CalendarDate::from_ordinal(self.next).ok()?;
        self.next += 1;
        Some(date)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.last - self.next + 1).unwrap_or(0);
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Days {
    fn next_back(&mut self) -> Option<CalendarDate> {
        if self.next > self.last {
            return None;
        }
        let date = CalendarDate::from_ordinal(self.last).ok()?;
        self.last -= 1;
        Some(date)
    }
}

impl ExactSizeIterator for Days {}

impl FusedIterator for Days {}
