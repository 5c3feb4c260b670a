use crate::CalendarError;
use crate::consts::{DAYS_PER_WEEK, MONTH_NAMES, MONTHS_PER_YEAR, WEEKDAY_NAMES};
use crate::ordinal::days_in_month;
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

/// A month value guaranteed to be in the range `1..=12`
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, or `None` if the value is 0 or greater than 12
    pub const fn new(value: u8) -> Option<Self> {
        match NonZeroU8::new(value) {
            Some(non_zero) if value <= MONTHS_PER_YEAR => Some(Self(non_zero)),
            _ => None,
        }
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Full English name, e.g. `"January"`
    pub const fn name(self) -> &'static str {
        MONTH_NAMES[self.0.get() as usize - 1]
    }

    /// Three-letter abbreviation, e.g. `"Jan"`
    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }

    /// Looks a month up by its full name or three-letter abbreviation, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        let position = MONTH_NAMES.iter().position(|full| {
            full.eq_ignore_ascii_case(name) || full[..3].eq_ignore_ascii_case(name)
        })?;
        u8::try_from(position + 1).ok().and_then(Self::new)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// A day value guaranteed to be valid for a given year and month
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, or `None` if the value is 0 or past the end of the month
    pub const fn new(value: u8, year: i32, month: Month) -> Option<Self> {
        match NonZeroU8::new(value) {
            Some(non_zero) if value <= days_in_month(year, month.get()) => Some(Self(non_zero)),
            _ => None,
        }
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How much of a [`crate::CalendarDate`] is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Precision {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
}

/// Day of the week, Sunday first. Displays as its three-letter abbreviation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Weekday {
    #[display(fmt = "Sun")]
    Sunday = 0,
    #[display(fmt = "Mon")]
    Monday = 1,
    #[display(fmt = "Tue")]
    Tuesday = 2,
    #[display(fmt = "Wed")]
    Wednesday = 3,
    #[display(fmt = "Thu")]
    Thursday = 4,
    #[display(fmt = "Fri")]
    Friday = 5,
    #[display(fmt = "Sat")]
    Saturday = 6,
}

impl Weekday {
    /// Every weekday in order, indexable by [`Weekday::index`]
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Saturday and Sunday
    pub const WEEKEND: [Self; 2] = [Self::Saturday, Self::Sunday];

    /// Weekday for an index in `0..7`, 0 being Sunday
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < DAYS_PER_WEEK {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Position in the week, 0 being Sunday
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Full English name, e.g. `"Tuesday"`
    pub const fn name(self) -> &'static str {
        WEEKDAY_NAMES[self as usize]
    }

    pub const fn is_weekend(self) -> bool {
        matches!(self, Self::Saturday | Self::Sunday)
    }
}

impl TryFrom<u8> for Weekday {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value).ok_or(CalendarError::InvalidWeekday(value))
    }
}

impl From<Weekday> for u8 {
    fn from(weekday: Weekday) -> Self {
        weekday.index()
    }
}
