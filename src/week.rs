use std::fmt;

use crate::consts::DAYS_PER_WEEK;
use crate::{CalendarDate, CalendarError, DateInterval, Weekday, prelude::*};

/// The seven days from a Sunday to the following Saturday.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref)]
pub struct Week {
    #[deref]
    interval: DateInterval,
    sunday:   CalendarDate,
}

impl Week {
    /// The week containing `anchor`.
    ///
    /// # Errors
    /// Returns `CalendarError::Precision` unless `anchor` is a full date.
    pub fn new(anchor: CalendarDate) -> Result<Self, CalendarError> {
        let sunday = anchor.sub_days(i64::from(anchor.weekday()?.index()))?;
        let saturday = sunday.add_days(i64::from(DAYS_PER_WEEK) - 1)?;
        Ok(Self {
            interval: DateInterval::between(sunday, saturday),
            sunday,
        })
    }

    pub const fn first_day(&self) -> CalendarDate {
        self.sunday
    }

    /// # Errors
    /// Only at the last representable week of the calendar.
    pub fn last_day(&self) -> Result<CalendarDate, CalendarError> {
        self.day(Weekday::Saturday)
    }

    /// The date of `weekday` within this week.
    ///
    /// # Errors
    /// Only at the last representable week of the calendar.
    pub fn day(&self, weekday: Weekday) -> Result<CalendarDate, CalendarError> {
        self.sunday.add_days(i64::from(weekday.index()))
    }

    pub const fn interval(&self) -> &DateInterval {
        &self.interval
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.interval, f)
    }
}
