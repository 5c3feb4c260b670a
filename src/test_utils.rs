//! Shorthand constructors for tests.

use crate::{CalendarDate, DateInterval};

pub fn date(year: i32, month: u8, day: u8) -> CalendarDate {
    CalendarDate::new(year, month, day).unwrap()
}

pub fn month(year: i32, month: u8) -> CalendarDate {
    CalendarDate::month_value(year, month).unwrap()
}

pub const fn year(year: i32) -> CalendarDate {
    CalendarDate::year_value(year)
}

pub fn span(start: (i32, u8, u8), end: (i32, u8, u8)) -> DateInterval {
    DateInterval::between(date(start.0, start.1, start.2), date(end.0, end.1, end.2))
}
