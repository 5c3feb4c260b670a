//! Conversions between proleptic Gregorian `(year, month, day)` triples and day ordinals.
//!
//! Ordinal 1 is 0001-01-01 and consecutive days map to consecutive integers in both
//! directions, so 0000-12-31 is ordinal 0 and earlier dates are negative. The conversions
//! follow Howard Hinnant's civil-date algorithms, shifted onto that origin.

use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_COMMON_YEAR, DAYS_IN_LEAP_YEAR, DAYS_IN_MONTH, DAYS_PER_ERA,
    DAYS_PER_WEEK, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MARCH_EPOCH_ORDINAL, MONTHS_PER_YEAR,
};
use crate::types::Weekday;

/// Smallest ordinal whose year still fits an `i32` (1 January of `i32::MIN`)
pub const MIN_ORDINAL: i64 = to_ordinal(i32::MIN, 1, 1);

/// Largest ordinal whose year still fits an `i32` (31 December of `i32::MAX`)
pub const MAX_ORDINAL: i64 = to_ordinal(i32::MAX, 12, 31);

pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: i32, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MONTHS_PER_YEAR);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

pub const fn days_in_year(year: i32) -> u16 {
    if is_leap_year(year) {
        DAYS_IN_LEAP_YEAR
    } else {
        DAYS_IN_COMMON_YEAR
    }
}

/// Maps a full calendar date to its day ordinal.
///
/// The triple is assumed to be valid; see [`crate::CalendarDate::new`] for the checked path.
pub const fn to_ordinal(year: i32, month: u8, day: u8) -> i64 {
    // Years start in March so the leap day is the last day of the computational year.
    let y = if month <= FEBRUARY {
        year as i64 - 1
    } else {
        year as i64
    };
    let era = y.div_euclid(GREGORIAN_CYCLE as i64);
    let year_of_era = y - era * GREGORIAN_CYCLE as i64; // [0, 399]
    let month_from_march = (month as i64 + 9) % MONTHS_PER_YEAR as i64; // [0, 11]
    let day_of_year = (153 * month_from_march + 2) / 5 + day as i64 - 1; // [0, 365]
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;

    era * DAYS_PER_ERA + day_of_era + MARCH_EPOCH_ORDINAL
}

/// Maps a day ordinal back to its `(year, month, day)` triple.
///
/// `ordinal` must lie within [`MIN_ORDINAL`]`..=`[`MAX_ORDINAL`].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn from_ordinal(ordinal: i64) -> (i32, u8, u8) {
    debug_assert!(ordinal >= MIN_ORDINAL && ordinal <= MAX_ORDINAL);

    let z = ordinal - MARCH_EPOCH_ORDINAL;
    let era = z.div_euclid(DAYS_PER_ERA);
    let day_of_era = z - era * DAYS_PER_ERA; // [0, 146096]
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let month_from_march = (5 * day_of_year + 2) / 153; // [0, 11]
    let day = day_of_year - (153 * month_from_march + 2) / 5 + 1; // [1, 31]
    let month = if month_from_march < 10 {
        month_from_march + 3
    } else {
        month_from_march - 9
    };
    let year = year_of_era + era * GREGORIAN_CYCLE as i64 + if month <= 2 { 1 } else { 0 };

    (year as i32, month as u8, day as u8)
}

/// Weekday of the day with the given ordinal (ordinal 1 is a Monday).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn weekday(ordinal: i64) -> Weekday {
    Weekday::ALL[ordinal.rem_euclid(DAYS_PER_WEEK as i64) as usize]
}
