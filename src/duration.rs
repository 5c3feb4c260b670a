use std::fmt;
use std::ops::{Add, Mul, Neg};

use serde::{Deserialize, Serialize};

use crate::consts::MONTHS_PER_YEAR;
use crate::ordinal::days_in_month;
use crate::plural::{EnglishPlural, Plural};
use crate::types::Precision;
use crate::{CalendarDate, CalendarError};

const MONTHS: i64 = MONTHS_PER_YEAR as i64;

/// A signed calendar offset of years, months and days.
///
/// Months are kept in `0..12`, with whole years carried into `years` (floor division, so
/// `-1` month becomes `-1` year and `11` months). Days are independent of the other two
/// components and never folded into months: "2 years minus 3 days" stays exactly that.
///
/// `new`, `scale`, `total_months` and the operators follow integer overflow rules, so they
/// panic on overflow in debug builds. The `checked_*` methods return `None` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "(i64, i64, i64)", into = "(i64, i64, i64)")]
pub struct Duration {
    years:  i64,
    months: i64,
    days:   i64,
}

impl Duration {
    pub const ZERO: Self = Self {
        years:  0,
        months: 0,
        days:   0,
    };

    /// Creates a duration, carrying whole years out of `months`.
    pub const fn new(years: i64, months: i64, days: i64) -> Self {
        Self {
            years: years + months.div_euclid(MONTHS),
            months: months.rem_euclid(MONTHS),
            days,
        }
    }

    /// [`Duration::new`] returning `None` when carrying the months overflows the years.
    pub const fn checked_new(years: i64, months: i64, days: i64) -> Option<Self> {
        match years.checked_add(months.div_euclid(MONTHS)) {
            Some(years) => Some(Self {
                years,
                months: months.rem_euclid(MONTHS),
                days,
            }),
            None => None,
        }
    }

    pub const fn days(days: i64) -> Self {
        Self::new(0, 0, days)
    }

    pub const fn months(months: i64) -> Self {
        Self::new(0, months, 0)
    }

    pub const fn years(years: i64) -> Self {
        Self::new(years, 0, 0)
    }

    #[inline]
    pub const fn year_part(&self) -> i64 {
        self.years
    }

    /// Month component, always in `0..12`
    #[inline]
    pub const fn month_part(&self) -> i64 {
        self.months
    }

    #[inline]
    pub const fn day_part(&self) -> i64 {
        self.days
    }

    pub const fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }

    /// Years and months in whole months, ignoring days.
    pub const fn total_months(&self) -> i64 {
        self.years * MONTHS + self.months
    }

    /// Multiplies every component by `factor`.
    pub const fn scale(&self, factor: i64) -> Self {
        Self::new(self.years * factor, self.months * factor, self.days * factor)
    }

    pub const fn negate(&self) -> Self {
        Self::new(-self.years, -self.months, -self.days)
    }

    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        Self::checked_new(
            self.years.checked_add(other.years)?,
            self.months + other.months,
            self.days.checked_add(other.days)?,
        )
    }

    pub fn checked_scale(&self, factor: i64) -> Option<Self> {
        Self::checked_new(
            self.years.checked_mul(factor)?,
            self.months.checked_mul(factor)?,
            self.days.checked_mul(factor)?,
        )
    }

    pub fn checked_neg(&self) -> Option<Self> {
        Self::checked_new(self.years.checked_neg()?, -self.months, self.days.checked_neg()?)
    }

    pub fn checked_total_months(&self) -> Option<i64> {
        self.years.checked_mul(MONTHS)?.checked_add(self.months)
    }

    /// Adds this duration to `date` the way a calendar does.
    ///
    /// Years and months move first and the day of month is clamped to the length of the
    /// target month, so 31-Jan plus one month is the last day of February. The day component
    /// is then added as an exact day count. Month-precision dates accept year and month
    /// offsets, year-precision dates only year offsets.
    ///
    /// # Errors
    /// `Precision` when the duration is finer than the date, `InvalidDate`/`*OutOfRange`
    /// when the result leaves the supported calendar.
    pub fn apply_to(&self, date: CalendarDate) -> Result<CalendarDate, CalendarError> {
        let (year, month, day) = date.ymd();
        match date.precision() {
            Precision::Year => {
                if self.months != 0 || self.days != 0 {
                    return Err(CalendarError::precision(
                        "add months or days to",
                        Precision::Year,
                    ));
                }
                Ok(CalendarDate::year_value(shift_year(year, self.years)?))
            }
            Precision::Month => {
                if self.days != 0 {
                    return Err(CalendarError::precision("add days to", Precision::Month));
                }
                let (year, month) = self.shift_month(year, month)?;
                CalendarDate::month_value(year, month)
            }
            Precision::Day => {
                let (year, month) = self.shift_month(year, month)?;
                let clamped = day.min(days_in_month(year, month));
                CalendarDate::new(year, month, clamped)?.add_days(self.days)
            }
        }
    }

    /// Formats the non-zero components through `P`, e.g. `"2 years 3 months 15 days"`.
    pub fn display_with<P: Plural>(&self) -> String {
        [
            (self.years, "year"),
            (self.months, "month"),
            (self.days, "day"),
        ]
        .into_iter()
        .filter(|(count, _)| *count != 0)
        .map(|(count, unit)| P::count(count, unit, None))
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Moves a 1-based `(year, month)` by this duration's years and months.
    fn shift_month(&self, year: i32, month: u8) -> Result<(i32, u8), CalendarError> {
        let zero_based = i64::from(month) - 1 + self.months;
        let year = shift_year(year, self.years.saturating_add(zero_based.div_euclid(MONTHS)))?;
        let month = u8::try_from(zero_based.rem_euclid(MONTHS) + 1)
            .map_err(|_| CalendarError::Overflow)?;
        Ok((year, month))
    }
}

/// A saturated sum is far outside `i32`, so it still reports the year as out of range.
fn shift_year(year: i32, by: i64) -> Result<i32, CalendarError> {
    let shifted = i64::from(year).saturating_add(by);
    i32::try_from(shifted).map_err(|_| CalendarError::YearOutOfRange(shifted))
}

impl From<(i64, i64, i64)> for Duration {
    fn from((years, months, days): (i64, i64, i64)) -> Self {
        Self::new(years, months, days)
    }
}

impl From<Duration> for (i64, i64, i64) {
    fn from(duration: Duration) -> Self {
        (duration.years, duration.months, duration.days)
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.years + other.years,
            self.months + other.months,
            self.days + other.days,
        )
    }
}

impl Neg for Duration {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl Mul<i64> for Duration {
    type Output = Self;

    fn mul(self, factor: i64) -> Self {
        self.scale(factor)
    }
}

impl Mul<Duration> for i64 {
    type Output = Duration;

    fn mul(self, duration: Duration) -> Duration {
        duration.scale(self)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_with::<EnglishPlural>())
    }
}
