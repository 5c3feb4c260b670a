use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::BitAnd;
use std::sync::OnceLock;

use crate::consts::{DECEMBER, INTERVAL_SEPARATOR, JANUARY};
use crate::ordinal::days_in_month;
use crate::{CalendarDate, CalendarError, Days, Duration, Precision, prelude::*};

/// Values an [`Interval`] can measure and index into.
pub trait Step: Sized {
    /// Signed number of steps from `start` to `end`.
    ///
    /// # Errors
    /// When either value cannot be stepped or the distance overflows.
    fn distance(start: &Self, end: &Self) -> Result<i64, CalendarError>;

    /// The value `steps` further on (backwards when negative).
    ///
    /// # Errors
    /// When the value cannot be stepped or the result leaves the type's range.
    fn forward(&self, steps: i64) -> Result<Self, CalendarError>;
}

macro_rules! impl_step_for_int {
    ($($t:ty),*) => {$(
        impl Step for $t {
            fn distance(start: &Self, end: &Self) -> Result<i64, CalendarError> {
                i64::from(*end)
                    .checked_sub(i64::from(*start))
                    .ok_or(CalendarError::Overflow)
            }

            fn forward(&self, steps: i64) -> Result<Self, CalendarError> {
                i64::from(*self)
                    .checked_add(steps)
                    .and_then(|value| Self::try_from(value).ok())
                    .ok_or(CalendarError::Overflow)
            }
        }
    )*};
}

impl_step_for_int!(i8, i16, i32, i64, u8, u16, u32);

/// Full dates step one day at a time.
impl Step for CalendarDate {
    fn distance(start: &Self, end: &Self) -> Result<i64, CalendarError> {
        Ok(end.as_ordinal()? - start.as_ordinal()?)
    }

    fn forward(&self, steps: i64) -> Result<Self, CalendarError> {
        self.add_days(steps)
    }
}

/// A closed range `[start..end]` where a missing end means no limit on that side.
///
/// Nothing checks that `start <= end`; an inverted interval contains nothing and its length
/// is still the absolute distance between the ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    start: Option<T>,
    end:   Option<T>,
}

impl<T> Interval<T> {
    pub const fn new(start: Option<T>, end: Option<T>) -> Self {
        Self { start, end }
    }

    pub const fn bounded(start: T, end: T) -> Self {
        Self::new(Some(start), Some(end))
    }

    /// Interval with no limit on either side
    pub const fn unbounded() -> Self {
        Self::new(None, None)
    }

    pub const fn start(&self) -> Option<&T> {
        self.start.as_ref()
    }

    pub const fn end(&self) -> Option<&T> {
        self.end.as_ref()
    }

    pub const fn is_bounded(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    fn bounds(&self, operation: &'static str) -> Result<(&T, &T), CalendarError> {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => Ok((start, end)),
            _ => Err(CalendarError::unbounded(operation)),
        }
    }
}

impl<T: Ord> Interval<T> {
    /// Whether `value` lies between the ends, inclusive.
    ///
    /// A fully unbounded interval contains only the absent value; any other interval never
    /// contains it.
    pub fn contains(&self, value: Option<&T>) -> bool {
        match (&self.start, &self.end, value) {
            (None, None, value) => value.is_none(),
            (_, _, None) => false,
            (start, end, Some(value)) => {
                start.as_ref().is_none_or(|start| start <= value)
                    && end.as_ref().is_none_or(|end| value <= end)
            }
        }
    }

    /// The overlap of two intervals, or `None` when they are disjoint.
    ///
    /// On each side a missing bound defers to the other interval's bound.
    pub fn intersect(&self, other: &Self) -> Option<Self>
    where
        T: Clone,
    {
        let (start, end) = self.overlap(other)?;
        Some(Self::new(start.cloned(), end.cloned()))
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        self.overlap(other).is_some()
    }

    fn overlap<'a>(&'a self, other: &'a Self) -> Option<(Option<&'a T>, Option<&'a T>)> {
        let latest_start = match (self.start(), other.start()) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        let earliest_end = match (self.end(), other.end()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        match (latest_start, earliest_end) {
            (Some(start), Some(end)) if start > end => None,
            bounds => Some(bounds),
        }
    }
}

impl<T: Step> Interval<T> {
    /// Absolute number of steps between the two ends.
    ///
    /// # Errors
    /// Returns `CalendarError::Unbounded` if either end is missing.
    pub fn length(&self) -> Result<i64, CalendarError> {
        let (start, end) = self.bounds("measure")?;
        T::distance(start, end)?
            .checked_abs()
            .ok_or(CalendarError::Overflow)
    }

    /// The value `index` steps from the start; negative indices count back from the end
    /// (`-1` is the end itself).
    ///
    /// # Errors
    /// Returns `CalendarError::Unbounded` if either end is missing and
    /// `CalendarError::Index` when `|index|` exceeds the length.
    pub fn nth(&self, index: i64) -> Result<T, CalendarError> {
        let length = self.length()?;
        let (start, _) = self.bounds("index")?;
        if index.unsigned_abs() > length.unsigned_abs() {
            return Err(CalendarError::index(index, length));
        }
        let offset = if index < 0 { index + length + 1 } else { index };
        start.forward(offset)
    }
}

impl<T: Ord + Clone> BitAnd for Interval<T> {
    type Output = Option<Self>;

    fn bitand(self, other: Self) -> Option<Self> {
        self.intersect(&other)
    }
}

impl<T: Ord + Clone> BitAnd for &Interval<T> {
    type Output = Option<Interval<T>>;

    fn bitand(self, other: Self) -> Option<Interval<T>> {
        self.intersect(other)
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        if let Some(start) = &self.start {
            write!(f, "{start}")?;
        }
        f.write_str(INTERVAL_SEPARATOR)?;
        if let Some(end) = &self.end {
            write!(f, "{end}")?;
        }
        f.write_str("]")
    }
}

/// An [`Interval`] of dates that also knows its calendar [`Duration`].
///
/// The duration is computed on first use and kept for the life of the value.
#[derive(Debug, Clone, Deref)]
pub struct DateInterval {
    #[deref]
    interval: Interval<CalendarDate>,
    duration: OnceLock<Duration>,
}

impl DateInterval {
    pub const fn new(start: Option<CalendarDate>, end: Option<CalendarDate>) -> Self {
        Self {
            interval: Interval::new(start, end),
            duration: OnceLock::new(),
        }
    }

    pub const fn between(start: CalendarDate, end: CalendarDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    pub const fn interval(&self) -> &Interval<CalendarDate> {
        &self.interval
    }

    /// Years, months and days from the start to the end.
    ///
    /// Months are borrowed from the year when the end's month is earlier than the start's,
    /// then days from the month before the end's month when the end's day is earlier.
    ///
    /// # Errors
    /// `Unbounded` if an end is missing, `Precision` if an end is not a full date.
    pub fn duration(&self) -> Result<Duration, CalendarError> {
        let (start, end) = self.full_bounds("measure the duration of")?;
        Ok(*self
            .duration
            .get_or_init(|| calendar_span(start.ymd(), end.ymd())))
    }

    /// # Errors
    /// See [`DateInterval::duration`].
    pub fn years(&self) -> Result<i64, CalendarError> {
        self.duration().map(|d| d.year_part())
    }

    /// # Errors
    /// See [`DateInterval::duration`].
    pub fn months(&self) -> Result<i64, CalendarError> {
        self.duration().map(|d| d.month_part())
    }

    /// # Errors
    /// See [`DateInterval::duration`].
    pub fn days(&self) -> Result<i64, CalendarError> {
        self.duration().map(|d| d.day_part())
    }

    /// The span as a plain day count.
    ///
    /// # Errors
    /// See [`DateInterval::duration`].
    pub fn days_view(&self) -> Result<Duration, CalendarError> {
        self.full_bounds("count the days of")?;
        Ok(Duration::days(self.interval.length()?))
    }

    /// The span as whole months plus days.
    ///
    /// # Errors
    /// See [`DateInterval::duration`].
    pub fn months_view(&self) -> Result<Duration, CalendarError> {
        let duration = self.duration()?;
        Ok(Duration::new(0, duration.total_months(), duration.day_part()))
    }

    /// The span as years, months and days; the same as [`DateInterval::duration`].
    ///
    /// # Errors
    /// See [`DateInterval::duration`].
    pub fn years_view(&self) -> Result<Duration, CalendarError> {
        self.duration()
    }

    pub fn intersect(&self, other: &Self) -> Option<Self> {
        self.interval.intersect(&other.interval).map(Self::from)
    }

    /// Every date from the start to the end, inclusive.
    ///
    /// # Errors
    /// `Unbounded` if an end is missing, `Precision` if an end is not a full date.
    pub fn iter(&self) -> Result<Days, CalendarError> {
        let (start, end) = self.full_bounds("iterate")?;
        Ok(Days::new(start.as_ordinal()?, end.as_ordinal()?))
    }

    fn full_bounds(
        &self,
        operation: &'static str,
    ) -> Result<(&CalendarDate, &CalendarDate), CalendarError> {
        let (start, end) = self.interval.bounds(operation)?;
        for date in [start, end] {
            if date.precision() != Precision::Day {
                return Err(CalendarError::precision(operation, date.precision()));
            }
        }
        Ok((start, end))
    }
}

/// Civil difference between two `(year, month, day)` triples, borrowing a year for a
/// negative month difference and the length of the month before `end`'s for a negative day
/// difference.
fn calendar_span(start: (i32, u8, u8), end: (i32, u8, u8)) -> Duration {
    let (start_year, start_month, start_day) = start;
    let (end_year, end_month, end_day) = end;

    let overflow_month = start_month > end_month;
    let years = i64::from(end_year) - i64::from(start_year) - i64::from(overflow_month);
    let mut months = i64::from(end_month) - i64::from(start_month);
    if overflow_month {
        months += 12;
    }

    let overflow_day = start_day > end_day;
    let mut days = i64::from(end_day) - i64::from(start_day);
    if overflow_day {
        months -= 1;
        days += i64::from(days_in_previous_month(end_year, end_month));
    }

    Duration::new(years, months, days)
}

fn days_in_previous_month(year: i32, month: u8) -> u8 {
    if month == JANUARY {
        // December is 31 days in every year
        days_in_month(year, DECEMBER)
    } else {
        days_in_month(year, month - 1)
    }
}

impl From<Interval<CalendarDate>> for DateInterval {
    fn from(interval: Interval<CalendarDate>) -> Self {
        Self {
            interval,
            duration: OnceLock::new(),
        }
    }
}

impl PartialEq for DateInterval {
    fn eq(&self, other: &Self) -> bool {
        self.interval == other.interval
    }
}

impl Eq for DateInterval {}

impl Hash for DateInterval {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.interval.hash(state);
    }
}

impl BitAnd for &DateInterval {
    type Output = Option<DateInterval>;

    fn bitand(self, other: Self) -> Option<DateInterval> {
        self.intersect(other)
    }
}

impl fmt::Display for DateInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.interval, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, month, span};

    #[test]
    fn test_accessors() {
        let interval = Interval::bounded(1, 10);
        assert_eq!(interval.start(), Some(&1));
        assert_eq!(interval.end(), Some(&10));
        assert!(interval.is_bounded());
        assert!(!Interval::new(Some(1), None).is_bounded());
    }

    #[test]
    fn test_contains_cases() {
        struct TestCase {
            interval: Interval<i32>,
            value:    Option<i32>,
            expected: bool,
        }

        let cases = [
            TestCase { interval: Interval::bounded(1, 10), value: Some(1), expected: true },
            TestCase { interval: Interval::bounded(1, 10), value: Some(10), expected: true },
            TestCase { interval: Interval::bounded(1, 10), value: Some(11), expected: false },
            TestCase { interval: Interval::bounded(1, 10), value: Some(0), expected: false },
            TestCase { interval: Interval::bounded(1, 10), value: None, expected: false },
            TestCase { interval: Interval::new(None, Some(10)), value: Some(-500), expected: true },
            TestCase { interval: Interval::new(None, Some(10)), value: Some(11), expected: false },
            TestCase { interval: Interval::new(Some(1), None), value: Some(500), expected: true },
            TestCase { interval: Interval::new(Some(1), None), value: None, expected: false },
            TestCase { interval: Interval::unbounded(), value: None, expected: true },
            TestCase { interval: Interval::unbounded(), value: Some(0), expected: false },
            TestCase { interval: Interval::bounded(10, 1), value: Some(5), expected: false },
        ];

        for case in &cases {
            assert_eq!(
                case.interval.contains(case.value.as_ref()),
                case.expected,
                "{:?} contains {:?}",
                case.interval,
                case.value
            );
        }
    }

    #[test]
    fn test_intersect_cases() {
        struct TestCase {
            left:     Interval<i32>,
            right:    Interval<i32>,
            expected: Option<Interval<i32>>,
        }

        let cases = [
            TestCase {
                left:     Interval::bounded(1, 10),
                right:    Interval::bounded(5, 20),
                expected: Some(Interval::bounded(5, 10)),
            },
            TestCase {
                left:     Interval::bounded(1, 10),
                right:    Interval::bounded(11, 20),
                expected: None,
            },
            TestCase {
                left:     Interval::bounded(1, 10),
                right:    Interval::bounded(10, 20),
                expected: Some(Interval::bounded(10, 10)),
            },
            TestCase {
                left:     Interval::new(None, Some(10)),
                right:    Interval::bounded(5, 20),
                expected: Some(Interval::bounded(5, 10)),
            },
            TestCase {
                left:     Interval::new(Some(3), None),
                right:    Interval::new(Some(5), None),
                expected: Some(Interval::new(Some(5), None)),
            },
            TestCase {
                left:     Interval::unbounded(),
                right:    Interval::bounded(5, 20),
                expected: Some(Interval::bounded(5, 20)),
            },
            TestCase {
                left:     Interval::unbounded(),
                right:    Interval::unbounded(),
                expected: Some(Interval::unbounded()),
            },
            TestCase {
                left:     Interval::new(Some(30), None),
                right:    Interval::new(None, Some(20)),
                expected: None,
            },
        ];

        for case in &cases {
            assert_eq!(
                case.left.intersect(&case.right),
                case.expected,
                "{:?} & {:?}",
                case.left,
                case.right
            );
            assert_eq!(case.right & case.left, case.expected, "commutes");
            assert_eq!(case.left.overlaps(&case.right), case.expected.is_some());
        }
    }

    #[test]
    fn test_length_and_nth() {
        let interval = Interval::bounded(10_i64, 16);
        assert_eq!(interval.length().unwrap(), 6);
        assert_eq!(interval.nth(0).unwrap(), 10);
        assert_eq!(interval.nth(6).unwrap(), 16);
        assert_eq!(interval.nth(-1).unwrap(), 16);
        assert_eq!(interval.nth(-6).unwrap(), 11);
        assert!(matches!(interval.nth(7), Err(CalendarError::Index { index: 7, length: 6 })));
        assert!(matches!(interval.nth(-7), Err(CalendarError::Index { .. })));

        assert_eq!(Interval::bounded(16_u8, 10).length().unwrap(), 6);
    }

    #[test]
    fn test_length_of_open_interval_fails() {
        assert!(matches!(
            Interval::new(Some(1_i32), None).length(),
            Err(CalendarError::Unbounded { .. })
        ));
        assert!(matches!(
            Interval::<i32>::unbounded().nth(0),
            Err(CalendarError::Unbounded { .. })
        ));
    }

    #[test]
    fn test_small_and_overflowing_integers() {
        let interval = Interval::bounded(250_u8, 255);
        assert_eq!(interval.nth(5).unwrap(), 255);
        assert_eq!(interval.nth(-1).unwrap(), 255);
        assert!(matches!(
            Interval::bounded(i64::MIN, i64::MAX).length(),
            Err(CalendarError::Overflow)
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Interval::bounded(1, 10).to_string(), "[1..10]");
        assert_eq!(Interval::new(None, Some(10)).to_string(), "[..10]");
        assert_eq!(Interval::<i32>::unbounded().to_string(), "[..]");
        assert_eq!(span((2013, 1, 13), (2013, 1, 19)).to_string(), "[13-Jan-2013..19-Jan-2013]");
    }

    #[test]
    fn test_duration_cases() {
        struct TestCase {
            start:    (i32, u8, u8),
            end:      (i32, u8, u8),
            length:   i64,
            duration: Duration,
        }

        let cases = [
            TestCase { start: (2013, 1, 1), end: (2015, 4, 16), length: 835, duration: Duration::new(2, 3, 15) },
            TestCase { start: (1963, 12, 7), end: (2013, 1, 1), length: 17_923, duration: Duration::new(49, 0, 25) },
            TestCase { start: (2013, 2, 28), end: (2013, 3, 1), length: 1, duration: Duration::days(1) },
            TestCase { start: (2012, 2, 28), end: (2012, 3, 1), length: 2, duration: Duration::days(2) },
            TestCase { start: (2012, 3, 1), end: (2012, 3, 31), length: 30, duration: Duration::days(30) },
            TestCase { start: (2013, 1, 31), end: (2014, 1, 1), length: 335, duration: Duration::new(0, 11, 1) },
            TestCase { start: (2013, 1, 15), end: (2013, 1, 15), length: 0, duration: Duration::ZERO },
        ];

        for case in &cases {
            let interval = span(case.start, case.end);
            assert_eq!(interval.length().unwrap(), case.length, "length of {interval}");
            assert_eq!(interval.duration().unwrap(), case.duration, "duration of {interval}");
        }
    }

    #[test]
    fn test_duration_borrow_is_asymmetric() {
        let forward = span((2013, 2, 28), (2013, 3, 1));
        let backward = span((2013, 3, 1), (2013, 2, 28));
        assert_eq!(forward.length().unwrap(), backward.length().unwrap());
        assert_eq!(forward.duration().unwrap(), Duration::days(1));
        assert_eq!(backward.duration().unwrap(), Duration::new(-1, 11, 27));
    }

    #[test]
    fn test_duration_components_and_views() {
        let interval = span((2013, 1, 1), (2015, 4, 16));
        assert_eq!(interval.years().unwrap(), 2);
        assert_eq!(interval.months().unwrap(), 3);
        assert_eq!(interval.days().unwrap(), 15);
        assert_eq!(interval.days_view().unwrap(), Duration::days(835));
        assert_eq!(
            interval.months_view().unwrap(),
            Duration::months(27) + Duration::days(15)
        );
        assert_eq!(interval.years_view().unwrap(), Duration::new(2, 3, 15));

        let interval = span((1963, 12, 7), (2013, 1, 1));
        assert_eq!(
            interval.years_view().unwrap(),
            Duration::years(49) + Duration::days(25)
        );
    }

    #[test]
    fn test_duration_is_cached() {
        let interval = span((2013, 1, 1), (2015, 4, 16));
        assert!(interval.duration.get().is_none());
        let first = interval.duration().unwrap();
        assert_eq!(interval.duration.get(), Some(&first));
        assert_eq!(interval.duration().unwrap(), first);

        let copy = interval.clone();
        assert_eq!(copy.duration.get(), Some(&first));
    }

    #[test]
    fn test_duration_requires_full_bounds() {
        let open = DateInterval::new(None, Some(date(2013, 1, 1)));
        assert!(matches!(open.duration(), Err(CalendarError::Unbounded { .. })));
        assert!(matches!(open.days_view(), Err(CalendarError::Unbounded { .. })));

        let months = DateInterval::between(month(2013, 1), month(2013, 3));
        assert!(matches!(months.duration(), Err(CalendarError::Precision { .. })));
        assert!(matches!(months.iter(), Err(CalendarError::Precision { .. })));
    }

    #[test]
    fn test_date_containment() {
        let interval = span((2013, 1, 1), (2015, 4, 16));
        assert!(interval.contains(Some(&date(2015, 4, 16))));
        assert!(interval.contains(Some(&date(2013, 1, 1))));
        assert!(!interval.contains(Some(&date(2015, 4, 17))));
        assert!(!interval.contains(Some(&date(2012, 12, 31))));
    }

    #[test]
    fn test_open_date_intervals() {
        let until = DateInterval::new(None, Some(date(2013, 1, 1)));
        assert!(until.contains(Some(&date(2013, 1, 1))));
        assert!(!until.contains(Some(&date(2013, 1, 2))));

        let from = DateInterval::new(Some(date(2013, 1, 1)), None);
        assert!(!from.contains(Some(&date(2012, 12, 31))));
        assert!(from.contains(Some(&date(2013, 1, 1))));

        let all = DateInterval::new(None, None);
        assert!(!all.contains(Some(&date(2012, 12, 31))));
        assert!(!all.contains(Some(&date(2013, 1, 1))));
        assert!(all.contains(None));
    }

    #[test]
    fn test_date_intersection() {
        let march = span((2012, 3, 1), (2012, 3, 31));
        assert_eq!(march.intersect(&span((2012, 1, 1), (2012, 12, 31))), Some(march.clone()));
        assert_eq!(
            &march & &span((2012, 1, 1), (2012, 3, 15)),
            Some(span((2012, 3, 1), (2012, 3, 15)))
        );
        assert_eq!(
            &march & &span((2012, 3, 15), (2012, 3, 20)),
            Some(span((2012, 3, 15), (2012, 3, 20)))
        );
        assert_eq!(&march & &span((2012, 4, 1), (2012, 5, 1)), None);
    }

    #[test]
    fn test_iteration() {
        let interval = span((2012, 2, 27), (2012, 3, 2));
        let days: Vec<_> = interval.iter().unwrap().collect();
        assert_eq!(
            days,
            vec![
                date(2012, 2, 27),
                date(2012, 2, 28),
                date(2012, 2, 29),
                date(2012, 3, 1),
                date(2012, 3, 2),
            ]
        );
        assert_eq!(interval.iter().unwrap().len(), 5);
        assert_eq!(span((2013, 1, 2), (2013, 1, 1)).iter().unwrap().count(), 0);
    }

    #[test]
    fn test_nth_date() {
        let interval = span((2013, 1, 13), (2013, 1, 19));
        assert_eq!(interval.nth(0).unwrap(), date(2013, 1, 13));
        assert_eq!(interval.nth(-1).unwrap(), date(2013, 1, 19));
        assert_eq!(interval.nth(3).unwrap(), date(2013, 1, 16));
        assert!(interval.nth(7).is_err());
    }
}
