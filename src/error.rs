use crate::ParseError;
use crate::types::Precision;

/// Error type for every fallible calendar operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Day or month outside the calendar for that year.
    #[error("Invalid date: day {day} of month {month} in year {year}")]
    InvalidDate { year: i32, month: u8, day: u8 },

    /// Weekday index outside `0..7`.
    #[error("Invalid weekday: {0} (must be 0-6)")]
    InvalidWeekday(u8),

    /// Operation needs a different precision than the value has.
    #[error("Cannot {operation} a {precision}-precision date")]
    Precision {
        operation: &'static str,
        precision: Precision,
    },

    /// Index past either end of a sequence.
    #[error("Index {index} out of range for length {length}")]
    Index { index: i64, length: i64 },

    /// Interval operation that needs both ends bounded.
    #[error("Cannot {operation} an unbounded interval")]
    Unbounded { operation: &'static str },

    /// Day ordinal whose year does not fit an `i32`.
    #[error("Day ordinal {0} is outside the supported calendar")]
    OrdinalOutOfRange(i64),

    /// Year that does not fit an `i32`.
    #[error("Year {0} is outside the supported calendar")]
    YearOutOfRange(i64),

    /// Integer interval arithmetic overflowed.
    #[error("Arithmetic overflow")]
    Overflow,

    /// Error parsing a date string.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl CalendarError {
    pub(crate) fn precision(operation: &'static str, precision: Precision) -> Self {
        #[cfg(feature = "log")]
        log::debug!("cannot {operation} a {precision}-precision date");
        Self::Precision {
            operation,
            precision,
        }
    }

    pub(crate) fn index(index: i64, length: i64) -> Self {
        #[cfg(feature = "log")]
        log::debug!("index {index} out of range for length {length}");
        Self::Index { index, length }
    }

    pub(crate) fn unbounded(operation: &'static str) -> Self {
        #[cfg(feature = "log")]
        log::debug!("cannot {operation} an unbounded interval");
        Self::Unbounded { operation }
    }
}
