//! strftime-style rendering of [`CalendarDate`] values.

use std::borrow::Cow;

use crate::consts::{JANUARY, MIN_DAY};
use crate::ordinal::to_ordinal;
use crate::{CalendarDate, CalendarError, Month, ParseError};

const WIDTH_SEPARATOR: char = ':';

impl CalendarDate {
    /// Renders this value through a strftime-style `spec` such as `"%d%m%y:6"`.
    ///
    /// Text after the last `:` is a minimum width, optionally prefixed by `<`, `>` or `^` for
    /// alignment (left by default). An empty pattern renders the `Display` form.
    ///
    /// | Directive | Output |
    /// |-----------|--------|
    /// | `%d` / `%e` | day of month, zero / space padded |
    /// | `%m` | month number, zero padded |
    /// | `%b` / `%B` | month name, abbreviated / full |
    /// | `%y` / `%Y` | two-digit year / year, at least four digits |
    /// | `%a` / `%A` | weekday name, abbreviated / full |
    /// | `%j` | day of the year, zero padded to three digits |
    /// | `%%` | a literal `%` |
    ///
    /// # Errors
    /// `Parse` for an unknown directive or a malformed width, `Precision` when a directive
    /// needs a month or day the value does not have.
    pub fn format(&self, spec: &str) -> Result<String, CalendarError> {
        let (pattern, width) = spec.rsplit_once(WIDTH_SEPARATOR).unwrap_or((spec, ""));
        let rendered = if pattern.is_empty() {
            self.to_string()
        } else {
            self.expand(pattern)?
        };
        pad(&rendered, width)
    }

    fn expand(&self, pattern: &str) -> Result<String, CalendarError> {
        let mut out = String::with_capacity(pattern.len() * 2);
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            let directive = chars
                .next()
                .ok_or_else(|| ParseError::InvalidFormat(pattern.to_owned()))?;
            out.push_str(&self.directive(directive)?);
        }
        Ok(out)
    }

    fn directive(&self, directive: char) -> Result<Cow<'static, str>, CalendarError> {
        Ok(match directive {
            '%' => Cow::Borrowed("%"),
            'Y' => format!("{:04}", self.year()).into(),
            'y' => format!("{:02}", self.year().rem_euclid(100)).into(),
            'm' => format!("{:02}", self.month_component()?.get()).into(),
            'b' => self.month_component()?.short_name().into(),
            'B' => self.month_component()?.name().into(),
            'd' => format!("{:02}", self.day_component()?).into(),
            'e' => format!("{:>2}", self.day_component()?).into(),
            'j' => {
                let first = to_ordinal(self.year(), JANUARY, MIN_DAY);
                format!("{:03}", self.as_ordinal()? - first + 1).into()
            }
            'a' => self.weekday()?.to_string().into(),
            'A' => self.weekday()?.name().into(),
            other => return Err(ParseError::InvalidFormat(format!("%{other}")).into()),
        })
    }

    fn month_component(&self) -> Result<Month, CalendarError> {
        match *self {
            Self::Day { month, .. } | Self::Month { month, .. } => Ok(month),
            Self::Year { .. } => Err(CalendarError::precision(
                "format the month of",
                self.precision(),
            )),
        }
    }

    fn day_component(&self) -> Result<u8, CalendarError> {
        self.day()
            .ok_or_else(|| CalendarError::precision("format the day of", self.precision()))
    }
}

/// Pads `text` to the width in `width`, e.g. `"6"`, `">6"` or `"^10"`.
fn pad(text: &str, width: &str) -> Result<String, CalendarError> {
    if width.is_empty() {
        return Ok(text.to_owned());
    }
    let align = width.chars().next().filter(|c| matches!(c, '<' | '>' | '^'));
    let digits = if align.is_some() { &width[1..] } else { width };
    let width: usize = digits
        .parse()
        .map_err(|_| ParseError::InvalidFormat(width.to_owned()))?;
    Ok(match align {
        Some('>') => format!("{text:>width$}"),
        Some('^') => format!("{text:^width$}"),
        _ => format!("{text:<width$}"),
    })
}
