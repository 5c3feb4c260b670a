//! Choosing the singular or plural form of a unit name for a count.
//!
//! [`Plural`] is the hook [`crate::Duration`] formats through. Languages override the
//! `single`/`dual`/`multiple` forms; the default keeps the singular unless an explicit
//! plural is supplied.

use std::borrow::Cow;

pub trait Plural {
    /// Form used for a count of exactly one.
    fn single<'a>(singular: &'a str, _plural: Option<&'a str>) -> Cow<'a, str> {
        Cow::Borrowed(singular)
    }

    /// Form used for a count of exactly two.
    fn dual<'a>(singular: &'a str, plural: Option<&'a str>) -> Cow<'a, str> {
        Cow::Borrowed(plural.unwrap_or(singular))
    }

    /// Form used for every other count, zero included.
    fn multiple<'a>(singular: &'a str, plural: Option<&'a str>) -> Cow<'a, str> {
        Self::dual(singular, plural)
    }

    /// Picks the form for `count`. An empty singular always yields an empty string.
    fn plural<'a>(count: i64, singular: &'a str, plural: Option<&'a str>) -> Cow<'a, str> {
        if singular.is_empty() {
            return Cow::Borrowed("");
        }
        match count.unsigned_abs() {
            1 => Self::single(singular, plural),
            2 => Self::dual(singular, plural),
            _ => Self::multiple(singular, plural),
        }
    }

    /// `count` followed by the matching unit name, e.g. `"3 months"`.
    fn count(count: i64, singular: &str, plural: Option<&str>) -> String {
        format!("{count} {}", Self::plural(count, singular, plural))
    }
}

/// Language-neutral forms: the singular unless a plural is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralPlural;

impl Plural for NeutralPlural {}

/// English forms: the given plural, or the singular with an `s` appended.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishPlural;

impl Plural for EnglishPlural {
    fn dual<'a>(singular: &'a str, plural: Option<&'a str>) -> Cow<'a, str> {
        plural.map_or_else(|| Cow::Owned(format!("{singular}s")), Cow::Borrowed)
    }
}
