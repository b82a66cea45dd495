use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Debug, Display},
    str::FromStr,
    sync::OnceLock,
};
use time::{Date as TimeDate, Month, format_description::FormatItem};

static FORMAT: OnceLock<Vec<FormatItem<'static>>> = OnceLock::new();

fn iso_format() -> &'static [FormatItem<'static>] {
    FORMAT.get_or_init(|| {
        time::format_description::parse("[year]-[month]-[day]").expect("static format")
    })
}

///
/// Date
///
/// Calendar date with a single canonical external form, ISO `YYYY-MM-DD`.
///

#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date(TimeDate);

impl Date {
    /// Construct from calendar components, rejecting impossible dates.
    #[must_use]
    pub fn new(y: i32, m: u8, d: u8) -> Option<Self> {
        let month = Month::try_from(m).ok()?;
        TimeDate::from_calendar_date(y, month, d).ok().map(Self)
    }

    /// Parse the canonical `YYYY-MM-DD` form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        TimeDate::parse(s, iso_format()).ok().map(Self)
    }

    /// Returns the year component (e.g. 2025)
    #[must_use]
    pub const fn year(self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1–12)
    #[must_use]
    pub const fn month(self) -> u8 {
        self.0.month() as u8
    }

    /// Returns the day-of-month component (1–31)
    #[must_use]
    pub const fn day(self) -> u8 {
        self.0.day()
    }
}

impl Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Date({self})")
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year(),
            self.month(),
            self.day()
        )
    }
}

impl FromStr for Date {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid date: {s}"))
    }
}

impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {s}")))
    }
}

///
/// TESTS
///
