/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use crate::date_math;
use crate::error::CalendarError;
use crate::Weekday;
use std::cmp::{Ordering, PartialOrd};
use std::fmt;

#[cfg(feature = "chrono")]
use chrono::{Datelike, NaiveDate};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An extremely simple, year-agnostic date: just a month and a day.
///
/// Days and Months are counted from 1 (e.g. January is 1, not 0).
/// February 29 is a valid `MonthDay`; whether it exists is only known
/// once a year is chosen.
///
/// When the `serde` feature is enabled, it is written as `"<month>/<day>"`
/// and read using the same (lenient) grammar as [`crate::DateRule`]
/// (e.g., `"Mar 1"`, `"1 March"` and `"03/01"` are all accepted).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct MonthDay {
    /// Months of the year, from 1 to 12
    month: u8,

    /// Day of the month, from 1 to N
    day: u8,
}

impl MonthDay {
    /// Builds a new `MonthDay`, checking that the day exists in
    /// at least some year.
    ///
    /// ```
    /// use calendar::MonthDay;
    /// assert!(MonthDay::new(2, 29).is_ok());
    /// assert!(MonthDay::new(4, 31).is_err());
    /// ```
    pub fn new(month: u8, day: u8) -> Result<Self, CalendarError> {
        date_math::check_month_day(month, day)?;
        Ok(Self { month, day })
    }

    /// The month, from 1 to 12
    pub fn month(&self) -> u8 {
        self.month
    }

    /// The day of the month
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Is this February 29?
    pub fn is_leap_day(&self) -> bool {
        self.month == 2 && self.day == 29
    }

    /// Checks whether this date exists in `year`
    pub fn exists_in(&self, year: i32) -> bool {
        date_math::check_date(year, self.month, self.day).is_ok()
    }

    /// Retrieves the day of the year corresponding to the date
    /// in a certain year
    pub fn day_of_year(&self, year: i32) -> Result<u16, CalendarError> {
        date_math::day_of_year(year, self.month, self.day)
    }

    /// Places this date in a year.
    pub fn in_year(&self, year: i32) -> Result<ResolvedDate, CalendarError> {
        ResolvedDate::new(year, self.month, self.day)
    }

    /// Returns February 28 if this is February 29, or `self` otherwise.
    pub fn without_leap_day(self) -> Self {
        if self.is_leap_day() {
            Self { month: 2, day: 28 }
        } else {
            self
        }
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.day)
    }
}

impl PartialOrd for MonthDay {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MonthDay {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.month.cmp(&other.month) {
            Ordering::Equal => self.day.cmp(&other.day),
            ord => ord,
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for MonthDay {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for MonthDay {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let rule: crate::DateRule = text.parse().map_err(serde::de::Error::custom)?;
        rule.as_month_day().ok_or_else(|| {
            serde::de::Error::custom(format!(
                "expecting a month and a day (e.g., '3/1'), found '{}'",
                text
            ))
        })
    }
}

/// A concrete date: a month and a day in a specific year, together with
/// its day of the week.
///
/// These are always valid (i.e., there is no `ResolvedDate` for February 29
/// of a non-leap year), and are meant to be produced by resolving
/// a [`crate::DateRule`] rather than stored. Deserializing checks the
/// date the same way [`ResolvedDate::new`] does; the weekday can be
/// omitted, but if present it has to match.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "UncheckedDate")
)]
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ResolvedDate {
    /// The Gregorian year
    pub year: i32,

    /// Months of the year, from 1 to 12
    pub month: u8,

    /// Day of the month, from 1 to N
    pub day: u8,

    /// The day of the week
    pub weekday: Weekday,
}

impl ResolvedDate {
    /// Builds a date, checking that it exists.
    ///
    /// ```
    /// use calendar::{ResolvedDate, Weekday};
    ///
    /// let d = ResolvedDate::new(2008, 2, 29).unwrap();
    /// assert_eq!(d.weekday, Weekday::Friday);
    ///
    /// assert!(ResolvedDate::new(2009, 2, 29).is_err());
    /// ```
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        let weekday = date_math::day_of_week(year, month, day)?;
        Ok(Self {
            year,
            month,
            day,
            weekday,
        })
    }

    /// Builds a date from a day of the year (1 is January 1)
    pub fn from_day_of_year(year: i32, day_of_year: u16) -> Result<Self, CalendarError> {
        let (month, day) = date_math::from_day_of_year(year, day_of_year)?;
        Self::new(year, month, day)
    }

    fn from_day_number(n: i64) -> Self {
        let (year, month, day) = date_math::civil_from_days(n);
        Self {
            year,
            month,
            day,
            weekday: Weekday::from_days_from_sunday(n + 4),
        }
    }

    /// Days since 1970-01-01
    pub(crate) fn day_number(&self) -> i64 {
        date_math::days_from_civil(self.year, self.month, self.day)
    }

    /// The day of the year, from 1 to 366
    pub fn day_of_year(&self) -> u16 {
        // Resolved dates are always valid in their year
        date_math::day_of_year(self.year, self.month, self.day).unwrap_or_default()
    }

    /// The year-agnostic part of the date
    pub fn month_day(&self) -> MonthDay {
        MonthDay {
            month: self.month,
            day: self.day,
        }
    }

    /// The date after this one
    pub fn next_day(&self) -> Self {
        Self::from_day_number(self.day_number() + 1)
    }

    /// Adds a number of days to the date (which can be negative),
    /// moving across months and years.
    pub fn add_days(&self, n_days: i64) -> Self {
        Self::from_day_number(self.day_number() + n_days)
    }

    /// The number of days from `other` to `self`
    pub fn days_since(&self, other: &Self) -> i64 {
        self.day_number() - other.day_number()
    }

    /// Transforms this date into a `chrono` `NaiveDate`.
    #[cfg(feature = "chrono")]
    pub fn into_naive_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month as u32, self.day as u32)
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UncheckedDate {
    year: i32,
    month: u8,
    day: u8,
    #[serde(default)]
    weekday: Option<Weekday>,
}

#[cfg(feature = "serde")]
impl TryFrom<UncheckedDate> for ResolvedDate {
    type Error = String;

    fn try_from(item: UncheckedDate) -> Result<Self, Self::Error> {
        let date = Self::new(item.year, item.month, item.day).map_err(|e| e.to_string())?;
        match item.weekday {
            Some(weekday) if weekday != date.weekday => Err(format!(
                "{} is a {}, not a {}",
                date, date.weekday, weekday
            )),
            _ => Ok(date),
        }
    }
}

#[cfg(feature = "chrono")]
impl std::convert::From<NaiveDate> for ResolvedDate {
    fn from(item: NaiveDate) -> Self {
        Self {
            year: item.year(),
            month: item.month() as u8,
            day: item.day() as u8,
            weekday: item.weekday().into(),
        }
    }
}

impl fmt::Display for ResolvedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl PartialOrd for ResolvedDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ResolvedDate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month, self.day).cmp(&(other.year, other.month, other.day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_day() {
        let d = MonthDay::new(2, 29).unwrap();
        assert!(d.is_leap_day());
        assert!(d.exists_in(2008));
        assert!(!d.exists_in(2009));
        assert_eq!(d.without_leap_day(), MonthDay::new(2, 28).unwrap());
        assert_eq!(d.day_of_year(2008).unwrap(), 60);
        assert!(d.in_year(2009).is_err());

        let d = MonthDay::new(3, 1).unwrap();
        assert_eq!(d.without_leap_day(), d);
        assert_eq!(format!("{}", d), "3/1");

        assert!(MonthDay::new(0, 1).is_err());
        assert!(MonthDay::new(1, 0).is_err());
        assert!(MonthDay::new(1, 32).is_err());
    }

    #[test]
    fn test_compare_month_day() {
        let mut dates = vec![
            MonthDay::new(12, 6).unwrap(),
            MonthDay::new(1, 2).unwrap(),
            MonthDay::new(2, 3).unwrap(),
            MonthDay::new(1, 1).unwrap(),
        ];
        dates.sort();
        assert_eq!(
            dates,
            vec![
                MonthDay::new(1, 1).unwrap(),
                MonthDay::new(1, 2).unwrap(),
                MonthDay::new(2, 3).unwrap(),
                MonthDay::new(12, 6).unwrap(),
            ]
        );
        assert!(MonthDay::new(3, 31).unwrap() < MonthDay::new(4, 1).unwrap());
    }

    #[test]
    fn test_resolved_date() {
        let d = ResolvedDate::new(2008, 12, 31).unwrap();
        assert_eq!(d.weekday, Weekday::Wednesday);
        assert_eq!(d.day_of_year(), 366);
        assert_eq!(format!("{}", d), "2008-12-31");

        let next = d.next_day();
        assert_eq!((next.year, next.month, next.day), (2009, 1, 1));
        assert_eq!(next.weekday, Weekday::Thursday);
        assert_eq!(next.days_since(&d), 1);
        assert!(next > d);

        let d = ResolvedDate::from_day_of_year(2008, 60).unwrap();
        assert_eq!(d.month_day(), MonthDay::new(2, 29).unwrap());
        assert_eq!(d.add_days(-60), ResolvedDate::new(2007, 12, 31).unwrap());
        assert_eq!(d.add_days(366), ResolvedDate::new(2009, 3, 1).unwrap());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() -> Result<(), String> {
        let d: MonthDay = serde_json::from_str("\"Mar 01\"").map_err(|e| e.to_string())?;
        assert_eq!(d, MonthDay::new(3, 1).map_err(|e| e.to_string())?);
        assert_eq!(
            serde_json::to_string(&d).map_err(|e| e.to_string())?,
            "\"3/1\""
        );

        // Weekday rules are not a month and a day
        assert!(serde_json::from_str::<MonthDay>("\"Last Sunday in March\"").is_err());
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_resolved_date() -> Result<(), String> {
        let d = ResolvedDate::new(2008, 2, 29).map_err(|e| e.to_string())?;
        let json = serde_json::to_string(&d).map_err(|e| e.to_string())?;
        let back: ResolvedDate = serde_json::from_str(&json).map_err(|e| e.to_string())?;
        assert_eq!(back, d);

        // The weekday is filled in when missing
        let d: ResolvedDate = serde_json::from_str(r#"{"year": 2009, "month": 11, "day": 26}"#)
            .map_err(|e| e.to_string())?;
        assert_eq!(d.weekday, Weekday::Thursday);
        assert_eq!(d.day_of_year(), 330);

        // Dates that do not exist
        assert!(
            serde_json::from_str::<ResolvedDate>(r#"{"year": 2009, "month": 2, "day": 29}"#)
                .is_err()
        );
        assert!(
            serde_json::from_str::<ResolvedDate>(r#"{"year": 2009, "month": 4, "day": 31}"#)
                .is_err()
        );

        // A weekday that does not match the date
        let mut value = serde_json::to_value(d).map_err(|e| e.to_string())?;
        value["weekday"] = serde_json::to_value(Weekday::Friday).map_err(|e| e.to_string())?;
        assert!(serde_json::from_value::<ResolvedDate>(value).is_err());
        Ok(())
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn test_chrono() {
        let d = ResolvedDate::new(2009, 11, 26).unwrap();
        let naive = d.into_naive_date().unwrap();
        assert_eq!(ResolvedDate::from(naive), d);
    }
}
