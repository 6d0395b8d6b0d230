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

use crate::date_rule::DateRule;
use crate::date_math;
use crate::error::CalendarError;
use crate::resolver;
use crate::{LeapCascade, LeapDayDependent, ResolvedDate, Weekday};
use std::cell::RefCell;
use std::fmt;
use std::ops::RangeInclusive;
use std::rc::Rc;
use std::str::FromStr;
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The weekday assumed for January 1 when none is given
pub const DEFAULT_START_WEEKDAY: Weekday = Weekday::Thursday;

/// The leap-year status assumed when none is given
pub const DEFAULT_LEAP_YEAR: bool = false;

/// The years in which the assumed year is searched for. Every
/// combination of weekday and leap-year status occurs in it.
pub const ASSUMED_YEAR_SEARCH_WINDOW: RangeInclusive<i32> = 1900..=2100;

/// The calendar years that can be set explicitly
pub const CALENDAR_YEAR_RANGE: RangeInclusive<i32> = 1000..=9999;

/// The weekday on which the year starts, as it can be requested by
/// users.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StartWeekday {
    /// A specific weekday
    Day(Weekday),

    /// Use whatever the weather file says.
    ///
    /// Weather files are not read in here, so this currently behaves
    /// exactly like [`DEFAULT_START_WEEKDAY`].
    UseWeatherFile,
}

impl From<Weekday> for StartWeekday {
    fn from(item: Weekday) -> Self {
        Self::Day(item)
    }
}

impl fmt::Display for StartWeekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(w) => write!(f, "{}", w.name()),
            Self::UseWeatherFile => write!(f, "UseWeatherFile"),
        }
    }
}

impl FromStr for StartWeekday {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.eq_ignore_ascii_case("UseWeatherFile")
            || token.eq_ignore_ascii_case("DeriveFromWeatherFile")
        {
            return Ok(Self::UseWeatherFile);
        }
        Weekday::from_name(token)
            .map(Self::Day)
            .ok_or_else(|| CalendarError::Format {
                text: s.to_string(),
            })
    }
}

#[cfg(feature = "serde")]
impl Serialize for StartWeekday {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for StartWeekday {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Finds the first year in `window` that starts on `start_weekday` and
/// whose leap-year status is `leap_year`.
///
/// ```
/// use calendar::{find_assumed_year, Weekday};
///
/// assert_eq!(find_assumed_year(Weekday::Tuesday, true, 2000..=2100).unwrap(), 2008);
/// assert!(find_assumed_year(Weekday::Tuesday, true, 2009..=2012).is_err());
/// ```
pub fn find_assumed_year(
    start_weekday: Weekday,
    leap_year: bool,
    window: RangeInclusive<i32>,
) -> Result<i32, CalendarError> {
    let (first, last) = (*window.start(), *window.end());
    window
        .into_iter()
        .find(|y| date_math::is_leap_year(*y) == leap_year && january_first(*y) == start_weekday)
        .ok_or(CalendarError::YearSearchExhausted {
            start_weekday,
            leap_year,
            first,
            last,
        })
}

fn january_first(year: i32) -> Weekday {
    Weekday::from_days_from_sunday(date_math::days_from_civil(year, 1, 1) + 4)
}

/// Decides which year the dates of a model fall in.
///
/// Either a calendar year is set explicitly, or the year is assumed:
/// it is the first year (in [`ASSUMED_YEAR_SEARCH_WINDOW`]) that starts
/// on the requested weekday and has the requested leap-year status.
/// Setting a calendar year clears the weekday and leap-year requests,
/// which become read-only quantities derived from the year.
///
/// Whenever the year stops being a leap year, every registered
/// [`LeapDayDependent`] is told to get rid of February 29.
///
/// ```
/// use calendar::{YearContext, Weekday, StartWeekday};
///
/// let mut ctx = YearContext::new();
/// // Non-leap, starting on Thursday
/// assert_eq!(ctx.effective_year().unwrap(), 1903);
///
/// ctx.set_calendar_year(2008).unwrap();
/// assert_eq!(ctx.start_weekday(), Weekday::Tuesday);
/// assert!(ctx.is_start_weekday_defaulted());
/// assert!(ctx.set_start_weekday(StartWeekday::Day(Weekday::Monday)).is_err());
/// ```
///
/// Mutators that can make the year stop being a leap year repair every
/// registered dependent before returning. Do not hold a borrow of a
/// dependent across such a call, or it will keep its February 29
/// (see [`LeapCascade::on_leap_year_transition`]).
///
/// A clone copies the year description but not the registered
/// dependents: changing the clone never repairs the original's objects.
#[derive(Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "YearDescription", into = "YearDescription")
)]
pub struct YearContext {
    calendar_year: Option<i32>,
    start_weekday: Option<StartWeekday>,
    leap_year: Option<bool>,
    cascade: LeapCascade,
}

impl Clone for YearContext {
    fn clone(&self) -> Self {
        Self {
            calendar_year: self.calendar_year,
            start_weekday: self.start_weekday,
            leap_year: self.leap_year,
            cascade: LeapCascade::new(),
        }
    }
}

impl YearContext {
    /// Creates a context with nothing set (i.e., the year is assumed
    /// from the defaults)
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context with an explicit calendar year
    pub fn with_calendar_year(year: i32) -> Result<Self, CalendarError> {
        let mut ret = Self::new();
        ret.set_calendar_year(year)?;
        Ok(ret)
    }

    /// The explicit calendar year, if any
    pub fn calendar_year(&self) -> Option<i32> {
        self.calendar_year
    }

    /// The weekday requested for January 1, if any. This is always
    /// `None` while a calendar year is set.
    pub fn explicit_start_weekday(&self) -> Option<StartWeekday> {
        self.start_weekday
    }

    /// The leap-year status requested, if any. This is always
    /// `None` while a calendar year is set.
    pub fn explicit_leap_year(&self) -> Option<bool> {
        self.leap_year
    }

    /// Checks whether the start weekday is derived (from the
    /// calendar year or the defaults) rather than requested.
    pub fn is_start_weekday_defaulted(&self) -> bool {
        self.start_weekday.is_none()
    }

    /// Checks whether the leap-year status is derived (from the
    /// calendar year or the defaults) rather than requested.
    pub fn is_leap_year_defaulted(&self) -> bool {
        self.leap_year.is_none()
    }

    /// The weekday the assumed year must start on
    fn requested_start_weekday(&self) -> Weekday {
        match self.start_weekday {
            Some(StartWeekday::Day(w)) => w,
            Some(StartWeekday::UseWeatherFile) => {
                warn!(
                    "Start weekday is set to be taken from the weather file; assuming {}",
                    DEFAULT_START_WEEKDAY
                );
                DEFAULT_START_WEEKDAY
            }
            None => DEFAULT_START_WEEKDAY,
        }
    }

    /// The weekday of January 1 of the effective year
    pub fn start_weekday(&self) -> Weekday {
        match self.calendar_year {
            Some(y) => january_first(y),
            None => self.requested_start_weekday(),
        }
    }

    /// Whether the effective year is a leap year
    pub fn is_leap_year(&self) -> bool {
        match self.calendar_year {
            Some(y) => date_math::is_leap_year(y),
            None => self.leap_year.unwrap_or(DEFAULT_LEAP_YEAR),
        }
    }

    /// The year in which dates are resolved: the calendar year, if
    /// set, or the assumed year otherwise.
    pub fn effective_year(&self) -> Result<i32, CalendarError> {
        if let Some(y) = self.calendar_year {
            return Ok(y);
        }
        let year = find_assumed_year(
            self.requested_start_weekday(),
            self.is_leap_year(),
            ASSUMED_YEAR_SEARCH_WINDOW,
        )?;
        debug!("Assuming year {}", year);
        Ok(year)
    }

    /// Sets an explicit calendar year. The start weekday and leap-year
    /// status are cleared, as they now come from the year.
    pub fn set_calendar_year(&mut self, year: i32) -> Result<(), CalendarError> {
        if !CALENDAR_YEAR_RANGE.contains(&year) {
            return Err(CalendarError::InvalidValue {
                field: "calendar year",
                value: year as i64,
                expected: "a four-digit year",
            });
        }
        let was = self.is_leap_year();
        self.calendar_year = Some(year);
        self.start_weekday = None;
        self.leap_year = None;
        self.cascade.on_leap_year_transition(was, self.is_leap_year());
        Ok(())
    }

    /// Removes the explicit calendar year, going back to an assumed
    /// year with default weekday and leap-year status.
    pub fn reset_calendar_year(&mut self) {
        let was = self.is_leap_year();
        self.calendar_year = None;
        self.cascade.on_leap_year_transition(was, self.is_leap_year());
    }

    fn check_no_calendar_year(&self, operation: &'static str) -> Result<(), CalendarError> {
        if self.calendar_year.is_some() {
            return Err(CalendarError::InvalidOperation {
                operation,
                reason: "it is derived from the calendar year",
            });
        }
        Ok(())
    }

    /// Requests the weekday on which the assumed year starts. Fails
    /// while a calendar year is set.
    pub fn set_start_weekday<W: Into<StartWeekday>>(
        &mut self,
        start_weekday: W,
    ) -> Result<(), CalendarError> {
        self.check_no_calendar_year("set the start weekday")?;
        self.start_weekday = Some(start_weekday.into());
        Ok(())
    }

    /// Goes back to the default start weekday. Does nothing while a
    /// calendar year is set.
    pub fn reset_start_weekday(&mut self) {
        self.start_weekday = None;
    }

    /// Requests the leap-year status of the assumed year. Fails
    /// while a calendar year is set.
    pub fn set_leap_year(&mut self, leap_year: bool) -> Result<(), CalendarError> {
        self.check_no_calendar_year("set the leap year")?;
        let was = self.is_leap_year();
        self.leap_year = Some(leap_year);
        self.cascade.on_leap_year_transition(was, leap_year);
        Ok(())
    }

    /// Goes back to the default leap-year status. Does nothing while
    /// a calendar year is set.
    pub fn reset_leap_year(&mut self) {
        if self.calendar_year.is_some() {
            return;
        }
        let was = self.is_leap_year();
        self.leap_year = None;
        self.cascade.on_leap_year_transition(was, self.is_leap_year());
    }

    /// Registers an object to be told when the leap day disappears.
    pub fn register_dependent<T: LeapDayDependent + 'static>(&mut self, dependent: &Rc<RefCell<T>>) {
        self.cascade.register(dependent)
    }

    /// Stops telling an object about the leap day.
    pub fn unregister_dependent<T: LeapDayDependent + 'static>(
        &mut self,
        dependent: &Rc<RefCell<T>>,
    ) {
        self.cascade.unregister(dependent)
    }

    /// The registered dependents
    pub fn cascade(&self) -> &LeapCascade {
        &self.cascade
    }

    /// Resolves a rule in the effective year
    pub fn make_date(&self, rule: &DateRule) -> Result<ResolvedDate, CalendarError> {
        resolver::resolve(rule, self)
    }

    /// Places a month and a day in the effective year
    pub fn make_date_from_month_day(&self, month: u8, day: u8) -> Result<ResolvedDate, CalendarError> {
        ResolvedDate::new(self.effective_year()?, month, day)
    }

    /// Finds the date of a day of the year (1 is January 1) in the
    /// effective year
    pub fn make_date_from_day_of_year(&self, day_of_year: u16) -> Result<ResolvedDate, CalendarError> {
        ResolvedDate::from_day_of_year(self.effective_year()?, day_of_year)
    }
}

/// How a [`YearContext`] is written in model files. Only one of
/// `calendar_year` and the pair `start_weekday`/`leap_year` can be given.
#[cfg(feature = "serde")]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct YearDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    calendar_year: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_weekday: Option<StartWeekday>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    leap_year: Option<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<YearDescription> for YearContext {
    type Error = CalendarError;

    fn try_from(item: YearDescription) -> Result<Self, Self::Error> {
        let mut ret = YearContext::new();
        if let Some(y) = item.calendar_year {
            if item.start_weekday.is_some() || item.leap_year.is_some() {
                return Err(CalendarError::InvalidOperation {
                    operation: "set the start weekday or leap year",
                    reason: "a calendar year is also given",
                });
            }
            ret.set_calendar_year(y)?;
        }
        if let Some(w) = item.start_weekday {
            ret.set_start_weekday(w)?;
        }
        if let Some(b) = item.leap_year {
            ret.set_leap_year(b)?;
        }
        Ok(ret)
    }
}

#[cfg(feature = "serde")]
impl From<YearContext> for YearDescription {
    fn from(item: YearContext) -> Self {
        Self {
            calendar_year: item.calendar_year,
            start_weekday: item.start_weekday,
            leap_year: item.leap_year,
        }
    }
}
