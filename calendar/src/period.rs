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
use crate::error::CalendarError;
use crate::{MonthDay, ResolvedDate, YearContext};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Computes the years spanned by a simulation that goes from `begin`
/// to `end`, repeated `repeat_count` times.
///
/// Both ends are placed in the effective year of `ctx`. If `end` comes
/// before `begin` (the period goes through new year), the last year is
/// `begin_year + repeat_count`; otherwise it is
/// `begin_year + repeat_count - 1`.
///
/// ```
/// use calendar::{compute_run_period, MonthDay, YearContext};
///
/// let ctx = YearContext::with_calendar_year(2009).unwrap();
/// let jan1 = MonthDay::new(1, 1).unwrap();
/// let dec31 = MonthDay::new(12, 31).unwrap();
/// assert_eq!(compute_run_period(jan1, dec31, 1, &ctx).unwrap(), (2009, 2009));
/// assert_eq!(compute_run_period(jan1, dec31, 3, &ctx).unwrap(), (2009, 2011));
///
/// let apr1 = MonthDay::new(4, 1).unwrap();
/// let mar31 = MonthDay::new(3, 31).unwrap();
/// assert_eq!(compute_run_period(apr1, mar31, 1, &ctx).unwrap(), (2009, 2010));
/// ```
pub fn compute_run_period(
    begin: MonthDay,
    end: MonthDay,
    repeat_count: u32,
    ctx: &YearContext,
) -> Result<(i32, i32), CalendarError> {
    RunPeriodRange::new(begin, end, repeat_count)?.compute(ctx)
}

/// The begin and end of a run period, independent of the year.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunPeriodRange {
    /// First day of the period
    begin: MonthDay,

    /// Last day of the period
    end: MonthDay,

    /// How many times the period is simulated
    repeat_count: u32,
}

impl RunPeriodRange {
    /// Creates a new range. `repeat_count` needs to be at least 1.
    pub fn new(begin: MonthDay, end: MonthDay, repeat_count: u32) -> Result<Self, CalendarError> {
        if repeat_count == 0 {
            return Err(CalendarError::InvalidValue {
                field: "repeat count",
                value: 0,
                expected: "at least 1",
            });
        }
        Ok(Self {
            begin,
            end,
            repeat_count,
        })
    }

    /// First day of the period
    pub fn begin(&self) -> MonthDay {
        self.begin
    }

    /// Last day of the period
    pub fn end(&self) -> MonthDay {
        self.end
    }

    /// How many times the period is simulated
    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    /// If the begin is later than the end, then it is a period
    /// that goes through new years.
    pub fn goes_through_new_year(&self) -> bool {
        self.end < self.begin
    }

    /// Checks if a date (year-agnostic) is contained
    ///
    /// ```
    /// use calendar::{MonthDay, RunPeriodRange};
    ///
    /// let period = RunPeriodRange::new(
    ///     MonthDay::new(1, 2).unwrap(),
    ///     MonthDay::new(1, 3).unwrap(),
    ///     1,
    /// ).unwrap();
    /// assert!(period.contains(MonthDay::new(1, 2).unwrap()));
    /// assert!(!period.contains(MonthDay::new(1, 4).unwrap()));
    ///
    /// // What about a period that loops through the end of the year?
    /// let period = RunPeriodRange::new(
    ///     MonthDay::new(12, 2).unwrap(),
    ///     MonthDay::new(1, 3).unwrap(),
    ///     1,
    /// ).unwrap();
    /// assert!(period.contains(MonthDay::new(12, 5).unwrap()));
    /// assert!(period.contains(MonthDay::new(1, 1).unwrap()));
    /// assert!(!period.contains(MonthDay::new(6, 1).unwrap()));
    /// ```
    pub fn contains(&self, date: MonthDay) -> bool {
        if !self.goes_through_new_year() {
            // (jan 1) ---- Begin --------X------- End ---- (dec 31)
            self.begin <= date && date <= self.end
        } else {
            // (jan 1) -X-- End ----------------- Begin --X- (dec 31)
            date <= self.end || date >= self.begin
        }
    }

    /// The first and last year of the simulation.
    ///
    /// Both ends are resolved in the effective year of `ctx`, so this
    /// fails if either is February 29 and that year is not a leap year.
    /// It also fails if the last year does not fit in an `i32`.
    pub fn compute(&self, ctx: &YearContext) -> Result<(i32, i32), CalendarError> {
        let year = ctx.effective_year()?;
        let begin = self.begin.in_year(year)?;
        let end = self.end.in_year(year)?;
        let extra_years = if end < begin {
            self.repeat_count
        } else {
            self.repeat_count - 1
        };
        let end_year = i32::try_from(extra_years)
            .ok()
            .and_then(|n| year.checked_add(n))
            .ok_or(CalendarError::InvalidValue {
                field: "repeat count",
                value: i64::from(self.repeat_count),
                expected: "a number of years that keeps the last year within i32",
            })?;
        Ok((year, end_year))
    }

    /// Iterates over every day of the simulation, from the begin date
    /// in the first year to the end date in the last year.
    pub fn days(&self, ctx: &YearContext) -> Result<RunPeriodDays, CalendarError> {
        let (first, last) = self.bounds(ctx)?;
        Ok(RunPeriodDays {
            current: Some(first),
            last,
        })
    }

    /// The first day of the first year and the last day of the last year.
    ///
    /// An end on February 29 becomes February 28 if the last year is not
    /// a leap year.
    pub fn bounds(&self, ctx: &YearContext) -> Result<(ResolvedDate, ResolvedDate), CalendarError> {
        let (begin_year, end_year) = self.compute(ctx)?;
        let first = self.begin.in_year(begin_year)?;
        let last = self
            .end
            .in_year(end_year)
            .or_else(|_| self.end.without_leap_day().in_year(end_year))?;
        Ok((first, last))
    }
}

/// An iterator over the days of a [`RunPeriodRange`]
#[derive(Clone, Debug)]
pub struct RunPeriodDays {
    current: Option<ResolvedDate>,
    last: ResolvedDate,
}

impl Iterator for RunPeriodDays {
    type Item = ResolvedDate;

    fn next(&mut self) -> Option<Self::Item> {
        let old = self.current?;
        self.current = if old < self.last {
            Some(old.next_day())
        } else {
            None
        };
        Some(old)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = match self.current {
            Some(c) => (self.last.days_since(&c) + 1).max(0) as usize,
            None => 0,
        };
        (n, Some(n))
    }
}

impl ExactSizeIterator for RunPeriodDays {}
