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
use crate::model::{DateBearing, Named};
use crate::print_warning;
use calendar::{
    CalendarError, LeapDayDependent, MonthDay, ResolvedDate, RunPeriodDays, RunPeriodRange,
    YearContext,
};
use serde::{Deserialize, Serialize};

fn default_repeat_count() -> u32 {
    1
}

/// The dates to simulate.
///
/// ## Examples
///
/// ```json
/// {
///     "name": "Heating season",
///     "begin": "10/1",
///     "end": "4/30",
///     "repeat_count": 1
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunPeriod {
    /// The name of the RunPeriod
    name: String,

    /// The first day of the simulation
    begin: MonthDay,

    /// The last day of the simulation
    end: MonthDay,

    /// The number of times the period is simulated, one after the
    /// other. Defaults to 1.
    #[serde(default = "default_repeat_count")]
    repeat_count: u32,
}

impl RunPeriod {
    /// Creates a RunPeriod that is simulated once
    pub fn new<S: Into<String>>(name: S, begin: MonthDay, end: MonthDay) -> Self {
        Self {
            name: name.into(),
            begin,
            end,
            repeat_count: 1,
        }
    }

    /// The name of the RunPeriod
    pub fn name(&self) -> &String {
        &self.name
    }

    /// The first day of the simulation
    pub fn begin(&self) -> MonthDay {
        self.begin
    }

    /// The last day of the simulation
    pub fn end(&self) -> MonthDay {
        self.end
    }

    /// The number of times the period is simulated
    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    /// Sets the first day of the simulation
    pub fn set_begin(&mut self, begin: MonthDay) -> &mut Self {
        self.begin = begin;
        self
    }

    /// Sets the last day of the simulation
    pub fn set_end(&mut self, end: MonthDay) -> &mut Self {
        self.end = end;
        self
    }

    /// Sets the number of repetitions, which needs to be at least 1
    pub fn set_repeat_count(&mut self, repeat_count: u32) -> Result<&mut Self, CalendarError> {
        RunPeriodRange::new(self.begin, self.end, repeat_count)?;
        self.repeat_count = repeat_count;
        Ok(self)
    }

    /// The year-agnostic range
    pub fn range(&self) -> Result<RunPeriodRange, CalendarError> {
        RunPeriodRange::new(self.begin, self.end, self.repeat_count)
    }

    /// The first and last year of the simulation
    pub fn years(&self, ctx: &YearContext) -> Result<(i32, i32), CalendarError> {
        self.range()?.compute(ctx)
    }

    /// Every day of the simulation
    pub fn days(&self, ctx: &YearContext) -> Result<RunPeriodDays, CalendarError> {
        self.range()?.days(ctx)
    }

    /// The first and last day of the simulation
    pub fn bounds(&self, ctx: &YearContext) -> Result<(ResolvedDate, ResolvedDate), CalendarError> {
        self.range()?.bounds(ctx)
    }
}

impl Named for RunPeriod {
    fn name(&self) -> &String {
        &self.name
    }
}

impl DateBearing for RunPeriod {
    fn label(&self) -> String {
        format!("RunPeriod '{}'", self.name)
    }

    fn references_leap_day(&self) -> bool {
        self.begin.is_leap_day() || self.end.is_leap_day()
    }

    fn check(&self) -> Result<(), CalendarError> {
        self.range().map(|_| ())
    }
}

impl LeapDayDependent for RunPeriod {
    fn ensure_no_leap_day(&mut self) {
        if self.references_leap_day() {
            print_warning(
                self.label(),
                "February 29 no longer exists; moving it to February 28",
            );
            self.begin = self.begin.without_leap_day();
            self.end = self.end.without_leap_day();
        }
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    fn md(month: u8, day: u8) -> MonthDay {
        MonthDay::new(month, day).unwrap()
    }

    #[test]
    fn serde() -> Result<(), String> {
        let mut hardcoded_ref = RunPeriod::new("Heating season", md(10, 1), md(4, 30));
        hardcoded_ref.set_repeat_count(2).map_err(|e| e.to_string())?;

        let from_hardcoded_json: RunPeriod = json5::from_str(
            "{
            name: 'Heating season',
            begin: 'October 1',
            end: '4/30',
            repeat_count: 2,
        }",
        )
        .map_err(|e| e.to_string())?;
        assert_eq!(hardcoded_ref, from_hardcoded_json);

        let rust_json = serde_json::to_string(&hardcoded_ref).map_err(|e| e.to_string())?;
        assert_eq!(
            rust_json,
            r#"{"name":"Heating season","begin":"10/1","end":"4/30","repeat_count":2}"#
        );

        // repeat_count defaults to 1
        let p: RunPeriod =
            serde_json::from_str(r#"{"name": "Annual", "begin": "1/1", "end": "12/31"}"#)
                .map_err(|e| e.to_string())?;
        assert_eq!(p.repeat_count(), 1);

        // Weekday rules are not month-days
        assert!(serde_json::from_str::<RunPeriod>(
            r#"{"name": "Annual", "begin": "1st Monday in January", "end": "12/31"}"#
        )
        .is_err());
        Ok(())
    }

    #[test]
    fn test_years() {
        let ctx = YearContext::with_calendar_year(2009).unwrap();
        let p = RunPeriod::new("Heating season", md(10, 1), md(4, 30));
        assert!(p.range().unwrap().goes_through_new_year());
        assert_eq!(p.years(&ctx).unwrap(), (2009, 2010));
        assert_eq!(p.days(&ctx).unwrap().len(), 92 + 120);

        let mut p = RunPeriod::new("Annual", md(1, 1), md(12, 31));
        assert_eq!(p.years(&ctx).unwrap(), (2009, 2009));
        p.set_repeat_count(3).unwrap();
        assert_eq!(p.years(&ctx).unwrap(), (2009, 2011));

        assert!(p.set_repeat_count(0).is_err());
        assert_eq!(p.repeat_count(), 3);
    }

    #[test]
    fn test_ensure_no_leap_day() {
        let mut p = RunPeriod::new("Leap", md(2, 29), md(3, 31));
        p.ensure_no_leap_day();
        assert_eq!(p.begin(), md(2, 28));
        assert_eq!(p.end(), md(3, 31));

        let mut p = RunPeriod::new("Annual", md(1, 1), md(12, 31));
        p.ensure_no_leap_day();
        assert_eq!(p, RunPeriod::new("Annual", md(1, 1), md(12, 31)));
    }
}
