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
use crate::model::DateBearing;
use crate::print_warning;
use calendar::{resolve, CalendarError, DateRule, LeapDayDependent, ResolvedDate, YearContext};
use serde::{Deserialize, Serialize};

/// The period during which clocks are moved forward.
///
/// ## Examples
///
/// ```json
/// {
///     "start": "2nd Sunday in March",
///     "end": "1st Sunday in November"
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DaylightSavingPeriod {
    /// The day on which daylight saving starts
    start: DateRule,

    /// The day on which daylight saving ends
    end: DateRule,
}

impl DaylightSavingPeriod {
    /// Creates a new period
    pub fn new(start: DateRule, end: DateRule) -> Self {
        Self { start, end }
    }

    /// The day on which daylight saving starts
    pub fn start(&self) -> DateRule {
        self.start
    }

    /// The day on which daylight saving ends
    pub fn end(&self) -> DateRule {
        self.end
    }

    /// Sets the day on which daylight saving starts
    pub fn set_start(&mut self, start: DateRule) -> &mut Self {
        self.start = start;
        self
    }

    /// Sets the day on which daylight saving ends
    pub fn set_end(&mut self, end: DateRule) -> &mut Self {
        self.end = end;
        self
    }

    /// The first and last days of daylight saving in the effective
    /// year of `ctx`
    pub fn resolve(&self, ctx: &YearContext) -> Result<(ResolvedDate, ResolvedDate), CalendarError> {
        Ok((resolve(&self.start, ctx)?, resolve(&self.end, ctx)?))
    }
}

impl DateBearing for DaylightSavingPeriod {
    fn label(&self) -> String {
        "DaylightSavingPeriod".to_string()
    }

    fn references_leap_day(&self) -> bool {
        self.start.is_leap_day() || self.end.is_leap_day()
    }
}

impl LeapDayDependent for DaylightSavingPeriod {
    fn ensure_no_leap_day(&mut self) {
        if self.references_leap_day() {
            print_warning(
                self.label(),
                "February 29 no longer exists; moving it to February 28",
            );
            self.start = self.start.without_leap_day();
            self.end = self.end.without_leap_day();
        }
    }
}
