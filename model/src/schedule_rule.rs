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
use calendar::{CalendarError, LeapDayDependent, MonthDay, RunPeriodRange};
use serde::{Deserialize, Serialize};

/// The part of the year during which a schedule applies.
///
/// The window can go through new year (e.g., from December 1 to
/// February 28).
///
/// ## Examples
///
/// ```json
/// {
///     "name": "Summer",
///     "start": "6/1",
///     "end": "8/31"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleRule {
    /// The name of the ScheduleRule
    name: String,

    /// The first day the rule applies
    start: MonthDay,

    /// The last day the rule applies
    end: MonthDay,
}

impl ScheduleRule {
    /// Creates a new ScheduleRule
    pub fn new<S: Into<String>>(name: S, start: MonthDay, end: MonthDay) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    /// The name of the ScheduleRule
    pub fn name(&self) -> &String {
        &self.name
    }

    /// The first day the rule applies
    pub fn start(&self) -> MonthDay {
        self.start
    }

    /// The last day the rule applies
    pub fn end(&self) -> MonthDay {
        self.end
    }

    /// Sets the first day the rule applies
    pub fn set_start(&mut self, start: MonthDay) -> &mut Self {
        self.start = start;
        self
    }

    /// Sets the last day the rule applies
    pub fn set_end(&mut self, end: MonthDay) -> &mut Self {
        self.end = end;
        self
    }

    fn window(&self) -> Result<RunPeriodRange, CalendarError> {
        RunPeriodRange::new(self.start, self.end, 1)
    }

    /// Checks whether the rule applies on a certain day
    ///
    /// ```
    /// use calendar::MonthDay;
    /// use model::ScheduleRule;
    ///
    /// let winter = ScheduleRule::new(
    ///     "Winter",
    ///     MonthDay::new(12, 1).unwrap(),
    ///     MonthDay::new(2, 28).unwrap(),
    /// );
    /// assert!(winter.applies_to(MonthDay::new(1, 15).unwrap()));
    /// assert!(!winter.applies_to(MonthDay::new(7, 15).unwrap()));
    /// ```
    pub fn applies_to(&self, date: MonthDay) -> bool {
        self.window().map(|w| w.contains(date)).unwrap_or(false)
    }
}

impl Named for ScheduleRule {
    fn name(&self) -> &String {
        &self.name
    }
}

impl DateBearing for ScheduleRule {
    fn label(&self) -> String {
        format!("ScheduleRule '{}'", self.name)
    }

    fn references_leap_day(&self) -> bool {
        self.start.is_leap_day() || self.end.is_leap_day()
    }
}

impl LeapDayDependent for ScheduleRule {
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
