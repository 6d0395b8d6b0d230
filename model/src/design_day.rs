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
use calendar::{CalendarError, LeapDayDependent, MonthDay, ResolvedDate, YearContext};
use serde::{Deserialize, Serialize};

/// A day used for sizing heating and cooling systems
///
/// ## Examples
///
/// ```json
/// {
///     "name": "Winter 99.6%",
///     "month": 1,
///     "day": 21
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesignDay {
    /// The name of the DesignDay
    name: String,

    /// The month, from 1 to 12
    month: u8,

    /// The day of the month
    day: u8,
}

impl DesignDay {
    /// Creates a new DesignDay, checking that the day exists
    pub fn new<S: Into<String>>(name: S, month: u8, day: u8) -> Result<Self, CalendarError> {
        MonthDay::new(month, day)?;
        Ok(Self {
            name: name.into(),
            month,
            day,
        })
    }

    /// The name of the DesignDay
    pub fn name(&self) -> &String {
        &self.name
    }

    /// The month, from 1 to 12
    pub fn month(&self) -> u8 {
        self.month
    }

    /// The day of the month
    pub fn day(&self) -> u8 {
        self.day
    }

    /// The month and the day, which are checked when the DesignDay is
    /// added to a model
    pub fn month_day(&self) -> Result<MonthDay, CalendarError> {
        MonthDay::new(self.month, self.day)
    }

    /// Sets the month and the day
    pub fn set_month_day(&mut self, month_day: MonthDay) -> &mut Self {
        self.month = month_day.month();
        self.day = month_day.day();
        self
    }

    /// The date in the effective year of `ctx`
    pub fn date(&self, ctx: &YearContext) -> Result<ResolvedDate, CalendarError> {
        ctx.make_date_from_month_day(self.month, self.day)
    }
}

impl Named for DesignDay {
    fn name(&self) -> &String {
        &self.name
    }
}

impl DateBearing for DesignDay {
    fn label(&self) -> String {
        format!("DesignDay '{}'", self.name)
    }

    fn references_leap_day(&self) -> bool {
        self.month == 2 && self.day == 29
    }

    fn check(&self) -> Result<(), CalendarError> {
        self.month_day().map(|_| ())
    }
}

impl LeapDayDependent for DesignDay {
    fn ensure_no_leap_day(&mut self) {
        if self.references_leap_day() {
            print_warning(
                self.label(),
                "February 29 no longer exists; moving it to February 28",
            );
            self.day = 28;
        }
    }
}
