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

use crate::Weekday;

/// The error type of every fallible operation in this crate.
///
/// Parsing and range failures are meant to be shown to whoever typed
/// the input (see [`CalendarError::is_user_input_error`]), while the
/// rest point at a configuration or programming mistake.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// The text does not match any of the date-rule forms.
    #[error("could not parse a date rule from '{text}'")]
    Format {
        /// The original text, as given.
        text: String,
    },

    /// The month and day do not exist in any year (e.g., 4/31 or 13/1).
    #[error("invalid date: month {month}, day {day}")]
    InvalidMonthDay {
        /// The month, counted from 1
        month: u8,
        /// The day of the month, counted from 1
        day: u8,
    },

    /// The month and day exist, but not in this particular year (i.e., Feb 29).
    #[error("day {day} of month {month} does not exist in year {year}")]
    DateRange {
        /// The year in which the date was checked
        year: i32,
        /// The month, counted from 1
        month: u8,
        /// The day of the month, counted from 1
        day: u8,
    },

    /// The day of the year is zero or exceeds the number of days in the year.
    #[error("day of year {day_of_year} is out of range for year {year}")]
    DayOfYearRange {
        /// The year in which the day was checked
        year: i32,
        /// The offending day of the year
        day_of_year: u16,
    },

    /// No year within the search window starts on the requested weekday
    /// with the requested leap-year status.
    #[error("no year between {first} and {last} starts on a {start_weekday} with leap_year = {leap_year}")]
    YearSearchExhausted {
        /// The requested weekday of January 1
        start_weekday: Weekday,
        /// The requested leap-year status
        leap_year: bool,
        /// First year of the search window
        first: i32,
        /// Last year of the search window
        last: i32,
    },

    /// The operation is not allowed in the current state.
    #[error("cannot {operation}: {reason}")]
    InvalidOperation {
        /// What was attempted
        operation: &'static str,
        /// Why it was refused
        reason: &'static str,
    },

    /// A numeric parameter is outside of its domain.
    #[error("invalid {field}: {value} (expected {expected})")]
    InvalidValue {
        /// The name of the parameter
        field: &'static str,
        /// The value that was given
        value: i64,
        /// A description of the accepted values
        expected: &'static str,
    },
}

impl CalendarError {
    /// Returns `true` for errors caused by rejected user input (i.e.,
    /// text that does not parse, or dates that do not exist). The
    /// previous valid state should be kept and the message shown.
    pub fn is_user_input_error(&self) -> bool {
        matches!(
            self,
            Self::Format { .. }
                | Self::InvalidMonthDay { .. }
                | Self::DateRange { .. }
                | Self::DayOfYearRange { .. }
        )
    }
}
