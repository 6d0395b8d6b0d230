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

#![deny(missing_docs)]

//! This crate contains the data structure utilized for describing
//! the dates of a `SIMPLE` model: which year is simulated, which days
//! are simulated, when daylight saving happens and which days are special.
//!
//! Every date in the model is written as a rule (e.g., `"3/1"` or
//! `"Last Sunday in October"`) and only becomes an actual date once
//! the year of the model is known. The year is held by the [`Model`]
//! (see [`calendar::YearContext`]).
//!
//! # Example
//!
//! ```
//! use model::Model;
//!
//! let mut model = Model::from_json5("{
//!     year_description: { calendar_year: 2008 },
//!     daylight_saving: { start: '2nd Sunday in March', end: '1st Sunday in November' },
//! }").unwrap();
//!
//! let dst = model.daylight_saving().unwrap();
//! let (start, end) = dst.borrow().resolve(model.year_description()).unwrap();
//! assert_eq!(start.to_string(), "2008-03-09");
//! assert_eq!(end.to_string(), "2008-11-02");
//!
//! // Moving to another year moves the dates
//! model.set_calendar_year(2009).unwrap();
//! let (start, _end) = dst.borrow().resolve(model.year_description()).unwrap();
//! assert_eq!(start.to_string(), "2009-03-08");
//! ```

/// Functions for reporting warnings and errors
pub mod error_msgs;
pub use error_msgs::{print_error, print_warning};

/// The model itself
mod model;
pub use crate::model::Model;

/// The dates to simulate
mod run_period;
pub use run_period::RunPeriod;

/// The period during which clocks are moved forward
mod daylight_saving;
pub use daylight_saving::DaylightSavingPeriod;

/// Holidays and other exceptions to the calendar
mod special_day;
pub use special_day::{SpecialDay, SpecialDayCategory, MAX_SPECIAL_DAY_DURATION};

/// Days for sizing heating and cooling systems
mod design_day;
pub use design_day::DesignDay;

/// The part of the year in which a schedule applies
mod schedule_rule;
pub use schedule_rule::ScheduleRule;
