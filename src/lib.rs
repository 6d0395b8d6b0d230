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

//! The main `simcal` crate, putting the [`calendar`] and the [`model`]
//! together.
//!
//! It answers the questions the rest of a simulation asks about the
//! dates of a model (see [`collaborator`]) and provides the
//! command-line program.
//!
//! ```
//! use simcal::collaborator::{translate, weekday_name};
//! use simcal::Model;
//!
//! let model = Model::from_json(r#"{
//!     "year_description": { "calendar_year": 2009 },
//!     "daylight_saving": { "start": "2nd Sunday in March", "end": "1st Sunday in November" }
//! }"#).unwrap();
//!
//! assert_eq!(weekday_name("3/1", model.year_description()).unwrap(), "Sunday");
//!
//! let translated = translate(&model).unwrap();
//! assert_eq!(translated.year, 2009);
//! assert_eq!(translated.start_weekday, "Thursday");
//! let dst = translated.daylight_saving.unwrap();
//! assert_eq!(dst.start.date, "2009-03-08");
//! assert_eq!(dst.end.date, "2009-11-01");
//! ```

/// What the rest of the simulation gets to know about dates
pub mod collaborator;

/// The command-line options and what they do
pub mod cli;

/// Initialization of the logs
pub mod logging;

// Re-exports
pub use calendar;
pub use calendar::{
    resolve, CalendarError, DateRule, MonthDay, ResolvedDate, RunPeriodRange, StartWeekday,
    Weekday, YearContext,
};
pub use model;
pub use model::{
    error_msgs, DaylightSavingPeriod, DesignDay, Model, RunPeriod, ScheduleRule, SpecialDay,
    SpecialDayCategory,
};
