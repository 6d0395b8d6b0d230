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

//! This is a library for deciding which dates the rules of a Building
//! Performance Simulation model fall on. Rules are written as text, like
//! `"3/1"` or `"2nd Sunday in March"`, and are turned into actual dates
//! once a year is known.
//!
//! The year comes from a [`YearContext`], which either holds an explicit
//! calendar year or assumes one (the first year that starts on a certain
//! weekday and has a certain leap-year status). Days and Months are
//! counted from 1 (e.g. January is 1, not 0).
//!
//! ```
//! use calendar::{resolve, DateRule, YearContext, Weekday};
//!
//! let mut ctx = YearContext::new();
//! let rule : DateRule = "Last Sunday in October".parse().unwrap();
//! assert_eq!(rule.to_string(), "Last Sunday in October");
//!
//! ctx.set_calendar_year(2008).unwrap();
//! let date = resolve(&rule, &ctx).unwrap();
//! assert_eq!(date.to_string(), "2008-10-26");
//! assert_eq!(date.weekday, Weekday::Sunday);
//! ```
//!
//! # Interaction with Serde
//!
//! You can enable the `serde` feature and do stuff like this:
//!
//! ```ignore
//! use calendar::DateRule;
//! use serde_json; // import "serde_json" and enable feature "serde"
//!
//! let v = r#"["3/1", "last sun in oct"]"#;
//! let rules : Vec<DateRule> = serde_json::from_str(&v).unwrap();
//! assert_eq!(serde_json::to_string(&rules).unwrap(), r#"["3/1","Last Sunday in October"]"#);
//! ```
//!
//! # Interaction with Chrono
//!
//! You can enable the `chrono` feature and do stuff like this
//!
//! ```ignore
//! use chrono::NaiveDate; // enable feature "chrono"
//! use calendar::ResolvedDate;
//!
//! let d : ResolvedDate = NaiveDate::from_ymd_opt(2014, 11, 28).unwrap().into();
//! assert_eq!(d.to_string(), "2014-11-28");
//! assert_eq!(d.into_naive_date(), NaiveDate::from_ymd_opt(2014, 11, 28));
//! ```

pub mod date_math;

mod error;
pub use crate::error::CalendarError;

mod weekday;
pub use crate::weekday::{Month, Weekday};

mod date;
pub use crate::date::{MonthDay, ResolvedDate};

mod date_rule;
pub use crate::date_rule::{DateRule, Ordinal};

mod leap_cascade;
pub use crate::leap_cascade::{LeapCascade, LeapDayDependent};

mod year_context;
pub use crate::year_context::{
    find_assumed_year, StartWeekday, YearContext, ASSUMED_YEAR_SEARCH_WINDOW,
    CALENDAR_YEAR_RANGE, DEFAULT_LEAP_YEAR, DEFAULT_START_WEEKDAY,
};

mod resolver;
pub use crate::resolver::{resolve, resolve_in_year};

mod period;
pub use crate::period::{compute_run_period, RunPeriodDays, RunPeriodRange};
