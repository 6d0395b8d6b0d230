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

use calendar::{
    compute_run_period, resolve, CalendarError, DateRule, MonthDay, ResolvedDate, YearContext,
};
use model::Model;
use serde::Serialize;
use tracing::debug;

fn month_day(text: &str) -> Result<MonthDay, CalendarError> {
    DateRule::parse(text)?
        .as_month_day()
        .ok_or_else(|| CalendarError::Format {
            text: text.to_string(),
        })
}

/// The (capitalized, English) name of the weekday on which a rule
/// written as text falls, in the year of `ctx`
///
/// ```
/// use calendar::YearContext;
/// use simcal::collaborator::weekday_name;
///
/// let ctx = YearContext::with_calendar_year(2008).unwrap();
/// assert_eq!(weekday_name("1/1", &ctx).unwrap(), "Tuesday");
/// assert_eq!(weekday_name("2nd Sunday in March", &ctx).unwrap(), "Sunday");
/// assert!(weekday_name("someday", &ctx).is_err());
/// ```
pub fn weekday_name(text: &str, ctx: &YearContext) -> Result<&'static str, CalendarError> {
    rule_weekday_name(&DateRule::parse(text)?, ctx)
}

/// The (capitalized, English) name of the weekday on which a rule
/// falls, in the year of `ctx`
pub fn rule_weekday_name(rule: &DateRule, ctx: &YearContext) -> Result<&'static str, CalendarError> {
    Ok(resolve(rule, ctx)?.weekday.name())
}

/// The first and last year of a run period whose ends are written
/// as text (e.g., `"4/1"` and `"March 31"`)
///
/// ```
/// use calendar::YearContext;
/// use simcal::collaborator::run_period_years;
///
/// let ctx = YearContext::with_calendar_year(2009).unwrap();
/// assert_eq!(run_period_years("4/1", "3/31", 1, &ctx).unwrap(), (2009, 2010));
/// assert_eq!(run_period_years("Jan 1", "Dec 31", 1, &ctx).unwrap(), (2009, 2009));
/// ```
pub fn run_period_years(
    begin_text: &str,
    end_text: &str,
    repeat_count: u32,
    ctx: &YearContext,
) -> Result<(i32, i32), CalendarError> {
    let begin = month_day(begin_text)?;
    let end = month_day(end_text)?;
    compute_run_period(begin, end, repeat_count, ctx)
}

/// A date, as handed to the rest of the simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatedDate {
    /// The date, as `YYYY-MM-DD`
    pub date: String,
    /// The name of the weekday
    pub weekday: &'static str,
}

impl From<ResolvedDate> for TranslatedDate {
    fn from(item: ResolvedDate) -> Self {
        Self {
            date: item.to_string(),
            weekday: item.weekday.name(),
        }
    }
}

/// The run period, as handed to the rest of the simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatedRunPeriod {
    /// The name of the run period
    pub name: String,
    /// The first year simulated
    pub begin_year: i32,
    /// The last year simulated
    pub end_year: i32,
    /// The first day simulated
    pub begin: TranslatedDate,
    /// The last day simulated
    pub end: TranslatedDate,
    /// The number of times the period is simulated
    pub repeat_count: u32,
}

/// The daylight saving period, as handed to the rest of the simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatedDaylightSaving {
    /// The first day of daylight saving
    pub start: TranslatedDate,
    /// The last day of daylight saving
    pub end: TranslatedDate,
}

/// A special day, as handed to the rest of the simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatedSpecialDay {
    /// The name of the special day
    pub name: String,
    /// The kind of day
    pub category: &'static str,
    /// The first day
    pub start: TranslatedDate,
    /// How many days it lasts
    pub duration: u16,
}

/// A design day, as handed to the rest of the simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatedDesignDay {
    /// The name of the design day
    pub name: String,
    /// The day
    pub date: TranslatedDate,
}

/// Every date in a model, resolved in the year of the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatedCalendar {
    /// The year in which dates are resolved
    pub year: i32,
    /// Whether `year` was set explicitly (as opposed to assumed)
    pub explicit_year: bool,
    /// The name of the weekday of January 1
    pub start_weekday: &'static str,
    /// Whether `year` is a leap year
    pub leap_year: bool,
    /// The run period, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_period: Option<TranslatedRunPeriod>,
    /// The daylight saving period, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daylight_saving: Option<TranslatedDaylightSaving>,
    /// The special days
    pub special_days: Vec<TranslatedSpecialDay>,
    /// The design days
    pub design_days: Vec<TranslatedDesignDay>,
}

/// Resolves every date in a model. Fails if anything cannot be resolved.
pub fn translate(model: &Model) -> Result<TranslatedCalendar, CalendarError> {
    let ctx = model.year_description();
    let year = ctx.effective_year()?;

    let run_period = match model.run_period() {
        Some(rp) => {
            let rp = rp.borrow();
            let (begin_year, end_year) = rp.years(ctx)?;
            let (begin, end) = rp.bounds(ctx)?;
            Some(TranslatedRunPeriod {
                name: rp.name().clone(),
                begin_year,
                end_year,
                begin: begin.into(),
                end: end.into(),
                repeat_count: rp.repeat_count(),
            })
        }
        None => None,
    };

    let daylight_saving = match model.daylight_saving() {
        Some(dst) => {
            let (start, end) = dst.borrow().resolve(ctx)?;
            Some(TranslatedDaylightSaving {
                start: start.into(),
                end: end.into(),
            })
        }
        None => None,
    };

    let special_days = model
        .special_days()
        .iter()
        .map(|sd| {
            let sd = sd.borrow();
            Ok(TranslatedSpecialDay {
                name: sd.name().clone(),
                category: sd.category().token(),
                start: sd.resolve(ctx)?.into(),
                duration: sd.duration(),
            })
        })
        .collect::<Result<Vec<_>, CalendarError>>()?;

    let design_days = model
        .design_days()
        .iter()
        .map(|dd| {
            let dd = dd.borrow();
            Ok(TranslatedDesignDay {
                name: dd.name().clone(),
                date: dd.date(ctx)?.into(),
            })
        })
        .collect::<Result<Vec<_>, CalendarError>>()?;

    debug!(
        "Translated calendar of year {} with {} special days",
        year,
        special_days.len()
    );
    Ok(TranslatedCalendar {
        year,
        explicit_year: ctx.calendar_year().is_some(),
        start_weekday: ctx.start_weekday().name(),
        leap_year: ctx.is_leap_year(),
        run_period,
        daylight_saving,
        special_days,
        design_days,
    })
}
