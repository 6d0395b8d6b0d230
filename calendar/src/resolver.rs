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

//! Turns [`DateRule`]s into concrete dates.

use crate::date_math;
use crate::error::CalendarError;
use crate::{DateRule, ResolvedDate, YearContext};

/// Resolves a rule in the effective year of `ctx`.
///
/// ```
/// use calendar::{resolve, DateRule, YearContext};
///
/// // The default assumed year starts on a Thursday, like 2009
/// let ctx = YearContext::new();
/// let rule: DateRule = "2nd Sunday in March".parse().unwrap();
/// assert_eq!(resolve(&rule, &ctx).unwrap().day, 8);
/// ```
pub fn resolve(rule: &DateRule, ctx: &YearContext) -> Result<ResolvedDate, CalendarError> {
    resolve_in_year(rule, ctx.effective_year()?)
}

/// Resolves a rule in a specific year.
///
/// Exact dates that do not exist in `year` (i.e., February 29 of a
/// non-leap year) are an error. Nth-weekday rules always resolve, as
/// a fifth occurrence that does not exist falls back to the last one.
pub fn resolve_in_year(rule: &DateRule, year: i32) -> Result<ResolvedDate, CalendarError> {
    match *rule {
        DateRule::ExactDate { month, day } => ResolvedDate::new(year, month, day),
        DateRule::NthWeekdayInMonth {
            ordinal,
            weekday,
            month,
        } => {
            let day = date_math::nth_weekday_of_month(year, month, weekday, ordinal.number())?;
            ResolvedDate::new(year, month, day)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Ordinal, Weekday};

    #[test]
    fn test_exact() {
        let rule = DateRule::exact(3, 1).unwrap();
        let d = resolve_in_year(&rule, 2009).unwrap();
        assert_eq!((d.year, d.month, d.day), (2009, 3, 1));
        assert_eq!(d.weekday, Weekday::Sunday);

        let leap = DateRule::exact(2, 29).unwrap();
        assert!(resolve_in_year(&leap, 2008).is_ok());
        assert_eq!(
            resolve_in_year(&leap, 2009),
            Err(CalendarError::DateRange {
                year: 2009,
                month: 2,
                day: 29
            })
        );
    }

    #[test]
    fn test_nth() {
        let rule = DateRule::nth(Ordinal::First, Weekday::Sunday, 11).unwrap();
        assert_eq!(resolve_in_year(&rule, 2009).unwrap().day, 1);

        let rule = DateRule::nth(Ordinal::Last, Weekday::Sunday, 10).unwrap();
        assert_eq!(resolve_in_year(&rule, 2009).unwrap().day, 25);

        let rule = DateRule::nth(Ordinal::Last, Weekday::Friday, 2).unwrap();
        let d = resolve_in_year(&rule, 2008).unwrap();
        assert_eq!((d.month, d.day), (2, 29));
        assert_eq!(d.weekday, Weekday::Friday);

        let rule = DateRule::nth(Ordinal::Last, Weekday::Monday, 2).unwrap();
        assert_eq!(resolve_in_year(&rule, 2008).unwrap().day, 25);
    }

    #[test]
    fn test_with_context() {
        let mut ctx = YearContext::new();
        let rule: DateRule = "Last Sunday in March".parse().unwrap();
        let d = resolve(&rule, &ctx).unwrap();
        assert_eq!((d.year, d.month, d.day), (1903, 3, 29));

        ctx.set_calendar_year(2008).unwrap();
        let d = resolve(&rule, &ctx).unwrap();
        assert_eq!((d.year, d.month, d.day), (2008, 3, 30));
    }
}
