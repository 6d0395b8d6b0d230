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
use calendar::{resolve, CalendarError, DateRule, LeapDayDependent, ResolvedDate, YearContext};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The longest a special day can last, in days
pub const MAX_SPECIAL_DAY_DURATION: u16 = 366;

fn default_duration() -> u16 {
    1
}

/// The kind of day a [`SpecialDay`] is treated as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpecialDayCategory {
    /// A public holiday
    #[default]
    Holiday,
    /// Treated as the summer design day
    SummerDesignDay,
    /// Treated as the winter design day
    WinterDesignDay,
    /// A user-defined kind of day
    CustomDay1,
    /// Another user-defined kind of day
    CustomDay2,
}

impl SpecialDayCategory {
    /// All the categories
    pub const ALL: [Self; 5] = [
        Self::Holiday,
        Self::SummerDesignDay,
        Self::WinterDesignDay,
        Self::CustomDay1,
        Self::CustomDay2,
    ];

    /// The token used for this category in model files
    pub fn token(&self) -> &'static str {
        match self {
            Self::Holiday => "Holiday",
            Self::SummerDesignDay => "SummerDesignDay",
            Self::WinterDesignDay => "WinterDesignDay",
            Self::CustomDay1 => "CustomDay1",
            Self::CustomDay2 => "CustomDay2",
        }
    }
}

impl fmt::Display for SpecialDayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for SpecialDayCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.token().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown special day category '{}'", s))
    }
}

/// A named exception to the regular calendar (e.g., a holiday), which
/// starts on a certain day and lasts a number of days.
///
/// ## Examples
///
/// ```json
/// {
///     "name": "Thanksgiving",
///     "start": "4th Thursday in November",
///     "duration": 2,
///     "category": "Holiday"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecialDay {
    /// The name of the SpecialDay
    name: String,

    /// The first day
    start: DateRule,

    /// The number of days it lasts, from 1 to 366. Defaults to 1.
    #[serde(default = "default_duration")]
    duration: u16,

    /// The kind of day. Defaults to `Holiday`.
    #[serde(default)]
    category: SpecialDayCategory,
}

impl SpecialDay {
    /// Creates a one-day holiday
    pub fn new<S: Into<String>>(name: S, start: DateRule) -> Self {
        Self {
            name: name.into(),
            start,
            duration: 1,
            category: SpecialDayCategory::Holiday,
        }
    }

    /// The name of the SpecialDay
    pub fn name(&self) -> &String {
        &self.name
    }

    /// The first day
    pub fn start(&self) -> DateRule {
        self.start
    }

    /// The number of days it lasts
    pub fn duration(&self) -> u16 {
        self.duration
    }

    /// The kind of day
    pub fn category(&self) -> SpecialDayCategory {
        self.category
    }

    /// Sets the first day
    pub fn set_start(&mut self, start: DateRule) -> &mut Self {
        self.start = start;
        self
    }

    /// Sets the number of days it lasts, from 1 to 366
    pub fn set_duration(&mut self, duration: u16) -> Result<&mut Self, CalendarError> {
        check_duration(duration)?;
        self.duration = duration;
        Ok(self)
    }

    /// Sets the kind of day
    pub fn set_category(&mut self, category: SpecialDayCategory) -> &mut Self {
        self.category = category;
        self
    }

    /// The first day, in the effective year of `ctx`
    pub fn resolve(&self, ctx: &YearContext) -> Result<ResolvedDate, CalendarError> {
        resolve(&self.start, ctx)
    }

    /// Every day covered, starting on the first one. These can go
    /// into the next year.
    pub fn days(&self, ctx: &YearContext) -> Result<Vec<ResolvedDate>, CalendarError> {
        let start = self.resolve(ctx)?;
        Ok((0..self.duration as i64).map(|n| start.add_days(n)).collect())
    }
}

fn check_duration(duration: u16) -> Result<(), CalendarError> {
    if duration == 0 || duration > MAX_SPECIAL_DAY_DURATION {
        return Err(CalendarError::InvalidValue {
            field: "special day duration",
            value: duration as i64,
            expected: "1 to 366",
        });
    }
    Ok(())
}

impl Named for SpecialDay {
    fn name(&self) -> &String {
        &self.name
    }
}

impl DateBearing for SpecialDay {
    fn label(&self) -> String {
        format!("SpecialDay '{}'", self.name)
    }

    fn references_leap_day(&self) -> bool {
        self.start.is_leap_day()
    }

    fn check(&self) -> Result<(), CalendarError> {
        check_duration(self.duration)
    }
}

impl LeapDayDependent for SpecialDay {
    fn ensure_no_leap_day(&mut self) {
        if self.references_leap_day() {
            print_warning(
                self.label(),
                "February 29 no longer exists; moving it to February 28",
            );
            self.start = self.start.without_leap_day();
        }
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn serde() -> Result<(), String> {
        let mut hardcoded_ref = SpecialDay::new(
            "Thanksgiving",
            "4th Thursday in November"
                .parse()
                .map_err(|e: CalendarError| e.to_string())?,
        );
        hardcoded_ref.set_duration(2).map_err(|e| e.to_string())?;

        let from_json5: SpecialDay = json5::from_str(
            "{
            name: 'Thanksgiving',
            start: '4th thu in nov',
            duration: 2,
            category: 'Holiday',
        }",
        )
        .map_err(|e| e.to_string())?;
        assert_eq!(from_json5, hardcoded_ref);

        assert_eq!(
            serde_json::to_string(&hardcoded_ref).map_err(|e| e.to_string())?,
            r#"{"name":"Thanksgiving","start":"4th Thursday in November","duration":2,"category":"Holiday"}"#
        );

        let d: SpecialDay = serde_json::from_str(
            r#"{"name": "Hot", "start": "7/21", "category": "SummerDesignDay"}"#,
        )
        .map_err(|e| e.to_string())?;
        assert_eq!(d.duration(), 1);
        assert_eq!(d.category(), SpecialDayCategory::SummerDesignDay);

        assert!(serde_json::from_str::<SpecialDay>(
            r#"{"name": "Hot", "start": "7/21", "category": "Party"}"#
        )
        .is_err());
        Ok(())
    }

    #[test]
    fn test_duration() {
        let mut d = SpecialDay::new("Christmas", DateRule::exact(12, 25).unwrap());
        assert!(d.set_duration(0).is_err());
        assert!(d.set_duration(367).is_err());
        assert_eq!(d.duration(), 1);
        assert!(d.set_duration(366).is_ok());
        assert!(d.check().is_ok());
    }

    #[test]
    fn test_days() {
        let ctx = YearContext::with_calendar_year(2009).unwrap();
        let mut d = SpecialDay::new("Christmas", DateRule::exact(12, 25).unwrap());
        d.set_duration(8).unwrap();
        let days = d.days(&ctx).unwrap();
        assert_eq!(days.len(), 8);
        assert_eq!(days[0].to_string(), "2009-12-25");
        assert_eq!(days[7].to_string(), "2010-01-01");

        let thanksgiving = SpecialDay::new("Thanksgiving", "4th Thursday in November".parse().unwrap());
        assert_eq!(thanksgiving.resolve(&ctx).unwrap().day, 26);
    }

    #[test]
    fn test_category_tokens() {
        for c in SpecialDayCategory::ALL {
            assert_eq!(c.to_string().parse::<SpecialDayCategory>().unwrap(), c);
        }
        assert_eq!(
            "winterdesignday".parse::<SpecialDayCategory>().unwrap(),
            SpecialDayCategory::WinterDesignDay
        );
        assert!("Birthday".parse::<SpecialDayCategory>().is_err());
    }

    #[test]
    fn test_ensure_no_leap_day() {
        let mut d = SpecialDay::new("Leap", DateRule::exact(2, 29).unwrap());
        d.ensure_no_leap_day();
        assert_eq!(d.start(), DateRule::exact(2, 28).unwrap());
    }
}
