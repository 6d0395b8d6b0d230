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

use crate::date_math;
use crate::error::CalendarError;
use crate::{Month, MonthDay, Weekday};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Which occurrence of a weekday within a month.
///
/// There is no `Fifth`: a fifth occurrence does not exist in every
/// month, so asking for it is treated as asking for the last one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ordinal {
    /// The first occurrence
    First,
    /// The second occurrence
    Second,
    /// The third occurrence
    Third,
    /// The fourth occurrence
    Fourth,
    /// The last occurrence (the 4th or the 5th, depending on the month)
    Last,
}

impl Ordinal {
    /// The occurrence number, from 1 to 5; `Last` is 5, which
    /// [`date_math::nth_weekday_of_month`] clamps to the last one.
    pub fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
            Self::Fourth => 4,
            Self::Last => date_math::MAX_ORDINAL,
        }
    }

    /// Builds an ordinal from a number from 1 to 5. A 5 becomes `Last`.
    pub fn from_number(n: u8) -> Result<Self, CalendarError> {
        match n {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            3 => Ok(Self::Third),
            4 => Ok(Self::Fourth),
            5 => Ok(Self::Last),
            _ => Err(CalendarError::InvalidValue {
                field: "ordinal",
                value: n as i64,
                expected: "1 to 5",
            }),
        }
    }

    /// Reads a bare digit (`"2"`), an ordinal word (`"2nd"`, `"second"`)
    /// or `"last"`, ignoring case.
    fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "1" | "1st" | "first" => Some(Self::First),
            "2" | "2nd" | "second" => Some(Self::Second),
            "3" | "3rd" | "third" => Some(Self::Third),
            "4" | "4th" | "fourth" => Some(Self::Fourth),
            "5" | "5th" | "fifth" | "last" => Some(Self::Last),
            _ => None,
        }
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::First => "1st",
            Self::Second => "2nd",
            Self::Third => "3rd",
            Self::Fourth => "4th",
            Self::Last => "Last",
        };
        write!(f, "{}", s)
    }
}

/// A symbolic description of a day of the year, which becomes a
/// concrete date once a year is known.
///
/// The textual form is what gets written in model files. Reading it
/// is lenient (case-insensitive, abbreviations and extra whitespace
/// are accepted) while writing always produces the canonical form:
///
/// ```
/// use calendar::{DateRule, Ordinal, Weekday};
///
/// let rule: DateRule = "2nd sun IN mar".parse().unwrap();
/// assert_eq!(rule, DateRule::NthWeekdayInMonth {
///     ordinal: Ordinal::Second,
///     weekday: Weekday::Sunday,
///     month: 3,
/// });
/// assert_eq!(rule.to_string(), "2nd Sunday in March");
///
/// let rule: DateRule = "March 01".parse().unwrap();
/// assert_eq!(rule.to_string(), "3/1");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DateRule {
    /// A fixed month and day (e.g., `"3/1"`)
    ExactDate {
        /// The month, from 1 to 12
        month: u8,
        /// The day of the month, from 1 to 31
        day: u8,
    },

    /// The n-th occurrence of a weekday in a month (e.g.,
    /// `"Last Sunday in October"`)
    NthWeekdayInMonth {
        /// Which occurrence
        ordinal: Ordinal,
        /// The day of the week
        weekday: Weekday,
        /// The month, from 1 to 12
        month: u8,
    },
}

struct RulePatterns {
    slash: Regex,
    day_month: Regex,
    month_day: Regex,
    nth_weekday: Regex,
}

/// The grammar, in the order in which it is tried
fn patterns() -> &'static RulePatterns {
    static PATTERNS: OnceLock<RulePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| RulePatterns {
        // "3/1", " 03 / 01 "
        slash: Regex::new(r"^\s*(\d+)\s*/\s*(\d+)\s*$").expect("valid regex"),
        // "1 March", "1 mar"
        day_month: Regex::new(r"(?i)^\s*(\d+)\s+([a-z]+)\s*$").expect("valid regex"),
        // "March 1", "MAR 1"
        month_day: Regex::new(r"(?i)^\s*([a-z]+)\s+(\d+)\s*$").expect("valid regex"),
        // "2nd Sunday in March", "last sun in mar", "5 Fri in Feb"
        nth_weekday: Regex::new(r"(?i)^\s*([a-z0-9]+)\s+([a-z]+)\s+in\s+([a-z]+)\s*$")
            .expect("valid regex"),
    })
}

impl DateRule {
    /// Builds an `ExactDate` rule, checking that the day exists in
    /// at least some year (February 29 is accepted).
    pub fn exact(month: u8, day: u8) -> Result<Self, CalendarError> {
        date_math::check_month_day(month, day)?;
        Ok(Self::ExactDate { month, day })
    }

    /// Builds a `NthWeekdayInMonth` rule, checking the month.
    pub fn nth(ordinal: Ordinal, weekday: Weekday, month: u8) -> Result<Self, CalendarError> {
        date_math::days_in_month(1, month)?;
        Ok(Self::NthWeekdayInMonth {
            ordinal,
            weekday,
            month,
        })
    }

    /// Parses a rule from text. See the type-level docs for the
    /// accepted forms.
    pub fn parse(text: &str) -> Result<Self, CalendarError> {
        let format_error = || CalendarError::Format {
            text: text.to_string(),
        };
        let number = |s: &str| s.parse::<u8>().map_err(|_| format_error());
        let p = patterns();

        if let Some(caps) = p.slash.captures(text) {
            return Self::exact(number(&caps[1])?, number(&caps[2])?);
        }

        if let Some(caps) = p.day_month.captures(text) {
            if let Some(month) = Month::from_name(&caps[2]) {
                return Self::exact(month.number(), number(&caps[1])?);
            }
        }

        if let Some(caps) = p.month_day.captures(text) {
            if let Some(month) = Month::from_name(&caps[1]) {
                return Self::exact(month.number(), number(&caps[2])?);
            }
        }

        if let Some(caps) = p.nth_weekday.captures(text) {
            let ordinal = Ordinal::from_token(&caps[1]);
            let weekday = Weekday::from_name(&caps[2]);
            let month = Month::from_name(&caps[3]);
            if let (Some(ordinal), Some(weekday), Some(month)) = (ordinal, weekday, month) {
                return Self::nth(ordinal, weekday, month.number());
            }
        }

        Err(format_error())
    }

    /// The month the rule falls in
    pub fn month(&self) -> u8 {
        match self {
            Self::ExactDate { month, .. } | Self::NthWeekdayInMonth { month, .. } => *month,
        }
    }

    /// Returns the month and day if this is an `ExactDate`
    pub fn as_month_day(&self) -> Option<MonthDay> {
        match self {
            Self::ExactDate { month, day } => MonthDay::new(*month, *day).ok(),
            Self::NthWeekdayInMonth { .. } => None,
        }
    }

    /// Is this exactly February 29?
    ///
    /// Weekday rules are never leap days: they always resolve to a
    /// date that exists.
    pub fn is_leap_day(&self) -> bool {
        matches!(self, Self::ExactDate { month: 2, day: 29 })
    }

    /// Returns February 28 if this is February 29, or `self` otherwise.
    pub fn without_leap_day(self) -> Self {
        if self.is_leap_day() {
            Self::ExactDate { month: 2, day: 28 }
        } else {
            self
        }
    }
}

impl From<MonthDay> for DateRule {
    fn from(item: MonthDay) -> Self {
        Self::ExactDate {
            month: item.month(),
            day: item.day(),
        }
    }
}

impl FromStr for DateRule {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DateRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactDate { month, day } => write!(f, "{}/{}", month, day),
            Self::NthWeekdayInMonth {
                ordinal,
                weekday,
                month,
            } => match Month::from_number(*month) {
                Some(m) => write!(f, "{} {} in {}", ordinal, weekday.name(), m.name()),
                // Only reachable for rules built by hand with a bad month
                None => write!(f, "{} {} in {}", ordinal, weekday.name(), month),
            },
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DateRule {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DateRule {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nth(ordinal: Ordinal, weekday: Weekday, month: u8) -> DateRule {
        DateRule::NthWeekdayInMonth {
            ordinal,
            weekday,
            month,
        }
    }

    #[test]
    fn test_parse_slash() {
        assert_eq!(
            DateRule::parse("3/1").unwrap(),
            DateRule::ExactDate { month: 3, day: 1 }
        );
        assert_eq!(
            DateRule::parse("  12 /  25 ").unwrap(),
            DateRule::ExactDate { month: 12, day: 25 }
        );
        assert_eq!(
            DateRule::parse("02/29").unwrap(),
            DateRule::ExactDate { month: 2, day: 29 }
        );
        // Syntactically fine, but that day does not exist
        assert_eq!(
            DateRule::parse("4/31"),
            Err(CalendarError::InvalidMonthDay { month: 4, day: 31 })
        );
        assert!(DateRule::parse("13/1").is_err());
        assert!(matches!(
            DateRule::parse("3/1/2009"),
            Err(CalendarError::Format { .. })
        ));
        assert!(matches!(
            DateRule::parse("1000/1"),
            Err(CalendarError::Format { .. })
        ));
    }

    #[test]
    fn test_parse_names() {
        let expected = DateRule::ExactDate { month: 1, day: 21 };
        assert_eq!(DateRule::parse("21 January").unwrap(), expected);
        assert_eq!(DateRule::parse("21 jan").unwrap(), expected);
        assert_eq!(DateRule::parse("January 21").unwrap(), expected);
        assert_eq!(DateRule::parse("JAN   21").unwrap(), expected);
        assert!(DateRule::parse("Janu 21").is_err());
        assert!(DateRule::parse("21 Smarch").is_err());
    }

    #[test]
    fn test_parse_nth_weekday() {
        assert_eq!(
            DateRule::parse("2nd Sunday in March").unwrap(),
            nth(Ordinal::Second, Weekday::Sunday, 3)
        );
        assert_eq!(
            DateRule::parse("1st sun in nov").unwrap(),
            nth(Ordinal::First, Weekday::Sunday, 11)
        );
        assert_eq!(
            DateRule::parse("  LAST  Sunday IN  October ").unwrap(),
            nth(Ordinal::Last, Weekday::Sunday, 10)
        );
        assert_eq!(
            DateRule::parse("4 Thu in Nov").unwrap(),
            nth(Ordinal::Fourth, Weekday::Thursday, 11)
        );
        // 5th and Last are the same thing
        assert_eq!(
            DateRule::parse("5th Friday in February").unwrap(),
            DateRule::parse("Last Friday in February").unwrap()
        );
        assert_eq!(
            DateRule::parse("5 Fri in Feb").unwrap(),
            nth(Ordinal::Last, Weekday::Friday, 2)
        );

        // Partial or wrong matches
        for text in [
            "6th Sunday in March",
            "2nd Sunday of March",
            "2nd Someday in March",
            "2nd Sunday in Smarch",
            "Sunday in March",
            "2nd Sunday in",
            "",
            "   ",
            "tomorrow",
        ] {
            assert_eq!(
                DateRule::parse(text),
                Err(CalendarError::Format {
                    text: text.to_string()
                }),
                "text '{}'",
                text
            );
        }
    }

    #[test]
    fn test_format() {
        assert_eq!(DateRule::ExactDate { month: 3, day: 1 }.to_string(), "3/1");
        assert_eq!(
            DateRule::ExactDate { month: 12, day: 31 }.to_string(),
            "12/31"
        );
        assert_eq!(
            nth(Ordinal::First, Weekday::Sunday, 11).to_string(),
            "1st Sunday in November"
        );
        assert_eq!(
            nth(Ordinal::Third, Weekday::Monday, 1).to_string(),
            "3rd Monday in January"
        );
        assert_eq!(
            nth(Ordinal::Last, Weekday::Sunday, 10).to_string(),
            "Last Sunday in October"
        );
        // The formatter never abbreviates, even if the input did
        assert_eq!(
            DateRule::parse("4th thu in nov").unwrap().to_string(),
            "4th Thursday in November"
        );
        assert_eq!(
            DateRule::parse("5th Fri in Feb").unwrap().to_string(),
            "Last Friday in February"
        );
    }

    #[test]
    fn test_round_trip() {
        let rules = [
            DateRule::ExactDate { month: 3, day: 1 },
            DateRule::ExactDate { month: 2, day: 29 },
            nth(Ordinal::Second, Weekday::Sunday, 3),
            nth(Ordinal::Last, Weekday::Sunday, 10),
            nth(Ordinal::Fourth, Weekday::Thursday, 11),
        ];
        for rule in rules {
            assert_eq!(DateRule::parse(&rule.to_string()).unwrap(), rule);
        }
        assert_eq!(DateRule::parse("3/1").unwrap().to_string(), "3/1");
    }

    #[test]
    fn test_ordinals() {
        for n in 1..=5 {
            assert_eq!(Ordinal::from_number(n).unwrap().number(), n);
        }
        assert!(Ordinal::from_number(0).is_err());
        assert!(Ordinal::from_number(6).is_err());
    }

    #[test]
    fn test_leap_day() {
        let rule = DateRule::exact(2, 29).unwrap();
        assert!(rule.is_leap_day());
        assert_eq!(rule.without_leap_day(), DateRule::ExactDate { month: 2, day: 28 });

        let rule = nth(Ordinal::Last, Weekday::Friday, 2);
        assert!(!rule.is_leap_day());
        assert_eq!(rule.without_leap_day(), rule);
        assert_eq!(rule.as_month_day(), None);
        assert_eq!(rule.month(), 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() -> Result<(), String> {
        let rule: DateRule =
            serde_json::from_str("\"last sun in oct\"").map_err(|e| e.to_string())?;
        assert_eq!(rule, nth(Ordinal::Last, Weekday::Sunday, 10));
        assert_eq!(
            serde_json::to_string(&rule).map_err(|e| e.to_string())?,
            "\"Last Sunday in October\""
        );
        assert!(serde_json::from_str::<DateRule>("\"someday\"").is_err());
        Ok(())
    }
}
