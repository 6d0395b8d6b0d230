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

//! Calendar arithmetic on the proleptic Gregorian calendar.
//!
//! Everything here is a pure function of its inputs. Months and days
//! are counted from 1.

use crate::error::CalendarError;
use crate::Weekday;

/// The number of days before the first day of each month, in a
/// non-leap year.
const CUMULATED_DAYS_BEFORE_MONTH: [u16; 12] = [
    0,   // Jan
    31,  // Feb
    59,  // Mar
    90,  // Apr
    120, // May
    151, // Jun
    181, // Jul
    212, // Aug
    243, // Sept
    273, // Oct
    304, // Nov
    334, // Dec
];

/// The number of days in each month, in a non-leap year.
const N_DAYS_PER_MONTH: [u8; 12] = [
    31, // Jan
    28, // Feb
    31, // March
    30, // Apr
    31, // May
    30, // Jun
    31, // Jul
    31, // Aug
    30, // Sept
    31, // Oct
    30, // Nov
    31, // Dec
];

/// The largest ordinal accepted by [`nth_weekday_of_month`]. Asking
/// for this occurrence means "the last one".
pub const MAX_ORDINAL: u8 = 5;

/// Gregorian leap-year rule: divisible by 4, but not by 100 unless
/// also divisible by 400.
///
/// ```
/// use calendar::date_math::is_leap_year;
/// assert!(is_leap_year(2000));
/// assert!(is_leap_year(2008));
/// assert!(!is_leap_year(1900));
/// assert!(!is_leap_year(2009));
/// ```
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// The number of days in a year (365 or 366)
pub fn days_in_year(year: i32) -> u16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

fn check_month(month: u8) -> Result<(), CalendarError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(CalendarError::InvalidValue {
            field: "month",
            value: month as i64,
            expected: "1 to 12",
        })
    }
}

/// The number of days in a month of a specific year
pub fn days_in_month(year: i32, month: u8) -> Result<u8, CalendarError> {
    check_month(month)?;
    if month == 2 && is_leap_year(year) {
        Ok(29)
    } else {
        Ok(N_DAYS_PER_MONTH[month as usize - 1])
    }
}

/// The largest number of days a month can have in any year (i.e.,
/// February has 29).
pub fn max_days_in_month(month: u8) -> Result<u8, CalendarError> {
    if month == 2 {
        Ok(29)
    } else {
        days_in_month(1, month)
    }
}

/// Checks that a month and day exist in some year. February 29 is
/// accepted.
pub fn check_month_day(month: u8, day: u8) -> Result<(), CalendarError> {
    match max_days_in_month(month) {
        Ok(max) if day >= 1 && day <= max => Ok(()),
        _ => Err(CalendarError::InvalidMonthDay { month, day }),
    }
}

/// Checks that a date exists in its year.
pub fn check_date(year: i32, month: u8, day: u8) -> Result<(), CalendarError> {
    check_month_day(month, day)?;
    if day > days_in_month(year, month)? {
        return Err(CalendarError::DateRange { year, month, day });
    }
    Ok(())
}

/// The number of days between 1970-01-01 and the given date (negative
/// before that). The date is not validated.
pub fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let month = month as i64;
    let day = day as i64;
    // Years start in March, so that the leap day is the last day of the year.
    let y = if month <= 2 { year as i64 - 1 } else { year as i64 };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let year_of_era = y - era * 400;
    let shifted_month = (month + 9) % 12;
    let day_of_shifted_year = (153 * shifted_month + 2) / 5 + day - 1;
    let day_of_era =
        year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_shifted_year;
    era * 146097 + day_of_era - 719468
}

/// The inverse of [`days_from_civil`]: returns `(year, month, day)`
pub fn civil_from_days(days: i64) -> (i32, u8, u8) {
    let z = days + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let day_of_era = z - era * 146097;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36524 - day_of_era / 146096) / 365;
    let day_of_shifted_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_shifted_year + 2) / 153;
    let day = day_of_shifted_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_era + era * 400 + i64::from(month <= 2);
    (year as i32, month as u8, day as u8)
}

/// The day of the week of a date.
///
/// ```
/// use calendar::{date_math::day_of_week, Weekday};
/// assert_eq!(day_of_week(2008, 1, 1).unwrap(), Weekday::Tuesday);
/// assert!(day_of_week(2009, 2, 29).is_err());
/// ```
pub fn day_of_week(year: i32, month: u8, day: u8) -> Result<Weekday, CalendarError> {
    check_date(year, month, day)?;
    // 1970-01-01 was a Thursday
    Ok(Weekday::from_days_from_sunday(
        days_from_civil(year, month, day) + 4,
    ))
}

/// The day of the year of a date, from 1 (January 1) to 365 or 366
/// (December 31).
pub fn day_of_year(year: i32, month: u8, day: u8) -> Result<u16, CalendarError> {
    check_date(year, month, day)?;
    let leap_offset = if month > 2 && is_leap_year(year) { 1 } else { 0 };
    Ok(CUMULATED_DAYS_BEFORE_MONTH[month as usize - 1] + leap_offset + day as u16)
}

/// Transforms a day of the year into a `(month, day)` pair.
pub fn from_day_of_year(year: i32, day_of_year: u16) -> Result<(u8, u8), CalendarError> {
    if day_of_year == 0 || day_of_year > days_in_year(year) {
        return Err(CalendarError::DayOfYearRange { year, day_of_year });
    }

    let mut remaining = day_of_year;
    for month in 1..=12 {
        let n = days_in_month(year, month)? as u16;
        if remaining <= n {
            return Ok((month, remaining as u8));
        }
        remaining -= n;
    }
    // The range check above guarantees that we return within the loop
    Err(CalendarError::DayOfYearRange { year, day_of_year })
}

/// Finds the day of the month of the `ordinal`-th `weekday` in a month.
///
/// The first occurrence of `weekday` is found and then advanced by
/// whole weeks. When the requested occurrence does not exist (e.g.,
/// the 5th Monday of a month that has only four), the last real
/// occurrence is returned. Asking for [`MAX_ORDINAL`] is therefore
/// the same as asking for the last one.
///
/// ```
/// use calendar::{date_math::nth_weekday_of_month, Weekday};
/// // February 2008 has five Fridays...
/// assert_eq!(nth_weekday_of_month(2008, 2, Weekday::Friday, 5).unwrap(), 29);
/// // ... but only four Mondays
/// assert_eq!(nth_weekday_of_month(2008, 2, Weekday::Monday, 5).unwrap(), 25);
/// ```
pub fn nth_weekday_of_month(
    year: i32,
    month: u8,
    weekday: Weekday,
    ordinal: u8,
) -> Result<u8, CalendarError> {
    if ordinal == 0 || ordinal > MAX_ORDINAL {
        return Err(CalendarError::InvalidValue {
            field: "ordinal",
            value: ordinal as i64,
            expected: "1 to 5",
        });
    }
    let n_days = days_in_month(year, month)?;
    let first = day_of_week(year, month, 1)?;
    let mut day = 1 + first.days_until(weekday) + (ordinal - 1) * 7;
    while day > n_days {
        day -= 7;
    }
    Ok(day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_years() {
        for (year, expected) in [
            (1900, false),
            (2000, true),
            (2008, true),
            (2009, false),
            (2100, false),
        ] {
            assert_eq!(is_leap_year(year), expected, "year {}", year);
        }
        assert_eq!(days_in_year(2000), 366);
        assert_eq!(days_in_year(1900), 365);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2008, 2).unwrap(), 29);
        assert_eq!(days_in_month(2009, 2).unwrap(), 28);
        assert_eq!(days_in_month(2009, 4).unwrap(), 30);
        assert_eq!(days_in_month(2009, 12).unwrap(), 31);
        assert!(days_in_month(2009, 0).is_err());
        assert!(days_in_month(2009, 13).is_err());
    }

    #[test]
    fn test_check_date() {
        assert!(check_date(2008, 2, 29).is_ok());
        assert_eq!(
            check_date(2009, 2, 29),
            Err(CalendarError::DateRange {
                year: 2009,
                month: 2,
                day: 29
            })
        );
        assert_eq!(
            check_date(2009, 4, 31),
            Err(CalendarError::InvalidMonthDay { month: 4, day: 31 })
        );
        assert!(check_date(2009, 1, 0).is_err());
        assert!(check_month_day(2, 29).is_ok());
        assert!(check_month_day(2, 30).is_err());
    }

    #[test]
    fn test_days_from_civil() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(days_from_civil(1970, 1, 2), 1);
        assert_eq!(days_from_civil(1969, 12, 31), -1);
        assert_eq!(days_from_civil(2000, 3, 1), 11017);
        assert_eq!(civil_from_days(11017), (2000, 3, 1));
        assert_eq!(civil_from_days(-1), (1969, 12, 31));
        assert_eq!(civil_from_days(days_from_civil(2008, 2, 29)), (2008, 2, 29));
    }

    #[test]
    fn test_day_of_week() {
        assert_eq!(day_of_week(2000, 1, 1).unwrap(), Weekday::Saturday);
        assert_eq!(day_of_week(2000, 2, 29).unwrap(), Weekday::Tuesday);
        assert_eq!(day_of_week(2000, 12, 31).unwrap(), Weekday::Sunday);
        assert_eq!(day_of_week(2008, 1, 1).unwrap(), Weekday::Tuesday);
        assert_eq!(day_of_week(2008, 2, 29).unwrap(), Weekday::Friday);
        assert_eq!(day_of_week(2008, 7, 4).unwrap(), Weekday::Friday);
        assert_eq!(day_of_week(2009, 1, 1).unwrap(), Weekday::Thursday);
        assert_eq!(day_of_week(2009, 11, 26).unwrap(), Weekday::Thursday);
        assert_eq!(day_of_week(1903, 1, 1).unwrap(), Weekday::Thursday);
        assert!(day_of_week(2009, 2, 29).is_err());
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(day_of_year(2009, 1, 1).unwrap(), 1);
        assert_eq!(day_of_year(2009, 3, 1).unwrap(), 60);
        assert_eq!(day_of_year(2008, 3, 1).unwrap(), 61);
        assert_eq!(day_of_year(2008, 2, 29).unwrap(), 60);
        assert_eq!(day_of_year(2009, 12, 31).unwrap(), 365);
        assert_eq!(day_of_year(2008, 12, 31).unwrap(), 366);

        assert_eq!(from_day_of_year(2009, 1).unwrap(), (1, 1));
        assert_eq!(from_day_of_year(2009, 60).unwrap(), (3, 1));
        assert_eq!(from_day_of_year(2008, 60).unwrap(), (2, 29));
        assert_eq!(from_day_of_year(2008, 366).unwrap(), (12, 31));
        assert_eq!(
            from_day_of_year(2009, 366),
            Err(CalendarError::DayOfYearRange {
                year: 2009,
                day_of_year: 366
            })
        );
        assert!(from_day_of_year(2009, 0).is_err());
    }

    #[test]
    fn test_nth_weekday_of_month() {
        // March 2009 starts on a Sunday
        assert_eq!(nth_weekday_of_month(2009, 3, Weekday::Sunday, 1).unwrap(), 1);
        assert_eq!(nth_weekday_of_month(2009, 3, Weekday::Sunday, 2).unwrap(), 8);
        assert_eq!(nth_weekday_of_month(2009, 3, Weekday::Sunday, 5).unwrap(), 29);
        assert_eq!(nth_weekday_of_month(2009, 3, Weekday::Saturday, 1).unwrap(), 7);
        // Thanksgiving
        assert_eq!(nth_weekday_of_month(2009, 11, Weekday::Thursday, 4).unwrap(), 26);

        // Clamping
        assert_eq!(nth_weekday_of_month(2008, 2, Weekday::Friday, 5).unwrap(), 29);
        assert_eq!(nth_weekday_of_month(2008, 2, Weekday::Monday, 5).unwrap(), 25);
        assert_eq!(nth_weekday_of_month(2009, 2, Weekday::Friday, 5).unwrap(), 27);

        assert!(nth_weekday_of_month(2009, 2, Weekday::Friday, 0).is_err());
        assert!(nth_weekday_of_month(2009, 2, Weekday::Friday, 6).is_err());
        assert!(nth_weekday_of_month(2009, 13, Weekday::Friday, 1).is_err());
    }
}
