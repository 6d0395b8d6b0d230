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
use calendar::{DateRule, MonthDay, Weekday};
use model::{Model, SpecialDayCategory};

#[test]
fn test_office() -> Result<(), String> {
    let model = Model::from_file("./tests/files/office.json5")?;
    let ctx = model.year_description();

    assert_eq!(model.name, Some("Office".to_string()));
    assert_eq!(ctx.calendar_year(), None);
    assert_eq!(ctx.start_weekday(), Weekday::Sunday);
    assert!(ctx.is_leap_year());
    let year = model.effective_year().map_err(|e| e.to_string())?;
    assert_eq!(year, 1928);

    assert_eq!(model.special_days().len(), 3);
    assert_eq!(model.design_days().len(), 2);
    assert_eq!(model.schedule_rules().len(), 2);

    let thanksgiving = model.get_special_day("Thanksgiving")?;
    assert_eq!(thanksgiving.borrow().duration(), 2);
    let leap = model.get_special_day("Leap day")?;
    assert_eq!(leap.borrow().category(), SpecialDayCategory::CustomDay1);

    let rp = model.run_period().ok_or("no run period")?;
    assert_eq!(rp.borrow().years(ctx).map_err(|e| e.to_string())?, (year, year));
    assert_eq!(rp.borrow().days(ctx).map_err(|e| e.to_string())?.len(), 366);

    let winter = model.get_schedule_rule("Winter")?;
    assert!(winter.borrow().applies_to(MonthDay::new(2, 29).map_err(|e| e.to_string())?));
    Ok(())
}

#[test]
fn test_office_loses_leap_day() -> Result<(), String> {
    let mut model = Model::from_file("./tests/files/office.json5")?;
    let leap = model.get_special_day("Leap day")?;
    let winter = model.get_schedule_rule("Winter")?;

    model.set_leap_year(false).map_err(|e| e.to_string())?;
    assert_eq!(leap.borrow().start(), DateRule::exact(2, 28).map_err(|e| e.to_string())?);
    assert_eq!(winter.borrow().end().to_string(), "2/28");

    // Saved as it is now
    let json = model.to_json()?;
    assert!(json.contains(r#""end": "2/28""#));
    assert!(!json.contains("2/29"));
    let again = Model::from_json(&json)?;
    assert!(!again.year_description().is_leap_year());
    Ok(())
}

#[test]
fn test_heating_season() -> Result<(), String> {
    let model = Model::from_file("./tests/files/heating_season.json")?;
    let ctx = model.year_description();
    assert_eq!(ctx.calendar_year(), Some(2009));
    assert!(ctx.is_start_weekday_defaulted());
    assert_eq!(ctx.start_weekday(), Weekday::Thursday);

    let rp = model.run_period().ok_or("no run period")?;
    assert_eq!(rp.borrow().years(ctx).map_err(|e| e.to_string())?, (2009, 2011));

    let dst = model.daylight_saving().ok_or("no daylight saving")?;
    let (start, end) = dst.borrow().resolve(ctx).map_err(|e| e.to_string())?;
    assert_eq!(start.to_string(), "2009-03-29");
    assert_eq!(end.to_string(), "2009-10-25");

    let xmas = model.get_special_day("Christmas")?;
    let days = xmas.borrow().days(ctx).map_err(|e| e.to_string())?;
    assert_eq!(days.len(), 2);
    assert_eq!(days[1].weekday, Weekday::Saturday);
    Ok(())
}

#[test]
fn test_rejected_files() {
    assert!(Model::from_file("./tests/files/both_year_forms.json").is_err());
    assert!(Model::from_file("./tests/files/bad_rule.json").is_err());
    assert!(Model::from_file("./tests/files/leap_day_in_2009.json").is_err());

    let err = Model::from_file("./tests/files/does_not_exist.json").unwrap_err();
    assert!(err.contains("does_not_exist.json"));
}
