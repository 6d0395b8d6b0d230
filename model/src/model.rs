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
use crate::print_warning;
use crate::{DaylightSavingPeriod, DesignDay, RunPeriod, ScheduleRule, SpecialDay};
use calendar::{
    CalendarError, DateRule, LeapDayDependent, ResolvedDate, StartWeekday, YearContext,
};
use serde::{self, de::Visitor};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::rc::Rc;

/// An object in the model whose dates may need fixing when the
/// year stops being a leap year
pub(crate) trait DateBearing: LeapDayDependent + 'static {
    /// How the object is called in messages
    fn label(&self) -> String;

    /// Whether the object points to February 29
    fn references_leap_day(&self) -> bool;

    /// Checks the values that cannot be checked while parsing
    fn check(&self) -> Result<(), CalendarError> {
        Ok(())
    }
}

/// An object in the model that can be found by name
pub(crate) trait Named {
    fn name(&self) -> &String;
}

/// All the dates in a model, and the year they fall in.
///
/// The model owns a [`YearContext`]; every object added to the model is
/// registered with it, so that objects referring to February 29 are
/// fixed if the year stops being a leap year.
///
/// ```
/// use calendar::{DateRule, MonthDay};
/// use model::{Model, SpecialDay};
///
/// let mut model = Model::default();
/// model.set_leap_year(true).unwrap();
///
/// let leap = model
///     .add_special_day(SpecialDay::new("Leap day", DateRule::exact(2, 29).unwrap()))
///     .unwrap();
///
/// // Moving to a year without February 29 moves the special day
/// model.set_calendar_year(2009).unwrap();
/// assert_eq!(leap.borrow().start().to_string(), "2/28");
/// ```
#[derive(Debug, Default, Serialize)]
pub struct Model {
    /// The name of the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    year_description: YearContext,

    #[serde(skip_serializing_if = "Option::is_none")]
    run_period: Option<Rc<RefCell<RunPeriod>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    daylight_saving: Option<Rc<RefCell<DaylightSavingPeriod>>>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    special_days: Vec<Rc<RefCell<SpecialDay>>>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    design_days: Vec<Rc<RefCell<DesignDay>>>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    schedule_rules: Vec<Rc<RefCell<ScheduleRule>>>,
}

struct SimpleModelVisitor {}

impl<'de> Visitor<'de> for SimpleModelVisitor {
    type Value = Model;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a Model")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut name: Option<String> = None;
        let mut year_description: Option<YearContext> = None;
        let mut run_period: Option<RunPeriod> = None;
        let mut daylight_saving: Option<DaylightSavingPeriod> = None;
        let mut special_days: Vec<SpecialDay> = Vec::new();
        let mut design_days: Vec<DesignDay> = Vec::new();
        let mut schedule_rules: Vec<ScheduleRule> = Vec::new();

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "name" => name = map.next_value()?,
                "year_description" => year_description = Some(map.next_value()?),
                "run_period" => run_period = Some(map.next_value()?),
                "daylight_saving" => daylight_saving = Some(map.next_value()?),
                "special_days" => special_days = map.next_value()?,
                "design_days" => design_days = map.next_value()?,
                "schedule_rules" => schedule_rules = map.next_value()?,
                _ => {
                    return Err(serde::de::Error::custom(format!(
                        "Field '{}' in model is not serialized",
                        key
                    )))
                }
            }
        }

        // The year goes first, so that the dates can be checked against it
        let mut model = Model {
            name,
            year_description: year_description.unwrap_or_default(),
            ..Model::default()
        };
        if let Some(o) = run_period {
            model.set_run_period(o).map_err(serde::de::Error::custom)?;
        }
        if let Some(o) = daylight_saving {
            model
                .set_daylight_saving(o)
                .map_err(serde::de::Error::custom)?;
        }
        for o in special_days.into_iter() {
            model.add_special_day(o).map_err(serde::de::Error::custom)?;
        }
        for o in design_days.into_iter() {
            model.add_design_day(o).map_err(serde::de::Error::custom)?;
        }
        for o in schedule_rules.into_iter() {
            model.add_schedule_rule(o).map_err(serde::de::Error::custom)?;
        }

        Ok(model)
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(SimpleModelVisitor {})
    }
}

fn find_by_name<T: Named>(list: &[Rc<RefCell<T>>], name: &str) -> Option<usize> {
    list.iter().position(|o| o.borrow().name() == name)
}

impl Model {
    /// Creates an empty model with an assumed year
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a model from a JSON string
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    /// Reads a model from a JSON5 string
    pub fn from_json5(json: &str) -> Result<Self, String> {
        json5::from_str(json).map_err(|e| e.to_string())
    }

    /// Reads a model from a file. Files with a `.json5` extension are read
    /// as JSON5, and everything else as JSON.
    pub fn from_file<P: AsRef<Path> + Display>(filename: P) -> Result<Self, String> {
        let contents = match fs::read_to_string(&filename) {
            Ok(v) => v,
            Err(_) => return Err(format!("Could not read model file '{}'", filename)),
        };
        let is_json5 = filename
            .as_ref()
            .extension()
            .map(|e| e.eq_ignore_ascii_case("json5"))
            .unwrap_or(false);
        let model = if is_json5 {
            Self::from_json5(&contents)
        } else {
            Self::from_json(&contents)
        };
        model.map_err(|e| format!("Could not parse model file '{}': {}", filename, e))
    }

    /// Writes the model as (pretty) JSON
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| e.to_string())
    }

    /* YEAR */

    /// The year in which the dates of the model fall
    pub fn year_description(&self) -> &YearContext {
        &self.year_description
    }

    /// Sets an explicit calendar year.
    pub fn set_calendar_year(&mut self, year: i32) -> Result<(), CalendarError> {
        self.year_description.set_calendar_year(year)
    }

    /// Goes back to an assumed year.
    pub fn reset_calendar_year(&mut self) {
        self.year_description.reset_calendar_year()
    }

    /// Requests the weekday of January 1. Fails if there is a calendar year.
    pub fn set_start_weekday<W: Into<StartWeekday>>(
        &mut self,
        start_weekday: W,
    ) -> Result<(), CalendarError> {
        self.year_description.set_start_weekday(start_weekday)
    }

    /// Goes back to the default start weekday.
    pub fn reset_start_weekday(&mut self) {
        self.year_description.reset_start_weekday()
    }

    /// Requests a leap (or non-leap) year. Fails if there is a calendar year.
    pub fn set_leap_year(&mut self, leap_year: bool) -> Result<(), CalendarError> {
        self.year_description.set_leap_year(leap_year)
    }

    /// Goes back to the default leap-year status.
    pub fn reset_leap_year(&mut self) {
        self.year_description.reset_leap_year()
    }

    /// The year in which dates are resolved
    pub fn effective_year(&self) -> Result<i32, CalendarError> {
        self.year_description.effective_year()
    }

    /// Resolves a rule in the year of the model
    pub fn make_date(&self, rule: &DateRule) -> Result<ResolvedDate, CalendarError> {
        self.year_description.make_date(rule)
    }

    /// Checks an object, wraps it and registers it for leap-day updates
    fn admit<T: DateBearing>(&mut self, add: T) -> Result<Rc<RefCell<T>>, CalendarError> {
        add.check()?;
        if add.references_leap_day() && !self.year_description.is_leap_year() {
            return Err(CalendarError::DateRange {
                year: self.year_description.effective_year()?,
                month: 2,
                day: 29,
            });
        }
        let add = Rc::new(RefCell::new(add));
        self.year_description.register_dependent(&add);
        Ok(add)
    }

    fn warn_if_repeated<T: Named>(list: &[Rc<RefCell<T>>], kind: &str, add: &T) {
        if find_by_name(list, add.name()).is_some() {
            print_warning(
                "Model",
                format!("There is already a {} called '{}'", kind, add.name()),
            )
        }
    }

    /* RUN PERIOD */

    /// Sets the RunPeriod, replacing the previous one
    pub fn set_run_period(&mut self, add: RunPeriod) -> Result<Rc<RefCell<RunPeriod>>, CalendarError> {
        let add = self.admit(add)?;
        self.remove_run_period();
        self.run_period = Some(Rc::clone(&add));
        Ok(add)
    }

    /// The RunPeriod, if any
    pub fn run_period(&self) -> Option<Rc<RefCell<RunPeriod>>> {
        self.run_period.clone()
    }

    /// Takes the RunPeriod out of the model
    pub fn remove_run_period(&mut self) -> Option<Rc<RefCell<RunPeriod>>> {
        let old = self.run_period.take()?;
        self.year_description.unregister_dependent(&old);
        Some(old)
    }

    /* DAYLIGHT SAVING */

    /// Sets the DaylightSavingPeriod, replacing the previous one
    pub fn set_daylight_saving(
        &mut self,
        add: DaylightSavingPeriod,
    ) -> Result<Rc<RefCell<DaylightSavingPeriod>>, CalendarError> {
        let add = self.admit(add)?;
        self.remove_daylight_saving();
        self.daylight_saving = Some(Rc::clone(&add));
        Ok(add)
    }

    /// The DaylightSavingPeriod, if any
    pub fn daylight_saving(&self) -> Option<Rc<RefCell<DaylightSavingPeriod>>> {
        self.daylight_saving.clone()
    }

    /// Takes the DaylightSavingPeriod out of the model
    pub fn remove_daylight_saving(&mut self) -> Option<Rc<RefCell<DaylightSavingPeriod>>> {
        let old = self.daylight_saving.take()?;
        self.year_description.unregister_dependent(&old);
        Some(old)
    }

    /* SPECIAL DAYS */

    /// Adds a SpecialDay to the model
    pub fn add_special_day(&mut self, add: SpecialDay) -> Result<Rc<RefCell<SpecialDay>>, CalendarError> {
        Self::warn_if_repeated(&self.special_days, "SpecialDay", &add);
        let add = self.admit(add)?;
        self.special_days.push(Rc::clone(&add));
        Ok(add)
    }

    /// The SpecialDays in the model
    pub fn special_days(&self) -> &[Rc<RefCell<SpecialDay>>] {
        &self.special_days
    }

    /// Gets a SpecialDay by name
    pub fn get_special_day<S: AsRef<str>>(&self, name: S) -> Result<Rc<RefCell<SpecialDay>>, String> {
        let name = name.as_ref();
        match find_by_name(&self.special_days, name) {
            Some(i) => Ok(Rc::clone(&self.special_days[i])),
            None => Err(format!("Could not find SpecialDay '{}' in model", name)),
        }
    }

    /// Takes a SpecialDay out of the model
    pub fn remove_special_day<S: AsRef<str>>(&mut self, name: S) -> Result<Rc<RefCell<SpecialDay>>, String> {
        let name = name.as_ref();
        match find_by_name(&self.special_days, name) {
            Some(i) => {
                let old = self.special_days.remove(i);
                self.year_description.unregister_dependent(&old);
                Ok(old)
            }
            None => Err(format!("Could not find SpecialDay '{}' in model", name)),
        }
    }

    /* DESIGN DAYS */

    /// Adds a DesignDay to the model
    pub fn add_design_day(&mut self, add: DesignDay) -> Result<Rc<RefCell<DesignDay>>, CalendarError> {
        Self::warn_if_repeated(&self.design_days, "DesignDay", &add);
        let add = self.admit(add)?;
        self.design_days.push(Rc::clone(&add));
        Ok(add)
    }

    /// The DesignDays in the model
    pub fn design_days(&self) -> &[Rc<RefCell<DesignDay>>] {
        &self.design_days
    }

    /// Gets a DesignDay by name
    pub fn get_design_day<S: AsRef<str>>(&self, name: S) -> Result<Rc<RefCell<DesignDay>>, String> {
        let name = name.as_ref();
        match find_by_name(&self.design_days, name) {
            Some(i) => Ok(Rc::clone(&self.design_days[i])),
            None => Err(format!("Could not find DesignDay '{}' in model", name)),
        }
    }

    /// Takes a DesignDay out of the model
    pub fn remove_design_day<S: AsRef<str>>(&mut self, name: S) -> Result<Rc<RefCell<DesignDay>>, String> {
        let name = name.as_ref();
        match find_by_name(&self.design_days, name) {
            Some(i) => {
                let old = self.design_days.remove(i);
                self.year_description.unregister_dependent(&old);
                Ok(old)
            }
            None => Err(format!("Could not find DesignDay '{}' in model", name)),
        }
    }

    /* SCHEDULE RULES */

    /// Adds a ScheduleRule to the model
    pub fn add_schedule_rule(
        &mut self,
        add: ScheduleRule,
    ) -> Result<Rc<RefCell<ScheduleRule>>, CalendarError> {
        Self::warn_if_repeated(&self.schedule_rules, "ScheduleRule", &add);
        let add = self.admit(add)?;
        self.schedule_rules.push(Rc::clone(&add));
        Ok(add)
    }

    /// The ScheduleRules in the model
    pub fn schedule_rules(&self) -> &[Rc<RefCell<ScheduleRule>>] {
        &self.schedule_rules
    }

    /// Gets a ScheduleRule by name
    pub fn get_schedule_rule<S: AsRef<str>>(&self, name: S) -> Result<Rc<RefCell<ScheduleRule>>, String> {
        let name = name.as_ref();
        match find_by_name(&self.schedule_rules, name) {
            Some(i) => Ok(Rc::clone(&self.schedule_rules[i])),
            None => Err(format!("Could not find ScheduleRule '{}' in model", name)),
        }
    }

    /// Takes a ScheduleRule out of the model
    pub fn remove_schedule_rule<S: AsRef<str>>(
        &mut self,
        name: S,
    ) -> Result<Rc<RefCell<ScheduleRule>>, String> {
        let name = name.as_ref();
        match find_by_name(&self.schedule_rules, name) {
            Some(i) => {
                let old = self.schedule_rules.remove(i);
                self.year_description.unregister_dependent(&old);
                Ok(old)
            }
            None => Err(format!("Could not find ScheduleRule '{}' in model", name)),
        }
    }
}
