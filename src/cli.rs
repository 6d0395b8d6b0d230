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
use crate::collaborator::{run_period_years, translate};
use calendar::{resolve, DateRule, StartWeekday};
use clap::{ArgAction, Parser, Subcommand};
use model::Model;
use std::io::Write;
use tracing::info;

/// The options we can pass to the program
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct SimcalOptions {
    /// The input model file (.json or .json5)
    #[clap(short = 'i')]
    pub input_file: Option<String>,

    /// An explicit calendar year
    #[clap(long, conflicts_with_all = ["start_weekday", "leap_year"])]
    pub year: Option<i32>,

    /// The weekday of January 1 of the assumed year
    /// (or `UseWeatherFile`)
    #[clap(long)]
    pub start_weekday: Option<StartWeekday>,

    /// Whether the assumed year is a leap year
    #[clap(long)]
    pub leap_year: Option<bool>,

    /// Specifies the path to which to write the results.
    /// If none is given, STDOUT is used
    #[clap(short = 'o')]
    pub output: Option<String>,

    /// Makes the program talk more (can be repeated)
    #[clap(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    /// What to do
    #[clap(subcommand)]
    pub command: Command,
}

/// The things the program can do
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Prints the date (and weekday) of each rule
    Resolve {
        /// The rules (e.g., "3/1" or "Last Sunday in October")
        #[clap(required = true)]
        rules: Vec<String>,
    },

    /// Prints the first and last year of a run period
    RunPeriod {
        /// The first day (e.g., "4/1")
        begin: String,

        /// The last day (e.g., "3/31")
        end: String,

        /// The number of times the period is simulated
        #[clap(long, default_value_t = 1)]
        repeat: u32,
    },

    /// Prints every date of the model, resolved, as JSON
    Translate,
}

/// Loads the model (or creates an empty one) and applies the year
/// options over it
pub fn load_model(options: &SimcalOptions) -> Result<Model, String> {
    let mut model = match &options.input_file {
        Some(f) => {
            info!("Reading model file '{}'", f);
            Model::from_file(f.to_string())?
        }
        None => Model::new(),
    };

    if let Some(y) = options.year {
        model.set_calendar_year(y).map_err(|e| e.to_string())?;
    }
    if options.start_weekday.is_some() || options.leap_year.is_some() {
        // Flags win over the year in the file
        model.reset_calendar_year();
    }
    if let Some(w) = options.start_weekday {
        model.set_start_weekday(w).map_err(|e| e.to_string())?;
    }
    if let Some(b) = options.leap_year {
        model.set_leap_year(b).map_err(|e| e.to_string())?;
    }
    Ok(model)
}

/// Runs a command, writing the results into `out`
pub fn run<W: Write>(model: &Model, command: &Command, mut out: W) -> Result<(), String> {
    let ctx = model.year_description();
    match command {
        Command::Resolve { rules } => {
            for text in rules {
                let rule = DateRule::parse(text).map_err(|e| e.to_string())?;
                let date = resolve(&rule, ctx).map_err(|e| e.to_string())?;
                writeln!(out, "{}\t{}\t{}", rule, date, date.weekday).map_err(|e| e.to_string())?;
            }
        }
        Command::RunPeriod { begin, end, repeat } => {
            let (begin_year, end_year) =
                run_period_years(begin, end, *repeat, ctx).map_err(|e| e.to_string())?;
            writeln!(out, "{}\t{}", begin_year, end_year).map_err(|e| e.to_string())?;
        }
        Command::Translate => {
            let translated = translate(model).map_err(|e| e.to_string())?;
            let json = serde_json::to_string_pretty(&translated).map_err(|e| e.to_string())?;
            writeln!(out, "{}", json).map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(args: &[&str]) -> SimcalOptions {
        let mut all = vec!["simcal"];
        all.extend_from_slice(args);
        SimcalOptions::try_parse_from(all).unwrap()
    }

    fn output(args: &[&str]) -> Result<String, String> {
        let options = options(args);
        let model = load_model(&options)?;
        let mut out: Vec<u8> = Vec::new();
        run(&model, &options.command, &mut out)?;
        String::from_utf8(out).map_err(|e| e.to_string())
    }

    #[test]
    fn test_parse() {
        let o = options(&["-vv", "--year", "2008", "resolve", "3/1", "last sun in oct"]);
        assert_eq!(o.verbose, 2);
        assert_eq!(o.year, Some(2008));
        assert_eq!(
            o.command,
            Command::Resolve {
                rules: vec!["3/1".to_string(), "last sun in oct".to_string()]
            }
        );

        let o = options(&["run-period", "4/1", "3/31", "--repeat", "2"]);
        assert_eq!(
            o.command,
            Command::RunPeriod {
                begin: "4/1".to_string(),
                end: "3/31".to_string(),
                repeat: 2
            }
        );

        let o = options(&["--start-weekday", "UseWeatherFile", "translate"]);
        assert_eq!(o.start_weekday, Some(StartWeekday::UseWeatherFile));

        // Year and weekday cannot go together
        assert!(SimcalOptions::try_parse_from([
            "simcal",
            "--year",
            "2008",
            "--start-weekday",
            "Monday",
            "translate"
        ])
        .is_err());
        assert!(SimcalOptions::try_parse_from(["simcal", "resolve"]).is_err());
        assert!(SimcalOptions::try_parse_from(["simcal", "--start-weekday", "Someday", "translate"]).is_err());
    }

    #[test]
    fn test_resolve() -> Result<(), String> {
        let out = output(&["resolve", "2nd Sunday in March", "1st sun in nov", "3/1"])?;
        assert_eq!(
            out,
            "2nd Sunday in March\t1903-03-08\tSunday\n1st Sunday in November\t1903-11-01\tSunday\n3/1\t1903-03-01\tSunday\n"
        );

        let out = output(&["--year", "2008", "resolve", "5th Monday in February"])?;
        assert_eq!(out, "Last Monday in February\t2008-02-25\tMonday\n");

        assert!(output(&["resolve", "2/29"]).is_err());
        assert!(output(&["--leap-year", "true", "resolve", "2/29"]).is_ok());
        assert!(output(&["resolve", "soon"]).is_err());
        Ok(())
    }

    #[test]
    fn test_run_period() -> Result<(), String> {
        assert_eq!(output(&["--year", "2009", "run-period", "4/1", "3/31"])?, "2009\t2010\n");
        assert_eq!(output(&["--year", "2009", "run-period", "1/1", "12/31"])?, "2009\t2009\n");
        assert_eq!(
            output(&["--year", "2009", "run-period", "1/1", "12/31", "--repeat", "3"])?,
            "2009\t2011\n"
        );
        assert!(output(&["run-period", "1/1", "12/31", "--repeat", "0"]).is_err());
        assert!(output(&[
            "--year",
            "2009",
            "run-period",
            "1/1",
            "12/31",
            "--repeat",
            "4294967295"
        ])
        .is_err());
        assert!(output(&["run-period", "1st Monday in May", "12/31"]).is_err());
        Ok(())
    }

    #[test]
    fn test_translate() -> Result<(), String> {
        let out = output(&["--start-weekday", "Tuesday", "--leap-year", "true", "translate"])?;
        let v: serde_json::Value = serde_json::from_str(&out).map_err(|e| e.to_string())?;
        assert_eq!(v["start_weekday"], "Tuesday");
        assert_eq!(v["leap_year"], true);
        assert_eq!(v["explicit_year"], false);
        Ok(())
    }
}
