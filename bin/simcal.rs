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

use clap::Parser;
use simcal::cli::{load_model, run, SimcalOptions};
use simcal::model::Model;

fn run_and_write(model: &Model, options: &SimcalOptions) -> Result<(), String> {
    match &options.output {
        Some(v) => {
            let out = std::fs::File::create(v)
                .map_err(|e| format!("Could not create output file '{}': {}", v, e))?;
            run(model, &options.command, out)
        }
        None => run(model, &options.command, std::io::stdout().lock()),
    }
}

fn main() {
    let options = SimcalOptions::parse();
    simcal::logging::init(options.verbose);

    let model = match load_model(&options) {
        Ok(o) => o,
        Err(e) => {
            simcal::error_msgs::print_error("simcal", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run_and_write(&model, &options) {
        simcal::error_msgs::print_error("simcal", e);
        std::process::exit(1);
    }
}
