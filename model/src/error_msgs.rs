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

use std::fmt::Display;
use tracing::{error, warn};

/// Reports something the user should know about but that does not
/// stop the model from being used (e.g., a date that was moved).
///
/// ```
/// use model::print_warning;
/// print_warning("RunPeriod 'Annual'", "February 29 was moved to February 28");
/// ```
pub fn print_warning<C: Display, T: Display>(module_name: C, msg: T) {
    warn!("[in {}] {}", module_name, msg)
}

/// Reports something that went wrong.
///
/// ```
/// use model::print_error;
/// print_error("Model", "could not resolve the run period");
/// ```
pub fn print_error<C: Display, T: Display>(module_name: C, msg: T) {
    error!("[in {}] {}", module_name, msg)
}
