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

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};

/// Something whose dates might point to February 29, and that knows
/// how to fix itself when the year stops being a leap year.
pub trait LeapDayDependent {
    /// Removes (or moves) any reference to February 29.
    ///
    /// Each implementor chooses how: clamp to February 28, shift a
    /// boundary, etc.
    fn ensure_no_leap_day(&mut self);
}

/// The list of objects that need to be told when the leap day
/// disappears.
///
/// It does not own the objects: dropping them elsewhere is enough
/// to stop them from being notified.
#[derive(Default)]
pub struct LeapCascade {
    dependents: Vec<Weak<RefCell<dyn LeapDayDependent>>>,
}

impl fmt::Debug for LeapCascade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeapCascade")
            .field("n_dependents", &self.len())
            .finish()
    }
}

impl LeapCascade {
    /// Creates an empty cascade
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a dependent. Registering the same object twice has
    /// no effect.
    pub fn register<T: LeapDayDependent + 'static>(&mut self, dependent: &Rc<RefCell<T>>) {
        let dependent: Rc<RefCell<dyn LeapDayDependent>> = dependent.clone();
        let weak = Rc::downgrade(&dependent);
        if !self.dependents.iter().any(|d| Weak::ptr_eq(d, &weak)) {
            self.dependents.push(weak);
        }
    }

    /// Stops notifying a dependent
    pub fn unregister<T: LeapDayDependent + 'static>(&mut self, dependent: &Rc<RefCell<T>>) {
        let dependent: Rc<RefCell<dyn LeapDayDependent>> = dependent.clone();
        let weak = Rc::downgrade(&dependent);
        self.dependents.retain(|d| !Weak::ptr_eq(d, &weak));
    }

    /// The number of dependents that are still alive
    pub fn len(&self) -> usize {
        self.dependents.iter().filter(|d| d.strong_count() > 0).count()
    }

    /// Checks whether there is no live dependent
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reacts to a change in the leap-year status of the year.
    ///
    /// Nothing happens unless the year was a leap year and now is not;
    /// in that case every registered dependent gets its
    /// [`LeapDayDependent::ensure_no_leap_day`] called exactly once.
    /// Returns the number of dependents that were notified.
    ///
    /// No dependent may be borrowed while this runs. One that is
    /// borrowed cannot be updated: it is skipped with a warning and
    /// keeps its leap day, so the returned count is then smaller than
    /// [`LeapCascade::len`].
    pub fn on_leap_year_transition(&mut self, was: bool, now: bool) -> usize {
        // forget about dependents that no longer exist
        self.dependents.retain(|d| d.strong_count() > 0);

        if !(was && !now) {
            return 0;
        }

        let mut count = 0;
        let mut skipped = 0;
        for dependent in self.dependents.iter().filter_map(Weak::upgrade) {
            match dependent.try_borrow_mut() {
                Ok(mut d) => {
                    d.ensure_no_leap_day();
                    count += 1;
                }
                Err(_) => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!(
                "{} leap-day dependents are borrowed elsewhere and still reference February 29",
                skipped
            );
        }
        debug!(
            "Leap day removed from the year; notified {} dependents",
            count
        );
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        calls: usize,
    }

    impl LeapDayDependent for Counter {
        fn ensure_no_leap_day(&mut self) {
            self.calls += 1;
        }
    }

    #[test]
    fn test_transitions() {
        let a = Rc::new(RefCell::new(Counter::default()));
        let b = Rc::new(RefCell::new(Counter::default()));
        let mut cascade = LeapCascade::new();
        cascade.register(&a);
        cascade.register(&b);

        assert_eq!(cascade.on_leap_year_transition(true, true), 0);
        assert_eq!(cascade.on_leap_year_transition(false, false), 0);
        assert_eq!(cascade.on_leap_year_transition(false, true), 0);
        assert_eq!(a.borrow().calls, 0);
        assert_eq!(b.borrow().calls, 0);

        assert_eq!(cascade.on_leap_year_transition(true, false), 2);
        assert_eq!(a.borrow().calls, 1);
        assert_eq!(b.borrow().calls, 1);
    }

    #[test]
    fn test_register_twice() {
        let a = Rc::new(RefCell::new(Counter::default()));
        let mut cascade = LeapCascade::new();
        cascade.register(&a);
        cascade.register(&a);
        assert_eq!(cascade.len(), 1);

        cascade.on_leap_year_transition(true, false);
        assert_eq!(a.borrow().calls, 1);

        cascade.unregister(&a);
        assert!(cascade.is_empty());
        cascade.on_leap_year_transition(true, false);
        assert_eq!(a.borrow().calls, 1);
    }

    #[test]
    fn test_dropped_dependents() {
        let a = Rc::new(RefCell::new(Counter::default()));
        let mut cascade = LeapCascade::new();
        {
            let b = Rc::new(RefCell::new(Counter::default()));
            cascade.register(&a);
            cascade.register(&b);
            assert_eq!(cascade.len(), 2);
        }
        assert_eq!(cascade.len(), 1);
        assert_eq!(cascade.on_leap_year_transition(true, false), 1);
        assert_eq!(a.borrow().calls, 1);
    }

    #[test]
    fn test_borrowed_dependent() {
        let a = Rc::new(RefCell::new(Counter::default()));
        let mut cascade = LeapCascade::new();
        cascade.register(&a);
        let b = Rc::new(RefCell::new(Counter::default()));
        cascade.register(&b);
        {
            let _guard = a.borrow();
            assert_eq!(cascade.on_leap_year_transition(true, false), 1);
            assert_eq!(cascade.len(), 2);
        }
        assert_eq!(a.borrow().calls, 0);
        assert_eq!(b.borrow().calls, 1);

        // Nothing is retried later on
        assert_eq!(cascade.on_leap_year_transition(false, false), 0);
        assert_eq!(a.borrow().calls, 0);
    }
}
