/// Date/clock boundary
///
/// Every notion of "today" in the engine comes from a single `Clock`, so tests
/// and replays can pin the date.

use std::cell::Cell;

use chrono::{DateTime, NaiveDate, Utc};

/// Source of the current calendar day and timestamp
pub trait Clock {
    /// The current calendar day
    fn today(&self) -> NaiveDate;

    /// The current instant, used for export timestamps
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock; days roll over at UTC midnight
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().naive_utc().date()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a settable day
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: Cell<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today: Cell::new(today) }
    }

    /// Move the clock to another day
    pub fn set(&self, today: NaiveDate) {
        self.today.set(today);
    }

    /// Move the clock forward (or backward, for negative values) by whole days
    pub fn advance_days(&self, days: i64) {
        let next = chrono::Duration::try_days(days)
            .and_then(|delta| self.today.get().checked_add_signed(delta));
        if let Some(next) = next {
            self.today.set(next);
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }

    fn now(&self) -> DateTime<Utc> {
        self.today.get().and_time(chrono::NaiveTime::MIN).and_utc()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }

    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
