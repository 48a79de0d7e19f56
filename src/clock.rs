use chrono::{NaiveDate, Utc};

/// Injected date source so streaks and unlock dates are testable without
/// touching the wall clock.
pub trait Clock: Send {
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().naive_utc().date()
    }
}

#[cfg(test)]
#[derive(Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

#[cfg(test)]
impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
