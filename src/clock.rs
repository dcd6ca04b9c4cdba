use chrono::{DateTime, Local, NaiveDate};

/// Time source for the ledgers and the identity store, substitutable in
/// tests so date-stamped behavior is deterministic.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

#[cfg(test)]
pub struct FixedClock(pub DateTime<Local>);

#[cfg(test)]
impl FixedClock {
    /// Pins the clock to midnight on the given date.
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        use chrono::TimeZone;
        FixedClock(Local.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap())
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}
