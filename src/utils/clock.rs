use chrono::{DateTime, FixedOffset, NaiveDate, Timelike, Utc};

/// Source of "now" for the punch handlers. Registered as `web::Data<dyn Clock>`.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Stands still until moved with `set`.
#[cfg(test)]
pub struct ManualClock(std::sync::Mutex<DateTime<Utc>>);

#[cfg(test)]
impl ManualClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(std::sync::Mutex::new(at))
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.0.lock().unwrap() = at;
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

pub fn local_date(at: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    at.with_timezone(&offset).date_naive()
}

pub fn minutes_since_midnight(at: DateTime<Utc>, offset: FixedOffset) -> u32 {
    let local = at.with_timezone(&offset);
    local.hour() * 60 + local.minute()
}

/// Elapsed time in fractional hours; a punch-out before the punch-in counts as zero.
pub fn working_hours(punch_in: DateTime<Utc>, punch_out: DateTime<Utc>) -> f64 {
    let ms = (punch_out - punch_in).num_milliseconds().max(0);
    ms as f64 / 3_600_000.0
}
