//! Wall-clock source, injectable so combined-file names are reproducible.

use chrono::{Local, NaiveDateTime};

const STAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    /// `YYYYMMDD-HHMMSS` for the current instant.
    fn stamp(&self) -> String {
        self.now().format(STAMP_FORMAT).to_string()
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[cfg(test)]
pub struct FixedClock(pub NaiveDateTime);

#[cfg(test)]
impl FixedClock {
    pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Self {
        let dt = chrono::NaiveDate::from_ymd_opt(y, mo, d)
            .and_then(|date| date.and_hms_opt(h, mi, s))
            .expect("valid fixed timestamp");
        Self(dt)
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_is_zero_padded() {
        assert_eq!(FixedClock::at(2024, 3, 7, 9, 5, 1).stamp(), "20240307-090501");
    }
}
