use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;

pub const MIN_PASSENGERS: u8 = 1;
pub const MAX_PASSENGERS: u8 = 8;

/// Number of passengers, always within [`MIN_PASSENGERS`, `MAX_PASSENGERS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PassengerCount(u8);

impl PassengerCount {
    /// Clamps `count` into the allowed range.
    pub fn new(count: i64) -> Self {
        let clamped = count.clamp(MIN_PASSENGERS as i64, MAX_PASSENGERS as i64);
        Self(clamped as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for PassengerCount {
    fn default() -> Self {
        Self(MIN_PASSENGERS)
    }
}

impl fmt::Display for PassengerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Date, time and party size entered by the user for a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripDetails {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub passengers: PassengerCount,
}

impl TripDetails {
    pub fn new(date: NaiveDate, time: NaiveTime, passengers: PassengerCount) -> Self {
        Self {
            date,
            time,
            passengers,
        }
    }

    /// Current local date and time (to the second), one passenger.
    pub fn now() -> Self {
        let now = Local::now().naive_local();
        let time = now.time().with_nanosecond(0).unwrap_or_else(|| now.time());
        Self::new(now.date(), time, PassengerCount::default())
    }

    pub fn pickup_datetime(&self) -> NaiveDateTime {
        NaiveDateTime::new(self.date, self.time)
    }

    /// `YYYY-MM-DD HH:MM:SS`, the format the fare service expects.
    pub fn pickup_datetime_string(&self) -> String {
        self.pickup_datetime()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}
