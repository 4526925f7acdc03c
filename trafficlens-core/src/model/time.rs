//! Time of day and day of week used to modulate the traffic level

use std::fmt;

use chrono::{Datelike, Local, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TimeContextFields")]
pub struct TimeContext {
    hour: u8,
    weekday: Weekday,
}

impl TimeContext {
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] when `hour` is not in 0-23
    pub fn new(hour: u8, weekday: Weekday) -> Result<Self, Error> {
        if hour > 23 {
            return Err(Error::InvalidTime(hour));
        }
        Ok(Self { hour, weekday })
    }

    /// Reads the local clock
    pub fn now() -> Self {
        let now = Local::now();
        Self {
            // hour() is always below 24
            hour: u8::try_from(now.hour()).unwrap_or(0),
            weekday: now.weekday(),
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn day_type(&self) -> DayType {
        DayType::from(self.weekday)
    }
}

#[derive(Deserialize)]
struct TimeContextFields {
    hour: u8,
    weekday: Weekday,
}

impl TryFrom<TimeContextFields> for TimeContext {
    type Error = Error;

    fn try_from(fields: TimeContextFields) -> Result<Self, Self::Error> {
        TimeContext::new(fields.hour, fields.weekday)
    }
}

impl fmt::Display for TimeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}:00", self.weekday, self.hour)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Weekday,
    Saturday,
    Sunday,
}

impl DayType {
    pub fn label(self) -> &'static str {
        match self {
            DayType::Weekday => "Weekday",
            DayType::Saturday => "Saturday",
            DayType::Sunday => "Sunday",
        }
    }
}

impl From<Weekday> for DayType {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Sat => DayType::Saturday,
            Weekday::Sun => DayType::Sunday,
            _ => DayType::Weekday,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_hours_past_23() {
        assert!(TimeContext::new(23, Weekday::Mon).is_ok());
        assert!(matches!(
            TimeContext::new(24, Weekday::Mon),
            Err(Error::InvalidTime(24))
        ));
    }

    #[test]
    fn deserialization_validates_hour() {
        let ok: TimeContext = serde_json::from_str(r#"{"hour": 8, "weekday": "Tue"}"#).unwrap();
        assert_eq!(ok.hour(), 8);
        assert_eq!(ok.weekday(), Weekday::Tue);
        assert!(serde_json::from_str::<TimeContext>(r#"{"hour": 30, "weekday": "Tue"}"#).is_err());
    }

    #[test]
    fn day_types() {
        assert_eq!(DayType::from(Weekday::Fri), DayType::Weekday);
        assert_eq!(DayType::from(Weekday::Sat), DayType::Saturday);
        assert_eq!(DayType::from(Weekday::Sun), DayType::Sunday);
    }

    #[test]
    fn clock_reading_is_a_valid_context() {
        let now = TimeContext::now();
        assert!(TimeContext::new(now.hour(), now.weekday()).is_ok());
    }
}
