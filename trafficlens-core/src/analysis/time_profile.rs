use serde::{Deserialize, Serialize};

use crate::model::{DayType, TimeContext};
use crate::{Error, Score};

/// Mapping from (hour bucket, day type) to the multiplier applied to the
/// network score.
///
/// The multiplier is `hour factor * day factor`, clamped to
/// `multiplier_range`. Hours not covered by any bucket use the off-peak
/// factor; overlapping buckets resolve to the first listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeProfile {
    pub hour_buckets: Vec<HourBucket>,
    pub off_peak_label: String,
    pub off_peak_factor: Score,
    pub day_factors: DayFactors,
    pub multiplier_range: MultiplierRange,
}

/// Inclusive range of hours sharing one factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourBucket {
    pub label: String,
    pub start_hour: u8,
    pub end_hour: u8,
    pub factor: Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayFactors {
    pub weekday: Score,
    pub saturday: Score,
    pub sunday: Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiplierRange {
    pub min: Score,
    pub max: Score,
}

/// Multiplier resolved for one [`TimeContext`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeModulation {
    pub period: String,
    pub day_type: DayType,
    pub hour_factor: Score,
    pub day_factor: Score,
    pub multiplier: Score,
}

impl HourBucket {
    fn new(label: &str, start_hour: u8, end_hour: u8, factor: Score) -> Self {
        Self {
            label: label.to_string(),
            start_hour,
            end_hour,
            factor,
        }
    }

    fn contains(&self, hour: u8) -> bool {
        (self.start_hour..=self.end_hour).contains(&hour)
    }
}

impl Default for TimeProfile {
    fn default() -> Self {
        Self {
            hour_buckets: vec![
                HourBucket::new("Morning peak", 7, 9, 1.0),
                HourBucket::new("Lunch hour", 12, 14, 0.8),
                HourBucket::new("Evening peak", 17, 19, 1.0),
                HourBucket::new("Active night", 20, 22, 0.6),
            ],
            off_peak_label: "Night / early morning".to_string(),
            off_peak_factor: 0.3,
            day_factors: DayFactors::default(),
            multiplier_range: MultiplierRange::default(),
        }
    }
}

impl Default for DayFactors {
    fn default() -> Self {
        Self {
            weekday: 1.0,
            saturday: 0.7,
            sunday: 0.5,
        }
    }
}

impl Default for MultiplierRange {
    fn default() -> Self {
        Self { min: 0.1, max: 1.5 }
    }
}

impl DayFactors {
    pub fn factor(&self, day_type: DayType) -> Score {
        match day_type {
            DayType::Weekday => self.weekday,
            DayType::Saturday => self.saturday,
            DayType::Sunday => self.sunday,
        }
    }
}

impl TimeProfile {
    pub fn modulation(&self, time: &TimeContext) -> TimeModulation {
        let (period, hour_factor) = self
            .hour_buckets
            .iter()
            .find(|bucket| bucket.contains(time.hour()))
            .map_or((self.off_peak_label.as_str(), self.off_peak_factor), |bucket| {
                (bucket.label.as_str(), bucket.factor)
            });

        let day_type = time.day_type();
        let day_factor = self.day_factors.factor(day_type);
        let multiplier = (hour_factor * day_factor)
            .max(self.multiplier_range.min)
            .min(self.multiplier_range.max);

        TimeModulation {
            period: period.to_string(),
            day_type,
            hour_factor,
            day_factor,
            multiplier,
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for hours outside 0-23, inverted
    /// buckets or ranges, and negative or non-finite factors
    pub fn validate(&self) -> Result<(), Error> {
        let range = self.multiplier_range;
        if !range.min.is_finite()
            || !range.max.is_finite()
            || range.min < 0.0
            || range.min > range.max
        {
            return Err(Error::InvalidConfig(format!(
                "multiplier range must satisfy 0 <= min <= max, got {}..{}",
                range.min, range.max
            )));
        }

        for bucket in &self.hour_buckets {
            if bucket.end_hour > 23 || bucket.start_hour > bucket.end_hour {
                return Err(Error::InvalidConfig(format!(
                    "hour bucket '{}' spans {}-{}, expected start <= end <= 23",
                    bucket.label, bucket.start_hour, bucket.end_hour
                )));
            }
            check_factor(&bucket.label, bucket.factor)?;
        }

        check_factor(&self.off_peak_label, self.off_peak_factor)?;
        check_factor("weekday", self.day_factors.weekday)?;
        check_factor("saturday", self.day_factors.saturday)?;
        check_factor("sunday", self.day_factors.sunday)
    }
}

fn check_factor(name: &str, factor: Score) -> Result<(), Error> {
    if factor.is_finite() && factor >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "factor for '{name}' must be a non-negative number, got {factor}"
        )))
    }
}
