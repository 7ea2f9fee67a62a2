use std::fmt;

use arrow::datatypes::TimeUnit;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use super::{discrete_ratio, Scalar};
use crate::{types::ColumnType, value::Value};

pub const NANOS_PER_DAY: i64 = 86_400 * 1_000_000_000;

/// Days between 0001-01-01 (chrono's day 1 of the common era) and 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Timestamp without timezone: a day number and the nanoseconds into that day.
///
/// The derived order is lexicographic on `(days, nanos_of_day)`, which is the
/// chronological order because `nanos_of_day` is always in `0..NANOS_PER_DAY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    days: i32,
    nanos_of_day: i64,
}

impl Timestamp {
    /// Panics if `nanos_of_day` is outside `0..NANOS_PER_DAY`.
    pub fn new(days: i32, nanos_of_day: i64) -> Self {
        assert!(
            (0..NANOS_PER_DAY).contains(&nanos_of_day),
            "nanos_of_day out of range: {nanos_of_day}"
        );
        Self { days, nanos_of_day }
    }

    pub fn days(&self) -> i32 {
        self.days
    }

    pub fn nanos_of_day(&self) -> i64 {
        self.nanos_of_day
    }

    pub fn from_unix_nanos(nanos: i64) -> Self {
        let days = nanos.div_euclid(NANOS_PER_DAY) as i32;
        Self {
            days,
            nanos_of_day: nanos.rem_euclid(NANOS_PER_DAY),
        }
    }

    /// Convert an Arrow timestamp of `unit` since the epoch.
    ///
    /// Returns `None` when the day number does not fit in an `i32`.
    pub fn from_unix(value: i64, unit: TimeUnit) -> Option<Self> {
        let factor: i128 = match unit {
            TimeUnit::Second => 1_000_000_000,
            TimeUnit::Millisecond => 1_000_000,
            TimeUnit::Microsecond => 1_000,
            TimeUnit::Nanosecond => 1,
        };
        let nanos = value as i128 * factor;
        let days = i32::try_from(nanos.div_euclid(NANOS_PER_DAY as i128)).ok()?;
        Some(Self {
            days,
            nanos_of_day: nanos.rem_euclid(NANOS_PER_DAY as i128) as i64,
        })
    }

    /// UTC nanoseconds since the epoch, `None` outside the `i64` range.
    pub fn to_unix_nanos(&self) -> Option<i64> {
        (self.days as i64)
            .checked_mul(NANOS_PER_DAY)?
            .checked_add(self.nanos_of_day)
    }

    pub fn from_naive(datetime: NaiveDateTime) -> Self {
        let time = datetime.time();
        // chrono represents a leap second as nanosecond >= 1e9
        let nanos = (time.num_seconds_from_midnight() as i64) * 1_000_000_000
            + (time.nanosecond() as i64).min(999_999_999);
        Self {
            days: datetime.date().num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE,
            nanos_of_day: nanos.min(NANOS_PER_DAY - 1),
        }
    }

    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        let date = Date(self.days).to_naive()?;
        let seconds = (self.nanos_of_day / 1_000_000_000) as u32;
        let nanos = (self.nanos_of_day % 1_000_000_000) as u32;
        let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, nanos)?;
        Some(date.and_time(time))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_naive() {
            Some(datetime) => write!(f, "{datetime}"),
            None => write!(f, "{}d+{}ns", self.days, self.nanos_of_day),
        }
    }
}

impl Scalar for Timestamp {
    const NAME: &'static str = "Timestamp";

    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    fn overlap_ratio(
        _: &ColumnType,
        filter_min: &Self,
        filter_max: &Self,
        data_min: &Self,
        data_max: &Self,
    ) -> f32 {
        match (
            filter_min.to_unix_nanos(),
            filter_max.to_unix_nanos(),
            data_min.to_unix_nanos(),
            data_max.to_unix_nanos(),
        ) {
            (Some(filter_min), Some(filter_max), Some(data_min), Some(data_max)) => discrete_ratio(
                filter_min as i128,
                filter_max as i128,
                data_min as i128,
                data_max as i128,
            ),
            // Never understate the overlap of ranges we cannot measure.
            _ => 1.0,
        }
    }
}

/// Days since 1970-01-01.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(pub i32);

impl Date {
    pub fn from_naive(date: NaiveDate) -> Self {
        Date(date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
    }

    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_num_days_from_ce_opt(self.0.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_naive() {
            Some(date) => write!(f, "{date}"),
            None => write!(f, "{}d", self.0),
        }
    }
}

impl Scalar for Date {
    const NAME: &'static str = "Date";

    fn to_value(&self) -> Value {
        Value::Date(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Date(v) => Some(*v),
            _ => None,
        }
    }

    fn overlap_ratio(
        _: &ColumnType,
        filter_min: &Self,
        filter_max: &Self,
        data_min: &Self,
        data_max: &Self,
    ) -> f32 {
        discrete_ratio(
            filter_min.0 as i128,
            filter_max.0 as i128,
            data_min.0 as i128,
            data_max.0 as i128,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::from_naive(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap())
    }

    #[test]
    fn order_is_chronological() {
        assert!(ts("2024-01-01 23:59:59") < ts("2024-01-02 00:00:00"));
        assert!(ts("1969-12-31 12:00:00") < ts("1970-01-01 00:00:00"));
    }

    #[test]
    fn unix_nanos_round_trip() {
        let value = ts("2001-09-09 01:46:40");
        assert_eq!(value.to_unix_nanos(), Some(1_000_000_000 * 1_000_000_000));
        assert_eq!(Timestamp::from_unix_nanos(-1), Timestamp::new(-1, NANOS_PER_DAY - 1));
        assert_eq!(
            Timestamp::from_unix(1_000_000_000, TimeUnit::Second),
            Some(value)
        );
    }

    #[test]
    fn unix_nanos_overflow_is_detected() {
        let far = Timestamp::new(200_000, 0);
        assert_eq!(far.to_unix_nanos(), None);
        assert_eq!(Timestamp::from_unix(i64::MAX, TimeUnit::Second), None);
    }

    #[test]
    fn unmeasurable_timestamp_ratio_is_conservative() {
        let far = Timestamp::new(200_000, 0);
        let near = Timestamp::new(0, 0);
        let ratio = Timestamp::overlap_ratio(&ColumnType::Timestamp, &near, &far, &near, &far);
        assert_eq!(ratio, 1.0);
    }

    #[test]
    fn display_uses_calendar() {
        assert_eq!(ts("2020-02-29 08:30:00").to_string(), "2020-02-29 08:30:00");
        assert_eq!(
            Date::from_naive(NaiveDate::from_ymd_opt(1970, 1, 2).unwrap()),
            Date(1)
        );
        assert_eq!(Date(0).to_string(), "1970-01-01");
    }
}
