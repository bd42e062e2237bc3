//! DATE / DATETIME / TIMESTAMP and TIME (duration) values.
//!
//! Both types render the way MySQL prints them in string context and expose
//! the packed decimal form (`YYYYMMDDhhmmss`, `hhmmss`) used in numeric
//! context.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike};

use crate::limits::MAX_FSP;

/// Which SQL type a [`Time`] value was produced as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TimeType {
    Date,
    Datetime,
    Timestamp,
}

/// A calendar point in time with fractional-second precision `fsp` (0..=6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Time {
    datetime: NaiveDateTime,
    time_type: TimeType,
    fsp: u8,
}

impl Time {
    /// A DATETIME value; `fsp` is clamped to `0..=6`.
    pub fn datetime(datetime: NaiveDateTime, fsp: u8) -> Self {
        Self {
            datetime,
            time_type: TimeType::Datetime,
            fsp: fsp.min(MAX_FSP),
        }
    }

    /// A TIMESTAMP value; `fsp` is clamped to `0..=6`.
    pub fn timestamp(datetime: NaiveDateTime, fsp: u8) -> Self {
        Self {
            datetime,
            time_type: TimeType::Timestamp,
            fsp: fsp.min(MAX_FSP),
        }
    }

    /// A DATE value.
    pub fn date(date: NaiveDate) -> Self {
        Self {
            datetime: date.and_time(chrono::NaiveTime::MIN),
            time_type: TimeType::Date,
            fsp: 0,
        }
    }

    pub fn time_type(&self) -> TimeType {
        self.time_type
    }

    pub fn fsp(&self) -> u8 {
        self.fsp
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.datetime
    }

    /// Packed numeric form: `YYYYMMDD` for dates, `YYYYMMDDhhmmss` otherwise.
    pub fn to_packed_i64(&self) -> i64 {
        let dt = &self.datetime;
        let ymd = i64::from(dt.year()) * 10_000 + i64::from(dt.month()) * 100 + i64::from(dt.day());
        if self.time_type == TimeType::Date {
            return ymd;
        }
        let hms =
            i64::from(dt.hour()) * 10_000 + i64::from(dt.minute()) * 100 + i64::from(dt.second());
        ymd * 1_000_000 + hms
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dt = &self.datetime;
        write!(f, "{:04}-{:02}-{:02}", dt.year(), dt.month(), dt.day())?;
        if self.time_type == TimeType::Date {
            return Ok(());
        }
        write!(f, " {:02}:{:02}:{:02}", dt.hour(), dt.minute(), dt.second())?;
        write_fraction(f, dt.nanosecond() / 1_000, self.fsp)
    }
}

/// A TIME value: a signed span of at most ±838:59:59.999999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Duration {
    micros: i64,
    fsp: u8,
}

/// Largest TIME magnitude MySQL accepts, in microseconds.
const MAX_TIME_MICROS: i64 = (838 * 3600 + 59 * 60 + 59) * 1_000_000 + 999_999;

impl Duration {
    /// Build from a chrono span, clamping to the TIME range.
    pub fn new(delta: TimeDelta, fsp: u8) -> Self {
        let micros = delta
            .num_microseconds()
            .unwrap_or(if delta < TimeDelta::zero() {
                -MAX_TIME_MICROS
            } else {
                MAX_TIME_MICROS
            });
        Self::from_micros(micros, fsp)
    }

    /// Build from a signed microsecond count, clamping to the TIME range.
    pub fn from_micros(micros: i64, fsp: u8) -> Self {
        Self {
            micros: micros.clamp(-MAX_TIME_MICROS, MAX_TIME_MICROS),
            fsp: fsp.min(MAX_FSP),
        }
    }

    pub fn as_time_delta(&self) -> TimeDelta {
        TimeDelta::microseconds(self.micros)
    }

    pub fn fsp(&self) -> u8 {
        self.fsp
    }

    /// Packed numeric form `[-]hhmmss`.
    pub fn to_packed_i64(&self) -> i64 {
        let secs = self.micros.abs() / 1_000_000;
        let packed = (secs / 3600) * 10_000 + (secs / 60 % 60) * 100 + secs % 60;
        if self.micros < 0 { -packed } else { packed }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.micros < 0 {
            f.write_str("-")?;
        }
        let abs = self.micros.unsigned_abs();
        let secs = abs / 1_000_000;
        write!(
            f,
            "{:02}:{:02}:{:02}",
            secs / 3600,
            secs / 60 % 60,
            secs % 60
        )?;
        let micros = u32::try_from(abs % 1_000_000).unwrap_or(0);
        write_fraction(f, micros, self.fsp)
    }
}

/// Write `.ffffff` truncated to `fsp` digits; nothing when `fsp == 0`.
fn write_fraction(f: &mut fmt::Formatter<'_>, micros: u32, fsp: u8) -> fmt::Result {
    if fsp == 0 {
        return Ok(());
    }
    let digits = format!("{micros:06}");
    write!(f, ".{}", &digits[..usize::from(fsp.min(MAX_FSP))])
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2016, 3, 9)
            .unwrap()
            .and_hms_micro_opt(13, 5, 7, 123_456)
            .unwrap()
    }

    #[test]
    fn datetime_full_precision() {
        let t = Time::datetime(sample(), 6);
        assert_eq!(t.to_string(), "2016-03-09 13:05:07.123456");
        assert_eq!(t.to_string().len(), 26);
    }

    #[test]
    fn datetime_truncates_to_fsp() {
        assert_eq!(Time::datetime(sample(), 0).to_string(), "2016-03-09 13:05:07");
        assert_eq!(
            Time::timestamp(sample(), 3).to_string(),
            "2016-03-09 13:05:07.123"
        );
        assert_eq!(Time::datetime(sample(), 9).fsp(), 6);
    }

    #[test]
    fn date_only() {
        let d = Time::date(NaiveDate::from_ymd_opt(1999, 12, 31).unwrap());
        assert_eq!(d.to_string(), "1999-12-31");
        assert_eq!(d.to_packed_i64(), 19_991_231);
    }

    #[test]
    fn datetime_packed() {
        assert_eq!(Time::datetime(sample(), 6).to_packed_i64(), 20_160_309_130_507);
    }

    #[test]
    fn duration_display() {
        let d = Duration::from_micros(-((25 * 3600 + 2 * 60 + 3) * 1_000_000 + 500_000), 1);
        assert_eq!(d.to_string(), "-25:02:03.5");
        assert_eq!(d.to_packed_i64(), -250_203);
        assert_eq!(Duration::from_micros(0, 0).to_string(), "00:00:00");
    }

    #[test]
    fn duration_clamped_to_time_range() {
        let d = Duration::new(TimeDelta::hours(10_000), 0);
        assert_eq!(d.to_string(), "838:59:59");
        assert_eq!(d.as_time_delta().num_hours(), 838);
    }
}
