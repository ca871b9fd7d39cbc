//! Modified Julian Date handling and ISO time conversions.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// MJD of the Unix epoch (1970-01-01 00:00:00 UTC).
const UNIX_EPOCH_MJD: f64 = 40587.0;

/// A point in time expressed as a Modified Julian Date.
///
/// # Examples
///
/// ```
/// use too_rust::time::ModifiedJulianDate;
///
/// let mjd = ModifiedJulianDate::new(59580.5);
/// assert_eq!(mjd.value(), 59580.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifiedJulianDate(f64);

impl ModifiedJulianDate {
    /// Create a new MJD value.
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Raw MJD value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Convert to a UTC datetime. Returns `None` for values outside the
    /// range chrono can represent.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let secs = (self.0 - UNIX_EPOCH_MJD) * 86400.0;
        let whole = secs.floor();
        let mut micros = ((secs - whole) * 1e6).round() as i64;
        let mut whole = whole as i64;
        if micros >= 1_000_000 {
            whole += 1;
            micros = 0;
        }
        DateTime::from_timestamp(whole, (micros as u32) * 1000)
    }

    /// Convert a UTC datetime to an MJD value.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_micros() as f64 / 86_400e6 + UNIX_EPOCH_MJD)
    }
}

impl From<f64> for ModifiedJulianDate {
    fn from(v: f64) -> Self {
        ModifiedJulianDate::new(v)
    }
}

/// Format an MJD as an ISO timestamp (`YYYY-MM-DD HH:MM:SS.sss`).
pub fn mjd_to_isotime(mjd: f64) -> Option<String> {
    ModifiedJulianDate::new(mjd)
        .to_utc()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S%.3f").to_string())
}

/// Parse an ISO timestamp (`YYYY-MM-DD HH:MM:SS[.sss]`, UTC) into an MJD value.
pub fn isotime_to_mjd(isotime: &str) -> ApiResult<f64> {
    let naive = NaiveDateTime::parse_from_str(isotime.trim(), "%Y-%m-%d %H:%M:%S%.f")
        .map_err(|e| ApiError::Validation(format!("Invalid ISO time '{}': {}", isotime, e)))?;
    Ok(ModifiedJulianDate::from_utc(Utc.from_utc_datetime(&naive)).value())
}

/// Duration between two ISO timestamps, in whole seconds.
pub fn isotime_delta_to_seconds(isotime_start: &str, isotime_end: &str) -> ApiResult<f64> {
    let mjd_start = isotime_to_mjd(isotime_start)?;
    let mjd_end = isotime_to_mjd(isotime_end)?;
    Ok(((mjd_end - mjd_start) * 86400.0).round())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn mjd_roundtrip() {
        let original = 59580.123456789;
        let dt = ModifiedJulianDate::new(original).to_utc().unwrap();
        let back = ModifiedJulianDate::from_utc(dt).value();

        // Accurate to microseconds
        assert!((original - back).abs() < 1e-9);
    }

    #[test]
    fn known_mjd_conversion() {
        // MJD 59580.0 = 2022-01-01 00:00:00 UTC
        let dt = ModifiedJulianDate::new(59580.0).to_utc().unwrap();

        assert_eq!(dt.year(), 2022);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 1);
    }

    #[test]
    fn isotime_formatting() {
        assert_eq!(
            mjd_to_isotime(59580.0).unwrap(),
            "2022-01-01 00:00:00.000"
        );
        assert_eq!(
            mjd_to_isotime(59580.5).unwrap(),
            "2022-01-01 12:00:00.000"
        );
    }

    #[test]
    fn isotime_parsing() {
        let mjd = isotime_to_mjd("2022-01-01 00:00:00.000").unwrap();
        assert!((mjd - 59580.0).abs() < 1e-9);

        // Subseconds optional
        let mjd = isotime_to_mjd("2022-01-01 12:00:00").unwrap();
        assert!((mjd - 59580.5).abs() < 1e-9);

        assert!(isotime_to_mjd("not a time").is_err());
    }

    #[test]
    fn isotime_delta() {
        let delta =
            isotime_delta_to_seconds("2022-01-01 00:00:00", "2022-01-01 00:30:00").unwrap();
        assert_eq!(delta, 1800.0);
    }
}
