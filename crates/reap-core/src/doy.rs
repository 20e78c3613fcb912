//! Day-of-year time axis.
//!
//! All series are indexed by a fractional day count since 00:00 UTC on
//! January 1 of the target year. Dates are quantized through [`DoyKey`], a
//! fixed-point integer (1e-6 day) that both orders scenes and names bands.

use chrono::{DateTime, NaiveDate, Utc};

use crate::consts::{BAND_KEY_WIDTH, DOY_KEY_SCALE, MILLIS_PER_DAY};
use crate::error::{ReapError, Result};
use crate::scene::IndexKind;

const BAND_KEY_SEPARATOR: &str = "_DOY_";

/// Start of the DOY epoch for `year`.
pub fn year_start(year: i32) -> Result<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or(ReapError::InvalidYear(year))
}

/// Milliseconds from the start of `year` to `acquired` (negative before it).
pub fn millis_since_year_start(acquired: DateTime<Utc>, year: i32) -> Result<i64> {
    Ok((acquired - year_start(year)?).num_milliseconds())
}

/// Fractional day-of-year of `acquired`; January 1, 00:00 UTC is 0.0.
pub fn day_of_year(acquired: DateTime<Utc>, year: i32) -> Result<f64> {
    Ok(millis_since_year_start(acquired, year)? as f64 / MILLIS_PER_DAY)
}

/// Convert Unix milliseconds to a UTC timestamp.
pub fn timestamp_from_millis(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis).ok_or(ReapError::InvalidTimestamp(millis))
}

/// Fixed-point day-of-year: `trunc(doy * 1e6)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DoyKey(pub i64);

impl DoyKey {
    pub fn from_doy(doy: f64) -> Self {
        Self((doy * DOY_KEY_SCALE).trunc() as i64)
    }

    /// Exact key from a millisecond offset, without a float round trip.
    pub fn from_millis(millis: i64) -> Self {
        // 1e6 / 86_400_000 = 1000 / 86_400
        Self((millis as i128 * 1000 / 86_400) as i64)
    }

    pub fn for_acquisition(acquired: DateTime<Utc>, year: i32) -> Result<Self> {
        Ok(Self::from_millis(millis_since_year_start(acquired, year)?))
    }

    pub fn doy(self) -> f64 {
        self.0 as f64 / DOY_KEY_SCALE
    }

    pub fn band_name(self, kind: IndexKind) -> String {
        format!(
            "{}{}{:0width$}",
            kind.band_prefix(),
            BAND_KEY_SEPARATOR,
            self.0,
            width = BAND_KEY_WIDTH
        )
    }
}

impl std::fmt::Display for DoyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}", self.doy())
    }
}

/// Parse a band name produced by [`DoyKey::band_name`].
pub fn parse_band_name(name: &str) -> Result<(IndexKind, DoyKey)> {
    let invalid = || ReapError::InvalidBandName(name.to_string());
    let (prefix, digits) = name.rsplit_once(BAND_KEY_SEPARATOR).ok_or_else(invalid)?;
    let kind = IndexKind::from_band_prefix(prefix).ok_or_else(invalid)?;
    let key = digits.parse::<i64>().map_err(|_| invalid())?;
    Ok((kind, DoyKey(key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_millis_truncates_toward_zero() {
        assert_eq!(DoyKey::from_millis(43_200_000), DoyKey(500_000));
        assert_eq!(DoyKey::from_millis(87), DoyKey(1));
        assert_eq!(DoyKey::from_millis(86), DoyKey(0));
        assert_eq!(DoyKey::from_millis(-87), DoyKey(-1));
    }

    #[test]
    fn invalid_year_is_rejected() {
        assert!(year_start(i32::MAX).is_err());
    }
}
