use hifitime::{Epoch, TimeScale};

use crate::constants::{DPI, T2000};
use crate::skywatch_errors::SkywatchError;

/// Resolve an optional caller-supplied instant to a concrete [`Epoch`].
///
/// Argument
/// --------
/// * `instant`: a timezone-aware epoch, or `None` for the current civil time.
///
/// Return
/// ------
/// * The epoch to run the visibility computation at.
pub fn resolve_instant(instant: Option<Epoch>) -> Epoch {
    instant.unwrap_or_else(Epoch::now_or_zero)
}

/// Current system time, falling back to J2000 when the clock is unreadable.
///
/// `hifitime` surfaces clock access as a `Result`; a host without a readable
/// clock is not worth failing a visibility query over, and the fallback is
/// deterministic.
pub(crate) trait EpochNowExt {
    fn now_or_zero() -> Epoch;
}

impl EpochNowExt for Epoch {
    fn now_or_zero() -> Epoch {
        Epoch::now().unwrap_or_else(|_| Epoch::from_mjd_in_time_scale(T2000, TimeScale::TT))
    }
}

/// Parse a user-entered date and time in the format `YYYY-MM-DD HH:MM`,
/// interpreted as UTC.
///
/// Full ISO-8601 strings (e.g. `2026-08-07T21:30:00 UTC`) are accepted as a
/// fallback through `hifitime`'s own parser.
///
/// Argument
/// --------
/// * `text`: the user input.
///
/// Return
/// ------
/// * The parsed [`Epoch`], or [`SkywatchError::InvalidDateFormat`].
pub fn parse_user_datetime(text: &str) -> Result<Epoch, SkywatchError> {
    let trimmed = text.trim();

    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    if parts.len() == 2 {
        if let Some(epoch) = parse_date_and_minutes(parts[0], parts[1]) {
            return Ok(epoch);
        }
    }

    trimmed
        .parse::<Epoch>()
        .map_err(|_| SkywatchError::InvalidDateFormat(trimmed.to_string()))
}

fn parse_date_and_minutes(date: &str, hhmm: &str) -> Option<Epoch> {
    let mut ymd = date.split('-');
    let year: i32 = ymd.next()?.parse().ok()?;
    let month: u8 = ymd.next()?.parse().ok()?;
    let day: u8 = ymd.next()?.parse().ok()?;
    if ymd.next().is_some() {
        return None;
    }

    let (hh, mm) = hhmm.split_once(':')?;
    let hour: u8 = hh.parse().ok()?;
    let minute: u8 = mm.parse().ok()?;

    if month == 0 || month > 12 || day == 0 || day > 31 || hour > 23 || minute > 59 {
        return None;
    }

    Some(Epoch::from_gregorian(
        year,
        month,
        day,
        hour,
        minute,
        0,
        0,
        TimeScale::UTC,
    ))
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// This function implements the IAU 1982/2000 polynomial formula
/// for the mean sidereal time at 0h UT1, plus the fractional-day
/// correction term due to Earth's rotation rate.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale)
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
pub fn gmst(tjm: f64) -> f64 {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    // Extract the integer MJD (0h UT1) and compute centuries since J2000.0
    let itjm = tjm.floor();
    let t = (itjm - T2000) / 36525.0;

    // GMST at 0h UT1 from the polynomial, converted from seconds to radians
    let mut gmst0 = ((C3 * t + C2) * t + C1) * t + C0;
    gmst0 *= DPI / 86400.0;

    // Add the rotation during the fraction of the day, scaled by the
    // sidereal/solar rate ratio
    let h = tjm.fract() * DPI;
    let mut gmst = gmst0 + h * RAP;

    // Normalize to [0, 2π)
    let mut i: i64 = (gmst / DPI).floor() as i64;
    if gmst < 0.0 {
        i -= 1;
    }
    gmst -= i as f64 * DPI;

    gmst
}

/// Greenwich apparent sidereal time in radians: GMST corrected by the
/// equation of the equinoxes.
///
/// UT1 is approximated by UTC here; the sub-second difference amounts to a
/// few milli-degrees of Earth rotation, far below the needs of a visibility
/// filter.
pub fn gast(epoch: &Epoch) -> f64 {
    gmst(epoch.to_mjd_utc_days()) + crate::earth_orientation::equequ(epoch.to_mjd_tt_days())
}
