//! Active Directory timestamps (100ns ticks since 1601-01-01T00:00:00)

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use tracing::debug;

use crate::error::{DecodeError, DecodeResult};

const TICKS_PER_SECOND: i64 = 10_000_000;
const TICKS_PER_MICRO: i64 = 10;

/// Latest year rendered; `accountExpires` uses i64::MAX for "never"
const MAX_YEAR: i32 = 9999;

fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1601, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

/// Convert a tick count to a calendar instant with microsecond precision.
///
/// The sub-microsecond digit is rounded half to even.
pub fn ticks_to_datetime(ticks: i64) -> DecodeResult<NaiveDateTime> {
    let seconds = ticks.div_euclid(TICKS_PER_SECOND);
    let remainder = ticks.rem_euclid(TICKS_PER_SECOND);

    let mut micros = remainder / TICKS_PER_MICRO;
    let residue = remainder % TICKS_PER_MICRO;
    if residue > 5 || (residue == 5 && micros % 2 == 1) {
        micros += 1;
    }

    let offset = TimeDelta::try_seconds(seconds)
        .and_then(|s| s.checked_add(&TimeDelta::microseconds(micros)))
        .ok_or(DecodeError::OutOfRange(ticks))?;
    let instant = epoch()
        .checked_add_signed(offset)
        .ok_or(DecodeError::OutOfRange(ticks))?;

    if !(1..=MAX_YEAR).contains(&instant.year()) {
        return Err(DecodeError::OutOfRange(ticks));
    }
    Ok(instant)
}

/// ISO-8601 rendering, fractional seconds only when non-zero
pub fn format_iso8601(instant: &NaiveDateTime) -> String {
    if instant.nanosecond() == 0 {
        instant.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        instant.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Decode a tick count string.
///
/// `Ok(None)` means the value is zero, which AD uses for "never set".
pub fn decode_ticks(value: &str) -> DecodeResult<Option<String>> {
    let ticks: i64 = value.trim().parse()?;
    if ticks == 0 {
        return Ok(None);
    }
    Ok(Some(format_iso8601(&ticks_to_datetime(ticks)?)))
}

/// Render a timestamp attribute; anything that is not a usable tick count
/// (including zero) is returned unchanged.
pub fn decode_timestamp(value: &str) -> String {
    match decode_ticks(value) {
        Ok(Some(iso)) => iso,
        Ok(None) => value.to_string(),
        Err(e) => {
            debug!("Keeping timestamp {:?}: {}", value, e);
            value.to_string()
        }
    }
}
