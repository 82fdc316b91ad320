//! Expiration window parsing for signed links
//!
//! Clients pass the window as a duration string such as `30m`, `2h` or `1h30m`.
//! The accepted grammar is a sequence of decimal numbers, each with an optional
//! fraction and a mandatory unit suffix, preceded by an optional sign.
//! Valid units are `ns`, `us` (or `µs`/`μs`), `ms`, `s`, `m` and `h`.

use std::time::Duration;

use chrono::TimeDelta;
use thiserror::Error;
use tracing::debug;

/// Window used when the client does not ask for one, or asks for one we reject
pub const DEFAULT_EXPIRATION: Duration = Duration::from_secs(15 * 60);

/// Longest window a client may request
pub const MAX_EXPIRATION: Duration = Duration::from_secs(24 * 60 * 60);

/// Largest magnitude a parsed duration may reach, in nanoseconds
const NANOS_LIMIT: u64 = 1 << 63;

/// Errors produced while parsing a duration string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationParseError {
    /// Empty string, or a string holding only a sign
    #[error("empty duration")]
    Empty,

    /// A component is not of the form `<number><unit>`
    #[error("invalid duration: {0:?}")]
    Invalid(String),

    /// A number is not followed by a unit
    #[error("missing unit in duration: {0:?}")]
    MissingUnit(String),

    /// A unit suffix is not recognised
    #[error("unknown unit {unit:?} in duration: {input:?}")]
    UnknownUnit {
        /// The offending unit
        unit: String,
        /// The full input
        input: String,
    },

    /// The value does not fit in a signed 64-bit nanosecond count
    #[error("duration out of range: {0:?}")]
    Overflow(String),
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60 * 1_000_000_000),
        "h" => Some(60 * 60 * 1_000_000_000),
        _ => None,
    }
}

/// Consumes leading ASCII digits. Returns the value and the remainder, or `None` on overflow.
fn leading_int(s: &str) -> Option<(u64, &str)> {
    let end = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u64 = 0;
    for digit in s[..end].bytes() {
        if value > NANOS_LIMIT / 10 {
            return None;
        }
        value = value * 10 + u64::from(digit - b'0');
        if value > NANOS_LIMIT {
            return None;
        }
    }
    Some((value, &s[end..]))
}

/// Consumes leading fraction digits. Digits beyond 64-bit precision are dropped.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let end = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u64 = 0;
    let mut scale = 1.0_f64;
    let mut saturated = false;
    for digit in s[..end].bytes() {
        if saturated {
            continue;
        }
        if value > (NANOS_LIMIT - 1) / 10 {
            saturated = true;
            continue;
        }
        let next = value * 10 + u64::from(digit - b'0');
        if next > NANOS_LIMIT {
            saturated = true;
            continue;
        }
        value = next;
        scale *= 10.0;
    }
    (value, scale, &s[end..])
}

/// Parses a duration string such as `300ms`, `-1.5h` or `2h45m`
///
/// # Errors
///
/// Returns a [`DurationParseError`] when the string is empty, malformed, uses an
/// unknown unit, or overflows a signed 64-bit nanosecond count.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap
)]
pub fn parse_duration(input: &str) -> Result<TimeDelta, DurationParseError> {
    let mut s = input;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }

    if s == "0" {
        return Ok(TimeDelta::zero());
    }
    if s.is_empty() {
        return Err(DurationParseError::Empty);
    }

    let invalid = || DurationParseError::Invalid(input.to_string());
    let overflow = || DurationParseError::Overflow(input.to_string());

    let mut total: u64 = 0;
    while !s.is_empty() {
        if !s.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid());
        }

        let (whole, rest) = leading_int(s).ok_or_else(overflow)?;
        let has_whole = rest.len() != s.len();
        s = rest;

        let mut fraction = 0;
        let mut scale = 1.0;
        let mut has_fraction = false;
        if let Some(rest) = s.strip_prefix('.') {
            let (f, sc, rest_after) = leading_fraction(rest);
            has_fraction = rest_after.len() != rest.len();
            fraction = f;
            scale = sc;
            s = rest_after;
        }
        if !has_whole && !has_fraction {
            return Err(invalid());
        }

        let unit_end = s
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        if unit_end == 0 {
            return Err(DurationParseError::MissingUnit(input.to_string()));
        }
        let (unit, rest) = s.split_at(unit_end);
        s = rest;

        let nanos_per_unit =
            unit_nanos(unit).ok_or_else(|| DurationParseError::UnknownUnit {
                unit: unit.to_string(),
                input: input.to_string(),
            })?;

        if whole > NANOS_LIMIT / nanos_per_unit {
            return Err(overflow());
        }
        let mut component = whole * nanos_per_unit;
        if fraction > 0 {
            component += (fraction as f64 * (nanos_per_unit as f64 / scale)) as u64;
            if component > NANOS_LIMIT {
                return Err(overflow());
            }
        }

        total = total
            .checked_add(component)
            .filter(|t| *t <= NANOS_LIMIT)
            .ok_or_else(overflow)?;
    }

    if negative {
        // NANOS_LIMIT itself maps to i64::MIN
        return Ok(TimeDelta::nanoseconds(total.wrapping_neg() as i64));
    }
    if total > NANOS_LIMIT - 1 {
        return Err(overflow());
    }
    Ok(TimeDelta::nanoseconds(total as i64))
}

/// Resolves the client-supplied `expires_in` value into the window to sign for
///
/// The requested window is used only when it parses and lies in `(0, 24h]`.
/// Anything else falls back to [`DEFAULT_EXPIRATION`] without an error.
#[must_use]
pub fn resolve_expiration(expires_in: Option<&str>) -> Duration {
    let Some(raw) = expires_in.filter(|raw| !raw.is_empty()) else {
        return DEFAULT_EXPIRATION;
    };

    let parsed = match parse_duration(raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("Ignoring expires_in {raw:?}: {e}");
            return DEFAULT_EXPIRATION;
        }
    };

    match parsed.to_std() {
        Ok(window) if !window.is_zero() && window <= MAX_EXPIRATION => window,
        _ => {
            debug!("Ignoring out of range expires_in {raw:?}");
            DEFAULT_EXPIRATION
        }
    }
}
