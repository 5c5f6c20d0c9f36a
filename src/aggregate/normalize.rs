//! 12-hour to canonical 24-hour time conversion.

use chrono::{NaiveTime, Timelike};
use std::fmt;

/// A time of day in strict zero-padded 24-hour `HH:MM:SS` form.
///
/// Can only be produced by [`normalize`], so holding one guarantees the
/// string is canonical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTime(String);

impl NormalizedTime {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Offset from midnight in milliseconds, the representation used for
    /// averaging. Fixed-reference arithmetic: no timezone or DST involved.
    pub fn millis_from_midnight(&self) -> i64 {
        // Infallible: the constructor already validated the string.
        let t = NaiveTime::parse_from_str(&self.0, "%H:%M:%S").unwrap_or_default();
        i64::from(t.num_seconds_from_midnight()) * 1000
    }
}

impl fmt::Display for NormalizedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Converts a locale-formatted 12-hour clock string (`"6:32:10 AM"`) into a
/// canonical 24-hour time, or `None` for absent or malformed input.
///
/// The modifier is case-sensitive `AM`/`PM`; hours must be 1–12, minutes and
/// seconds exactly two digits below 60. PM adds 12 to any hour but 12, and
/// 12 AM becomes hour 0. Absent input is a recognized no-data case, not an
/// error, and malformed input is rejected rather than passed through.
pub fn normalize(raw: Option<&str>) -> Option<NormalizedTime> {
    let raw = raw?;
    let (time, modifier) = raw.split_once(' ')?;

    let mut parts = time.split(':');
    let (h, m, s) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    if h.is_empty() || h.len() > 2 {
        return None;
    }
    let hour: u32 = h.parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }

    let minute = two_digit(m)?;
    let second = two_digit(s)?;

    let hour = match modifier {
        "PM" if hour != 12 => hour + 12,
        "PM" => 12,
        "AM" if hour == 12 => 0,
        "AM" => hour,
        _ => return None,
    };

    Some(NormalizedTime(format!(
        "{:02}:{:02}:{:02}",
        hour, minute, second
    )))
}

/// Accepts exactly two ASCII digits with value 0–59.
fn two_digit(s: &str) -> Option<u32> {
    if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let v: u32 = s.parse().ok()?;
    (v < 60).then_some(v)
}
