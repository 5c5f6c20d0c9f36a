//! Data types used by the aggregation pipeline.

use serde::{Deserialize, Serialize};

/// One day's raw sunrise/sunset observation as returned by the API.
///
/// A day whose fetch failed or returned a non-OK status is represented as
/// `None` in the input sequence, not as a `DailyRecord` with empty fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRecord {
    /// 12-hour clock string with AM/PM modifier, e.g. `"6:32:10 AM"`.
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

/// Which of the two observed times a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SunField {
    Sunrise,
    Sunset,
}

impl SunField {
    pub fn as_str(self) -> &'static str {
        match self {
            SunField::Sunrise => "sunrise",
            SunField::Sunset => "sunset",
        }
    }
}

/// Non-fatal data-quality findings surfaced by the aggregator.
///
/// Missing records are excluded silently; these cover present-but-bad data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A record's time string failed normalization and was excluded from the
    /// week's average.
    InvalidTimeFormat {
        week: u32,
        field: SunField,
        raw: Option<String>,
    },
    /// A week had present records but zero valid contributors for this field,
    /// so the whole week was dropped.
    EmptyAverage { week: u32, field: SunField },
}

/// Averaged times for one 7-day window.
///
/// `week` is 1-based and positional: it is derived from where the window sat
/// in the input sequence, so dropped weeks leave gaps in the numbering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub week: u32,
    /// Minute-precision 24-hour time, e.g. `"06:32"`.
    pub avg_sunrise: String,
    pub avg_sunset: String,
}

/// Result of aggregating a full input sequence: the emitted summaries plus
/// every non-fatal diagnostic encountered, in occurrence order.
#[derive(Debug, Default)]
pub struct AggregateOutcome {
    pub weeks: Vec<WeeklySummary>,
    pub diagnostics: Vec<Diagnostic>,
}
