//! Weekly sunrise/sunset aggregation.
//!
//! This module turns an ordered, possibly-sparse sequence of daily
//! sunrise/sunset observations into one averaged summary per 7-day window,
//! collecting non-fatal data-quality diagnostics instead of logging or
//! aborting.

pub mod normalize;
pub mod types;
pub mod weekly;

pub use normalize::{NormalizedTime, normalize};
pub use types::{AggregateOutcome, DailyRecord, Diagnostic, SunField, WeeklySummary};
pub use weekly::{WeekAccumulator, aggregate};
