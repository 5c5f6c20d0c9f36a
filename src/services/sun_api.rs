//! Trait for providers of daily sunrise/sunset observations.

use anyhow::Result;
use chrono::NaiveDate;
use sun_weekly::aggregate::DailyRecord;

/// Abstraction over a sunrise/sunset data provider (e.g. sunrise-sunset.org).
#[async_trait::async_trait]
pub trait SunTimesApi: Send + Sync {
    /// Returns one day's observation for the coordinate.
    ///
    /// `Ok(None)` means the provider answered but had no data for the day
    /// (non-OK status); transport and decode failures are `Err`.
    async fn day_times(&self, lat: f64, lng: f64, date: NaiveDate)
    -> Result<Option<DailyRecord>>;
}
