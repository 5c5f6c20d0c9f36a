//! Ordered, bounded-concurrency retrieval of a full calendar year.

use crate::services::sun_api::SunTimesApi;
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;
use sun_weekly::aggregate::DailyRecord;
use tracing::{Instrument, debug, warn};

/// Every calendar day of `year` in date order (365 or 366 entries).
pub fn days_of_year(year: i32) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(366);
    let mut date = NaiveDate::from_ymd_opt(year, 1, 1);
    while let Some(d) = date.filter(|d| d.year() == year) {
        days.push(d);
        date = d.succ_opt();
    }
    days
}

/// Fetches one record per calendar day of `year`, at most `concurrency` days
/// in flight at a time.
///
/// The returned sequence is in date order regardless of completion order. A
/// day whose fetch errored degrades to an absent record so one bad day never
/// aborts the year.
#[tracing::instrument(skip(api), fields(lat, lng, year, concurrency))]
pub async fn fetch_year<A>(
    api: Arc<A>,
    lat: f64,
    lng: f64,
    year: i32,
    concurrency: usize,
) -> Vec<Option<DailyRecord>>
where
    A: SunTimesApi + 'static,
{
    let dates = days_of_year(year);
    let semaphore = Arc::new(tokio::sync::Semaphore::new(concurrency.max(1)));

    let mut tasks = Vec::with_capacity(dates.len());
    for date in dates {
        let sem = semaphore.clone();
        let api = api.clone();

        let day_span = tracing::info_span!("fetch_day", date = %date);
        tasks.push(tokio::spawn(
            async move {
                let _permit = sem.acquire().await.unwrap();
                match api.day_times(lat, lng, date).await {
                    Ok(record) => {
                        debug!(present = record.is_some(), "Day fetched");
                        record
                    }
                    Err(e) => {
                        warn!(error = %e, "Day fetch failed");
                        None
                    }
                }
            }
            .instrument(day_span),
        ));
    }

    // Awaiting in spawn order keeps the output sequence in date order.
    let mut records = Vec::with_capacity(tasks.len());
    for task in tasks {
        records.push(task.await.unwrap_or_else(|e| {
            warn!(error = %e, "Day fetch task panicked");
            None
        }));
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use chrono::Datelike;

    #[test]
    fn test_days_of_year_lengths() {
        assert_eq!(days_of_year(2023).len(), 365);
        assert_eq!(days_of_year(2024).len(), 366);
        // Century rule: divisible by 100 but not 400 is not a leap year.
        assert_eq!(days_of_year(1900).len(), 365);
        assert_eq!(days_of_year(2000).len(), 366);
    }

    #[test]
    fn test_days_of_year_is_ordered_and_bounded() {
        let days = days_of_year(2023);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(*days.last().unwrap(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert!(days.windows(2).all(|w| w[0] < w[1]));
    }

    /// Answers from a fixed schedule: errors on the 3rd of each month, no
    /// data on the 5th, otherwise a record tagged with the day-of-month.
    struct ScheduleApi;

    #[async_trait::async_trait]
    impl SunTimesApi for ScheduleApi {
        async fn day_times(
            &self,
            _lat: f64,
            _lng: f64,
            date: NaiveDate,
        ) -> Result<Option<DailyRecord>> {
            match date.day() {
                3 => Err(anyhow!("transport error")),
                5 => Ok(None),
                d => Ok(Some(DailyRecord {
                    sunrise: Some(format!("{}:00:00 AM", (d % 11) + 1)),
                    sunset: None,
                })),
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_year_preserves_order_and_degrades_errors() {
        let records = fetch_year(Arc::new(ScheduleApi), -41.0, 174.0, 2023, 4).await;

        assert_eq!(records.len(), 365);
        // Jan 3 errored, Jan 5 had no data; both are absent.
        assert!(records[2].is_none());
        assert!(records[4].is_none());
        // Jan 1 and Jan 2 line up with their dates.
        assert_eq!(
            records[0].as_ref().unwrap().sunrise.as_deref(),
            Some("2:00:00 AM")
        );
        assert_eq!(
            records[1].as_ref().unwrap().sunrise.as_deref(),
            Some("3:00:00 AM")
        );
    }
}
