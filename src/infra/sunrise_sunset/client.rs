use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::services::sun_api::SunTimesApi;
use sun_weekly::aggregate::DailyRecord;
use sun_weekly::fetch::{BasicClient, HttpClient, fetch_text};

#[derive(Deserialize)]
struct ApiResponse {
    status: String,
    // Left undecoded until the status is known: error responses carry an
    // empty string here instead of an object.
    results: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct ApiResults {
    sunrise: Option<String>,
    sunset: Option<String>,
}

/// Client for the sunrise-sunset.org JSON API.
///
/// A fixed `tzid` is sent with every request so all times for the year share
/// one timezone and daylight-saving shifts cannot skew the averages.
pub struct SunriseSunsetClient<C: HttpClient> {
    base_url: String,
    tzid: String,
    http: C,
}

impl SunriseSunsetClient<BasicClient> {
    pub fn new(tzid: impl Into<String>) -> Self {
        Self::with_client(BasicClient::new(), tzid)
    }
}

impl<C: HttpClient> SunriseSunsetClient<C> {
    pub fn with_client(http: C, tzid: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.sunrise-sunset.org".to_string(),
            tzid: tzid.into(),
            http,
        }
    }
}

#[async_trait]
impl<C: HttpClient> SunTimesApi for SunriseSunsetClient<C> {
    async fn day_times(
        &self,
        lat: f64,
        lng: f64,
        date: NaiveDate,
    ) -> Result<Option<DailyRecord>> {
        let url = format!(
            "{}/json?lat={}&lng={}&date={}&tzid={}",
            self.base_url,
            lat,
            lng,
            date.format("%Y-%m-%d"),
            self.tzid
        );

        let body = fetch_text(&self.http, &url).await?;
        parse_day_response(&body)
    }
}

/// Decodes one day's API response body.
///
/// A parseable body with a non-OK status is valid "no data" (`Ok(None)`), per
/// the API contract; undecodable bodies are errors.
fn parse_day_response(body: &str) -> Result<Option<DailyRecord>> {
    let resp: ApiResponse = serde_json::from_str(body)?;
    if resp.status != "OK" {
        return Ok(None);
    }
    let results: Option<ApiResults> = resp
        .results
        .map(serde_json::from_value)
        .transpose()?;
    Ok(results.map(|r| DailyRecord {
        sunrise: r.sunrise,
        sunset: r.sunset,
    }))
}
