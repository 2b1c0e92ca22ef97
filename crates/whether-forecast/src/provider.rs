//! 7Timer! `civil` forecast client.
//! One GET per call; no retries, no caching, client-default timeouts.

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::types::{FetchError, ForecastSeries, RawForecastPoint};

const USER_AGENT: &str = concat!("whether/", env!("CARGO_PKG_VERSION"));
const FORECAST_PATH: &str = "bin/civil.php";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    init: String,
    dataseries: Vec<RawForecastPoint>,
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: Url,
}

impl ForecastClient {
    /// Create a client for the service rooted at `base_url`
    /// (e.g. `https://www.7timer.info`).
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| FetchError::InvalidEndpoint(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidEndpoint(base_url.to_string()));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self { client, base_url })
    }

    /// Full request URL for a coordinate pair: metric units, JSON output,
    /// no timezone shift.
    pub fn forecast_url(&self, latitude: f64, longitude: f64) -> Result<Url, FetchError> {
        let mut url = self
            .base_url
            .join(FORECAST_PATH)
            .map_err(|e| FetchError::InvalidEndpoint(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("lon", &longitude.to_string())
            .append_pair("lat", &latitude.to_string())
            .append_pair("ac", "0")
            .append_pair("unit", "metric")
            .append_pair("output", "json")
            .append_pair("tzshift", "0");
        Ok(url)
    }

    /// Fetch the forecast series for a coordinate pair
    pub async fn fetch(&self, latitude: f64, longitude: f64) -> Result<ForecastSeries, FetchError> {
        let url = self.forecast_url(latitude, longitude)?;
        tracing::debug!("Requesting forecast: {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        // 7Timer! does not always label its JSON as such, so decode the text
        let body = response.text().await?;
        let payload: ForecastResponse = serde_json::from_str(&body)?;
        let init = parse_init(&payload.init)?;

        tracing::info!(
            "Fetched {} forecast points from {}",
            payload.dataseries.len(),
            init
        );

        Ok(ForecastSeries {
            init,
            points: payload.dataseries,
        })
    }
}

/// Parse a `YYYYMMDDHH` base timestamp (UTC)
pub fn parse_init(init: &str) -> Result<DateTime<Utc>, FetchError> {
    let invalid = || FetchError::InvalidInit(init.to_string());

    if init.len() != 10 || !init.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let field = |range: std::ops::Range<usize>| init[range].parse::<u32>().map_err(|_| invalid());
    let year = i32::try_from(field(0..4)?).map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, field(4..6)?, field(6..8)?)
        .and_then(|date| date.and_hms_opt(field(8..10).ok()?, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(invalid)
}
