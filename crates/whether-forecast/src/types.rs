use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One row of the coordinate table.
///
/// Coordinates that fail to parse are kept as `None` rather than rejecting
/// the row; the field text is kept as written either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Latitude field as it appears in the table
    pub latitude_text: String,
    pub longitude_text: String,
    pub name: String,
    pub country: String,
}

impl CityRecord {
    /// Both coordinates, if the row carried usable numbers
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    /// Text shown for this city in a selection list, e.g. "Paris, France"
    pub fn option_label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }

    /// Value carried by the selection entry: the "lat,lon" text from the table
    pub fn option_value(&self) -> String {
        format!("{},{}", self.latitude_text, self.longitude_text)
    }
}

/// A single entry of the forecast `dataseries`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecastPoint {
    /// Hours after the series' base timestamp
    #[serde(rename = "timepoint")]
    pub offset_hours: u32,
    /// Air temperature at 2m, °C
    #[serde(rename = "temp2m")]
    pub temperature: f64,
    #[serde(default)]
    pub weather: Option<String>,
    #[serde(default)]
    pub prec_type: Option<String>,
}

impl RawForecastPoint {
    /// Condition token used to describe this point.
    ///
    /// Falls back from `weather` to `prec_type` to `"clear"`; empty strings
    /// count as absent.
    pub fn condition_token(&self) -> &str {
        [self.weather.as_deref(), self.prec_type.as_deref()]
            .into_iter()
            .flatten()
            .find(|token| !token.is_empty())
            .unwrap_or("clear")
    }
}

/// A decoded forecast: base timestamp plus its points in arrival order
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    pub init: DateTime<Utc>,
    pub points: Vec<RawForecastPoint>,
}

impl ForecastSeries {
    /// Condense the series into daily summaries
    pub fn daily(&self) -> Vec<DailySummary> {
        crate::aggregate_daily(self.init, &self.points)
    }
}

/// Summary of one UTC calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub min_temp: f64,
    pub max_temp: f64,
    /// Raw condition token of the point chosen to represent the day
    pub condition: String,
}

/// Errors loading the coordinate table
#[derive(Debug, thiserror::Error)]
pub enum ResourceLoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("City table request returned status {0}")]
    Status(u16),
}

/// Forecast fetch errors
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Forecast request returned status {0}")]
    Status(u16),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid base timestamp: {0:?}")]
    InvalidInit(String),
    #[error("Invalid forecast endpoint: {0}")]
    InvalidEndpoint(String),
}
