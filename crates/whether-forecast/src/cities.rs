//! Coordinate table loading.
//!
//! The table is plain comma-separated text: a header line, then
//! `latitude,longitude,city,country` per line. There is no quoting support,
//! and rows are not validated beyond parsing what is there.

use std::path::PathBuf;

use url::Url;

use crate::types::{CityRecord, ResourceLoadError};

/// Where the coordinate table comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CitySource {
    File(PathBuf),
    Url(Url),
}

impl From<&str> for CitySource {
    fn from(source: &str) -> Self {
        let source = source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            if let Ok(url) = Url::parse(source) {
                return Self::Url(url);
            }
        }
        Self::File(PathBuf::from(source))
    }
}

impl std::fmt::Display for CitySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Parse the coordinate table.
///
/// The first line is always treated as a header. Blank lines are skipped.
/// Unparseable coordinates become `None`, missing text fields become empty,
/// and anything after the fourth field is ignored.
pub fn parse_city_table(text: &str) -> Vec<CityRecord> {
    text.lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(parse_row)
        .collect()
}

fn parse_row(line: &str) -> CityRecord {
    let mut fields = line.split(',').map(str::trim);
    let latitude_text = fields.next().unwrap_or_default().to_string();
    let longitude_text = fields.next().unwrap_or_default().to_string();
    let coordinate = |text: &str| text.parse::<f64>().ok().filter(|v| v.is_finite());

    CityRecord {
        latitude: coordinate(&latitude_text),
        longitude: coordinate(&longitude_text),
        latitude_text,
        longitude_text,
        name: fields.next().unwrap_or_default().to_string(),
        country: fields.next().unwrap_or_default().to_string(),
    }
}

/// Fetch and parse the coordinate table
pub async fn load_cities(source: &CitySource) -> Result<Vec<CityRecord>, ResourceLoadError> {
    let text = match source {
        CitySource::File(path) => tokio::fs::read_to_string(path).await.map_err(|err| {
            ResourceLoadError::Io {
                path: path.display().to_string(),
                source: err,
            }
        })?,
        CitySource::Url(url) => {
            let response = reqwest::get(url.clone()).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ResourceLoadError::Status(status.as_u16()));
            }
            response.text().await?
        }
    };

    let cities = parse_city_table(&text);
    tracing::info!("Loaded {} cities from {}", cities.len(), source);
    Ok(cities)
}
