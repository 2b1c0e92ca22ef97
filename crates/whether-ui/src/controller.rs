//! Forecast controller: binds the city list, the forecast client and a view.
//!
//! Every forecast request takes a generation number. When a request
//! completes, its result is applied only if no newer request has been started
//! in the meantime; stale results are dropped.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use whether_core::{AppError, WeatherError};
use whether_forecast::{
    aggregate_daily, load_cities, CityRecord, CitySource, FetchError, ForecastClient,
    ResourceLoadError,
};

use crate::view::SharedView;

/// Selection errors, raised before any request is made
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("No city selected")]
    NothingSelected,
    #[error("No city matches {0:?}")]
    UnknownCity(String),
}

/// Errors surfaced by the controller
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("Forecast fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("City table failed to load: {0}")]
    CityTable(#[from] ResourceLoadError),
}

/// What happened to a forecast request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The view now shows `days` cards
    Rendered { generation: u64, days: usize },
    /// The view now shows the error element
    Failed { generation: u64 },
    /// A newer request was started; the result was dropped
    Superseded { generation: u64 },
}

/// The selectable city list
#[derive(Debug, Clone, Default)]
pub struct CitySelection {
    cities: Vec<CityRecord>,
    selected: Option<usize>,
}

impl CitySelection {
    pub fn new(cities: Vec<CityRecord>) -> Self {
        Self {
            cities,
            selected: None,
        }
    }

    pub fn entries(&self) -> &[CityRecord] {
        &self.cities
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn selected(&self) -> Option<&CityRecord> {
        self.selected.and_then(|index| self.cities.get(index))
    }

    pub fn select(&mut self, index: usize) -> Result<&CityRecord, SelectionError> {
        if index >= self.cities.len() {
            return Err(SelectionError::UnknownCity(index.to_string()));
        }
        self.selected = Some(index);
        Ok(&self.cities[index])
    }

    /// Select by city name or by its "City, Country" label, ignoring case
    pub fn select_by_name(&mut self, query: &str) -> Result<&CityRecord, SelectionError> {
        let query = query.trim();
        let index = self
            .cities
            .iter()
            .position(|city| {
                city.option_label().eq_ignore_ascii_case(query)
                    || city.name.eq_ignore_ascii_case(query)
            })
            .ok_or_else(|| SelectionError::UnknownCity(query.to_string()))?;
        self.select(index)
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

pub struct ForecastController {
    client: ForecastClient,
    view: SharedView,
    selection: Mutex<CitySelection>,
    generation: AtomicU64,
}

impl ForecastController {
    /// Load the city list and bind the controller to its view.
    ///
    /// A city table that cannot be loaded is logged and leaves the selection
    /// empty; it is not reported through the view.
    pub async fn init(source: &CitySource, client: ForecastClient, view: SharedView) -> Self {
        let cities = match load_cities(source).await {
            Ok(cities) => cities,
            Err(e) => {
                let e = ControllerError::from(e);
                tracing::error!("Error loading cities: {}", e);
                Vec::new()
            }
        };

        Self::with_cities(cities, client, view)
    }

    /// Bind a controller to an already loaded city list
    pub fn with_cities(cities: Vec<CityRecord>, client: ForecastClient, view: SharedView) -> Self {
        Self {
            client,
            view,
            selection: Mutex::new(CitySelection::new(cities)),
            generation: AtomicU64::new(0),
        }
    }

    pub fn view(&self) -> SharedView {
        self.view.clone()
    }

    pub fn cities(&self) -> Vec<CityRecord> {
        self.selection.lock().entries().to_vec()
    }

    pub fn selected(&self) -> Option<CityRecord> {
        self.selection.lock().selected().cloned()
    }

    pub fn select(&self, index: usize) -> Result<CityRecord, SelectionError> {
        self.selection.lock().select(index).cloned()
    }

    pub fn select_by_name(&self, query: &str) -> Result<CityRecord, SelectionError> {
        self.selection.lock().select_by_name(query).cloned()
    }

    /// Request a forecast for the selected city
    pub async fn request_forecast(&self) -> Result<RequestOutcome, ControllerError> {
        let city = self.selected().ok_or(SelectionError::NothingSelected)?;
        Ok(self.request_forecast_for(&city).await)
    }

    /// Request a forecast for `city` and render the result.
    ///
    /// Fetch failures are rendered as the error element. A city whose table
    /// row has no usable coordinates fails the same way without a request.
    pub async fn request_forecast_for(&self, city: &CityRecord) -> RequestOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(
            "Requesting forecast #{} for {}",
            generation,
            city.option_label()
        );

        let result = match city.coordinates() {
            Some((latitude, longitude)) => self
                .client
                .fetch(latitude, longitude)
                .await
                .map_err(|e| AppError::from(ControllerError::from(e))),
            None => Err(AppError::from(WeatherError::MissingCoordinates(
                city.option_label(),
            ))),
        };

        // Compare under the view lock so a newer request cannot render in between
        let mut view = self.view.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Dropping result of superseded forecast #{}", generation);
            return RequestOutcome::Superseded { generation };
        }

        match result {
            Ok(series) => {
                let days = aggregate_daily(series.init, &series.points);
                view.render_forecast(&days);
                RequestOutcome::Rendered {
                    generation,
                    days: days.len(),
                }
            }
            Err(e) => {
                tracing::error!("Error fetching forecast: {}", e);
                view.render_error(e.user_message());
                RequestOutcome::Failed { generation }
            }
        }
    }
}
