//! Forecast domain for Whether
//!
//! Loads the city coordinate table, fetches 7Timer! forecast series and
//! condenses them into a strip of daily summaries.

pub mod aggregate;
pub mod cities;
pub mod condition;
pub mod provider;
pub mod types;

pub use aggregate::{aggregate_daily, FORECAST_DAYS};
pub use cities::{load_cities, parse_city_table, CitySource};
pub use condition::{normalize_token, Condition, ConditionDisplay, NormalizationWarning};
pub use provider::{parse_init, ForecastClient};
pub use types::*;
