//! Presentation layer for Whether: the forecast strip view and the
//! controller that binds a city list, a forecast client and a view.

pub mod controller;
pub mod error_mapping;
pub mod view;

pub use controller::{
    CitySelection, ControllerError, ForecastController, RequestOutcome, SelectionError,
};
pub use view::{ForecastCard, ForecastView, SharedView, ViewNode};
