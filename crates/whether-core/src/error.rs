//! Centralized error types for the Whether application.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Message shown in place of the forecast whenever a forecast request fails.
pub const FORECAST_UNAVAILABLE_MESSAGE: &str =
    "⚠️ Could not load weather forecast. Try again later.";

/// Prompt shown when a forecast is requested before a city is chosen.
pub const SELECT_CITY_PROMPT: &str = "Please select a city first!";

/// Top-level application error type.
///
/// Crate-level errors (loader, fetcher, selection) convert into this type.
/// Use `user_message()` to get a display-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    ///
    /// These messages are designed to be actionable and non-technical.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Network(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration not found. Check the path.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// HTTP transport errors.
///
/// The only network call the user waits on is the forecast request, so every
/// kind shares the forecast failure message; the kind itself goes to the log.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_)
            | NetworkError::Timeout
            | NetworkError::ServerError { .. } => FORECAST_UNAVAILABLE_MESSAGE,
        }
    }
}

/// Weather lookup errors, as seen by the presentation layer.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("City list unavailable: {0}")]
    CityListUnavailable(String),

    #[error("No city selected")]
    NoCitySelected,

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("{0} has no usable coordinates")]
    MissingCoordinates(String),

    #[error("Weather API error: {0}")]
    ApiError(String),

    #[error("Invalid forecast response: {0}")]
    InvalidResponse(String),

    #[error("Service unavailable")]
    ServiceUnavailable,
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::CityListUnavailable(_) => "The city list could not be loaded.",
            WeatherError::NoCitySelected => SELECT_CITY_PROMPT,
            WeatherError::CityNotFound(_) => "City not found. Pick one from the list.",
            WeatherError::MissingCoordinates(_)
            | WeatherError::ApiError(_)
            | WeatherError::InvalidResponse(_)
            | WeatherError::ServiceUnavailable => FORECAST_UNAVAILABLE_MESSAGE,
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_user_messages_are_non_empty() {
        let errors: Vec<AppError> = vec![
            ConfigError::Invalid("test".into()).into(),
            WeatherError::NoCitySelected.into(),
            WeatherError::ApiError("500".into()).into(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into(),
            anyhow::anyhow!("boom").into(),
        ];

        for err in errors {
            assert!(!err.user_message().is_empty(), "empty message for {err}");
        }
    }

    #[test]
    fn test_app_error_conversion() {
        let app_err: AppError = WeatherError::ServiceUnavailable.into();
        assert!(matches!(
            app_err,
            AppError::Weather(WeatherError::ServiceUnavailable)
        ));
    }

    #[test]
    fn test_forecast_failures_share_one_message() {
        for err in [
            WeatherError::MissingCoordinates("Atlantis, Sea".into()),
            WeatherError::ApiError("503".into()),
            WeatherError::InvalidResponse("bad json".into()),
            WeatherError::ServiceUnavailable,
        ] {
            assert_eq!(err.user_message(), FORECAST_UNAVAILABLE_MESSAGE);
        }
    }

    #[test]
    fn test_network_errors_share_forecast_message() {
        for err in [
            NetworkError::ConnectionFailed("refused".into()),
            NetworkError::Timeout,
            NetworkError::ServerError {
                status: 502,
                message: "bad gateway".into(),
            },
        ] {
            assert_eq!(AppError::from(err).user_message(), FORECAST_UNAVAILABLE_MESSAGE);
        }
    }

    #[tokio::test]
    async fn test_refused_connection_is_connection_failed() {
        let err = reqwest::get("http://127.0.0.1:1/").await.unwrap_err();
        assert!(matches!(
            err.into_network_error(),
            NetworkError::ConnectionFailed(_)
        ));
    }

    #[tokio::test]
    async fn test_slow_response_is_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        let err = client.get(server.uri()).send().await.unwrap_err();
        assert!(matches!(err.into_network_error(), NetworkError::Timeout));
    }

    #[tokio::test]
    async fn test_error_status_is_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = reqwest::get(server.uri())
            .await
            .unwrap()
            .error_for_status()
            .unwrap_err();
        assert!(matches!(
            err.into_network_error(),
            NetworkError::ServerError { status: 503, .. }
        ));
    }

    #[test]
    fn test_no_selection_prompt() {
        let app_err = AppError::Weather(WeatherError::NoCitySelected);
        assert_eq!(app_err.user_message(), "Please select a city first!");
    }
}
