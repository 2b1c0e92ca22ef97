use crate::controller::{ControllerError, SelectionError};
use whether_core::{AppError, ReqwestErrorExt, WeatherError};
use whether_forecast::{FetchError, ResourceLoadError};

impl From<ControllerError> for AppError {
    fn from(e: ControllerError) -> Self {
        match e {
            ControllerError::Selection(SelectionError::NothingSelected) => {
                AppError::Weather(WeatherError::NoCitySelected)
            }
            ControllerError::Selection(e) => AppError::Weather(WeatherError::CityNotFound(e.to_string())),
            ControllerError::Fetch(FetchError::Network(e)) => {
                AppError::Network(e.into_network_error())
            }
            ControllerError::Fetch(FetchError::Status(status)) if status >= 500 => {
                AppError::Weather(WeatherError::ServiceUnavailable)
            }
            ControllerError::Fetch(e @ FetchError::Status(_)) => {
                AppError::Weather(WeatherError::ApiError(e.to_string()))
            }
            ControllerError::Fetch(e @ (FetchError::Parse(_) | FetchError::InvalidInit(_))) => {
                AppError::Weather(WeatherError::InvalidResponse(e.to_string()))
            }
            ControllerError::Fetch(e @ FetchError::InvalidEndpoint(_)) => {
                AppError::Weather(WeatherError::ApiError(e.to_string()))
            }
            ControllerError::CityTable(ResourceLoadError::Io { path, source }) => {
                AppError::Weather(WeatherError::CityListUnavailable(format!("{}: {}", path, source)))
            }
            ControllerError::CityTable(ResourceLoadError::Network(e)) => {
                AppError::Network(e.into_network_error())
            }
            ControllerError::CityTable(e) => {
                AppError::Weather(WeatherError::CityListUnavailable(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whether_core::NetworkError;
    use whether_forecast::ForecastClient;

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        let client = ForecastClient::new("http://127.0.0.1:1").unwrap();
        let fetch_error = client.fetch(1.0, 2.0).await.unwrap_err();
        let e = AppError::from(ControllerError::Fetch(fetch_error));

        assert!(matches!(e, AppError::Network(NetworkError::ConnectionFailed(_))));
        assert_eq!(
            e.user_message(),
            "⚠️ Could not load weather forecast. Try again later."
        );
    }

    #[test]
    fn test_server_errors_are_unavailable() {
        let e = AppError::from(ControllerError::Fetch(FetchError::Status(503)));
        assert!(matches!(e, AppError::Weather(WeatherError::ServiceUnavailable)));
    }

    #[test]
    fn test_client_errors_are_api_errors() {
        let e = AppError::from(ControllerError::Fetch(FetchError::Status(404)));
        assert!(matches!(e, AppError::Weather(WeatherError::ApiError(ref m)) if m.contains("404")));
    }

    #[test]
    fn test_bad_payload_is_invalid_response() {
        let e = AppError::from(ControllerError::Fetch(FetchError::InvalidInit("x".into())));
        assert!(matches!(e, AppError::Weather(WeatherError::InvalidResponse(_))));
    }

    #[test]
    fn test_every_fetch_failure_shows_the_same_message() {
        for fetch_error in [
            FetchError::Status(500),
            FetchError::Status(403),
            FetchError::InvalidInit("x".into()),
            FetchError::InvalidEndpoint("y".into()),
        ] {
            let e = AppError::from(ControllerError::Fetch(fetch_error));
            assert_eq!(
                e.user_message(),
                "⚠️ Could not load weather forecast. Try again later."
            );
        }
    }

    #[test]
    fn test_city_table_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let e = AppError::from(ControllerError::CityTable(ResourceLoadError::Io {
            path: "cities.csv".into(),
            source: io,
        }));
        assert!(matches!(
            e,
            AppError::Weather(WeatherError::CityListUnavailable(ref m)) if m.starts_with("cities.csv")
        ));
    }

    #[test]
    fn test_unknown_city() {
        let e = AppError::from(ControllerError::Selection(SelectionError::UnknownCity(
            "Atlantis".into(),
        )));
        assert!(matches!(e, AppError::Weather(WeatherError::CityNotFound(_))));
    }
}
