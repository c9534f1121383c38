use reqwest::StatusCode;

/// Failures talking to the weather provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider returned status {status}: {body}")]
    NotFound { status: StatusCode, body: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("history response contained no forecastday data")]
    EmptyHistory,
}

/// Geolocation failures. Never shown to the user, only logged.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
}

/// The single user-visible error held in view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("Please enter a city name")]
    Validation,
    #[error("City not found. Please try again.")]
    CityNotFound,
    #[error("Unable to get weather for your location.")]
    LocationUnavailable,
    #[error("Historical data not available for this date.")]
    HistoryUnavailable,
}
