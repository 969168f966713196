use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PickerError {
    #[error(
        "invalid coordinate ({lat}, {lng}): latitude must be between -90 and 90, and longitude must be between -180 and 180"
    )]
    InvalidCoordinate { lat: f64, lng: f64 },
}

/// Failure of a single geolocation request. Carries a reason fit for display.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("location unavailable: {0}")]
    Unavailable(String),
    #[error("location provider returned an invalid reading: {0}")]
    InvalidReading(#[from] PickerError),
}
