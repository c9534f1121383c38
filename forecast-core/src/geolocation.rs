//! One-shot position sources consulted at startup.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::LocationError, model::Coordinates};

#[async_trait]
pub trait GeolocationSource: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// A position known up front (command line flags or the config `home` entry).
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

#[async_trait]
impl GeolocationSource for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// No position available on this host.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

#[async_trait]
impl GeolocationSource for NoGeolocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::ServiceUnavailable)
    }
}

/// Pick the startup source: an explicit position first, then `home`, else nothing.
pub fn source_for(
    explicit: Option<Coordinates>,
    home: Option<Coordinates>,
) -> Box<dyn GeolocationSource> {
    match explicit.or(home) {
        Some(coords) => Box::new(FixedPosition(coords)),
        None => Box::new(NoGeolocation),
    }
}
