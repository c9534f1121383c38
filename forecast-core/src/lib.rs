//! Core library for the `forecast` viewer.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weatherapi.com provider behind the `WeatherProvider` trait
//! - Shared domain models and the derived air-quality index
//! - `ForecastViewController`, which owns view state and drives the provider
//!
//! It is used by `forecast-cli`, but any other front end can drive the controller.

pub mod aqi;
pub mod config;
pub mod controller;
pub mod error;
pub mod geolocation;
pub mod model;
pub mod provider;

pub use aqi::{AqiCategory, AqiResult, compute_aqi};
pub use config::Config;
pub use controller::{ForecastViewController, Theme, ViewState};
pub use error::{LocationError, ProviderError, ViewError};
pub use geolocation::{FixedPosition, GeolocationSource, NoGeolocation};
pub use model::{
    AirQuality, Condition, Coordinates, CurrentConditions, ForecastDay, HistorySnapshot,
    HourRecord, Location, SuggestionEntry, WeatherSnapshot,
};
pub use provider::{WeatherProvider, provider_from_config};
