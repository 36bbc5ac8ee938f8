//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - The normalization pipeline turning a provider's weather document into
//!   time-indexed series (block extraction, field projection, named accessors)
//! - Timestamp and temperature unit conversions
//! - Configuration handling
//! - Abstractions over the geocoder and the weather API
//!
//! The pipeline is pure and synchronous; only the `fetch` module does I/O.

pub mod accessors;
pub mod config;
pub mod convert;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod series;

pub use accessors::{
    Parameter, daily_max_temperature, daily_min_max_temperature, daily_min_temperature,
    hourly_apparent_temperature, hourly_temperature, project,
};
pub use config::{Config, Units};
pub use convert::{TimeConverter, celsius_to_fahrenheit, fahrenheit_to_celsius};
pub use error::{FetchError, SeriesError};
pub use extract::extract;
pub use fetch::{Fetcher, Geocoder, fetcher_from_config};
pub use model::{BlockName, Field, Location, ObservationRecord, WeatherDocument, WeatherRequest};
pub use series::{Point, SeriesBuilder, TimeSeries};
