//! Core library for the `skycast` weather lookup tool.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather HTTP client (geocoding, current conditions, forecast)
//! - Shared domain models and the chart window derivations
//! - The search session state machine driven by the CLI
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or
//! services.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod session;

pub use client::OpenWeatherClient;
pub use config::Config;
pub use error::FetchError;
pub use model::{Coordinates, WeatherBundle, WeatherReading};
pub use session::{SearchSession, SearchState, WeatherApi};
