//! Core library for the `skycast` weather lookup tool.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The WeatherAPI.com client and its error model
//! - The flat [`WeatherRecord`] handed to the renderer
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod model;

pub use client::{DEFAULT_BASE_URL, FetchError, WeatherApiClient};
pub use config::Config;
pub use model::{AUTO_LOCATION, WeatherRecord};
