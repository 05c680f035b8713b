//! Core library for the `clima` weather client.
//!
//! This crate defines:
//! - The current-weather fetch flow against the OpenWeather API
//! - Typed transport and decode failures
//! - Configuration & credentials handling
//! - Shared domain models (queries, results)
//!
//! It is used by `clima-cli`, but any presentation layer can drive it through
//! [`WeatherClient`] and [`WeatherDelegate`].

pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod model;
pub mod transport;

pub use client::{DEFAULT_BASE_URL, WeatherClient, WeatherDelegate};
pub use config::Config;
pub use error::{DecodeError, FetchError, TransportError};
pub use model::{Condition, WeatherQuery, WeatherResult};
pub use reqwest::Url;
pub use transport::{HttpResponse, HttpTransport, Transport};
