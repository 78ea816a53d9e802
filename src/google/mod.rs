//! Google Maps Platform adapters.
//!
//! [`GoogleMapsClient`] implements [`Geocoder`](crate::traits::Geocoder),
//! [`DistanceMatrixProvider`](crate::traits::DistanceMatrixProvider) and
//! [`DirectionsProvider`](crate::traits::DirectionsProvider) over the JSON
//! web services, using a blocking HTTP client.
//!
//! # Example
//!
//! ```no_run
//! use trip_planner::google::{GoogleMapsClient, GoogleMapsConfig};
//! use trip_planner::traits::Geocoder;
//!
//! let config = GoogleMapsConfig::from_env()?;
//! let client = GoogleMapsClient::new(config)?;
//! let found = client.geocode("Tower Bridge, London, United Kingdom")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod client;
mod config;
mod response;

pub use client::GoogleMapsClient;
pub use config::{API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_USER_AGENT, GoogleMapsConfig};
