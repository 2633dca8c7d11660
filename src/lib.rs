//! Snow Finder - snowfall lookup service
//!
//! Serves current snow regions from a TTL cache over a pluggable storage
//! backend, ranks snowing cities by distance and normalizes untrusted
//! upstream records.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod geo;
pub mod models;
pub mod services;

pub use api::AppState;
pub use config::Config;
