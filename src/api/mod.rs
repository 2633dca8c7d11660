//! API Module
//!
//! HTTP handlers and routing for the snow finder REST API.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Cache statistics
//! - `GET /regions` - Regions where it is snowing
//! - `POST /regions/refresh` - Refresh regions from the data source
//! - `GET /nearby?lat=&lon=&radius=` - Snowing cities near a point
//! - `GET /search?keyword=` - City search by name

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
