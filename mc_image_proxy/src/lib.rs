//! # MerchantConnect image proxy
//! Product images live on the marketplace backend, which is not normally reachable from browsers. This server relays
//! image requests to the backend's image store and adds caching and CORS headers to the response.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/api/images/{path}`: Fetches `{path}` from the backend image store.
pub mod cli;
pub mod config;
pub mod errors;
pub mod image_source;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
