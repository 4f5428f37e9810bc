mod api;
mod config;
mod error;

pub use api::MarketplaceApi;
pub use config::MarketplaceConfig;
pub use error::MarketplaceApiError;
