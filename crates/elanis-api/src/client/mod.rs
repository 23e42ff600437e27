//! Elanis API client implementation.

mod config;
mod fetch;
pub mod native_network;

pub use config::ClientConfig;
pub use fetch::ApiClient;
