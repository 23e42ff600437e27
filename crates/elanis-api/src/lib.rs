pub mod account;
pub mod client;
pub mod error;
pub mod paths;
pub mod traits;
pub mod types;

pub use client::{ApiClient, ClientConfig};
pub use error::{ApiError, Result};
pub use traits::{CredentialStore, Network};
pub use types::{ApiEnvelope, ApiRequest, ApiResponse, LoginRequest, TokenPair, UserProfile};
