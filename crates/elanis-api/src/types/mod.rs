pub mod account;
pub mod envelope;
pub mod request;
pub mod response;

pub use account::{
    LoginRequest, OtpVerification, PasswordChange, PasswordReset, ProviderRegistration,
    TokenPair, UserProfile, UserRegistration,
};
pub use envelope::ApiEnvelope;
pub use request::{ApiRequest, FileUpload, FormField, FormValue, RequestContent};
pub use response::ApiResponse;
