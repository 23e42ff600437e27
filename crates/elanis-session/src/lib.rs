pub mod logout;
pub mod routes;
pub mod state;
pub mod store;

pub use logout::logout;
pub use routes::Role;
pub use state::{Session, SessionState};
pub use store::{StoredCredentials, TokenStore};
