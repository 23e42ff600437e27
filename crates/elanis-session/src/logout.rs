//! The logout sequence: best-effort server notification, then guaranteed
//! local teardown.

use crate::routes;
use crate::state::SessionState;
use elanis_api::ApiClient;
use std::time::Duration;
use tracing::{debug, warn};

/// Log out and tear down every trace of the session.
///
/// The server notification is bounded by the client's logout timeout and
/// every failure is swallowed; nothing on the network path can keep the
/// local teardown from running. Always concludes in the anonymous state
/// and returns the home route for the caller to navigate to.
pub async fn logout(api: &ApiClient, state: &mut SessionState) -> &'static str {
    if let Some(token) = state.session().access_token.clone() {
        let timeout = Duration::from_millis(api.config().logout_timeout_ms);
        match tokio::time::timeout(timeout, api.notify_logout(&token)).await {
            Ok(Ok(())) => debug!("Server acknowledged logout"),
            Ok(Err(e)) => warn!("Logout notification failed: {e}"),
            Err(_) => warn!("Logout notification timed out"),
        }
    }

    let store = state.store().clone();
    state.logout();
    // Named-key removal happened in the reducer; sweep both areas for
    // anything not enumerated.
    store.purge();

    routes::HOME
}
