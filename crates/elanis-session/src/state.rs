//! In-memory session state, hydrated from and persisted through the
//! token store.

use crate::store::{StoredCredentials, TokenStore};
use elanis_api::UserProfile;
use std::sync::Arc;
use tracing::debug;

/// Snapshot of who is logged in.
///
/// Invariant: `is_authenticated` holds exactly when both a profile and a
/// non-empty access token are present.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub user: Option<UserProfile>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user_id: Option<String>,
    pub is_authenticated: bool,
}

impl Session {
    fn from_credentials(credentials: StoredCredentials) -> Self {
        let is_authenticated = !credentials.user.is_empty()
            && credentials
                .access_token
                .as_deref()
                .is_some_and(|t| !t.is_empty());
        Session {
            user: Some(credentials.user),
            access_token: credentials.access_token,
            refresh_token: credentials.refresh_token,
            user_id: credentials.user_id,
            is_authenticated,
        }
    }
}

/// The session reducer: Anonymous and Authenticated are both re-enterable
/// for the lifetime of the process.
pub struct SessionState {
    session: Session,
    store: Arc<TokenStore>,
}

impl SessionState {
    /// Initial state is whatever the token store recovers; an empty or
    /// corrupt store yields the anonymous session.
    pub fn hydrate(store: Arc<TokenStore>) -> Self {
        let session = store
            .load()
            .map(Session::from_credentials)
            .unwrap_or_default();
        debug!(authenticated = session.is_authenticated, "Session hydrated");
        SessionState { session, store }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &Arc<TokenStore> {
        &self.store
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated
    }

    /// Enter the authenticated state from a login payload. A payload
    /// without a profile is ignored. Persistence failures are logged by
    /// the store; the in-memory session updates regardless.
    pub fn login(&mut self, payload: UserProfile, persistent: bool) {
        if payload.is_empty() {
            return;
        }
        let credentials = StoredCredentials::from_profile(payload);
        self.store.save(&credentials, persistent);
        self.session = Session::from_credentials(credentials);
    }

    /// Same contract as [`Self::login`]; kept distinct for the
    /// registration flow.
    pub fn register(&mut self, payload: UserProfile, persistent: bool) {
        self.login(payload, persistent);
    }

    /// Shallow-merge a profile patch (patch fields win) and re-persist.
    /// No-op while anonymous or when the patch is empty.
    pub fn update_user(&mut self, patch: &UserProfile) {
        if !self.session.is_authenticated || patch.is_empty() {
            return;
        }
        if let Some(user) = self.session.user.as_mut() {
            user.merge(patch);
            self.store.update_profile(user);
        }
    }

    /// Unconditional transition to Anonymous. Storage trouble never makes
    /// this fail.
    pub fn logout(&mut self) {
        self.session = Session::default();
        self.store.clear();
        debug!("Session logged out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elanis_common::MemoryArea;

    fn store() -> Arc<TokenStore> {
        Arc::new(TokenStore::with_areas(
            Box::new(MemoryArea::new()),
            Box::new(MemoryArea::new()),
        ))
    }

    fn payload() -> UserProfile {
        UserProfile::from_json(
            r#"{"accessToken":"abc","refreshToken":"r1","id":"u1","firstName":"A","lastName":"B","roles":["Provider"]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_hydrate_empty_store_is_anonymous() {
        let state = SessionState::hydrate(store());
        assert!(!state.is_authenticated());
        assert!(state.session().user.is_none());
    }

    #[test]
    fn test_login_authenticates_and_persists() {
        let store = store();
        let mut state = SessionState::hydrate(store.clone());
        state.login(payload(), true);

        assert!(state.is_authenticated());
        assert_eq!(state.session().access_token.as_deref(), Some("abc"));
        assert_eq!(state.session().user_id.as_deref(), Some("u1"));

        let stored = store.load().unwrap();
        assert_eq!(stored.user, payload());
    }

    #[test]
    fn test_hydrate_recovers_previous_login() {
        let store = store();
        SessionState::hydrate(store.clone()).login(payload(), true);

        let rehydrated = SessionState::hydrate(store);
        assert!(rehydrated.is_authenticated());
        assert_eq!(rehydrated.session().user_id.as_deref(), Some("u1"));
    }

    #[test]
    fn test_login_without_token_is_not_authenticated() {
        let mut state = SessionState::hydrate(store());
        state.login(UserProfile::from_json(r#"{"id":"u1"}"#).unwrap(), false);
        assert!(!state.is_authenticated());
        assert!(state.session().user.is_some());
    }

    #[test]
    fn test_empty_payload_is_ignored() {
        let mut state = SessionState::hydrate(store());
        state.login(UserProfile::default(), false);
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_logout_clears_state_and_store() {
        let store = store();
        let mut state = SessionState::hydrate(store.clone());
        state.login(payload(), true);

        state.logout();
        assert!(!state.is_authenticated());
        assert!(state.session().user.is_none());
        assert!(state.session().access_token.is_none());
        assert!(store.load().is_none());

        // Anonymous is re-enterable; logging out twice is fine.
        state.logout();
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_update_user_merges_and_repersists() {
        let store = store();
        let mut state = SessionState::hydrate(store.clone());
        state.login(payload(), true);

        let patch = UserProfile::from_json(r#"{"firstName":"Z","phone":"123"}"#).unwrap();
        state.update_user(&patch);

        let user = state.session().user.as_ref().unwrap();
        assert_eq!(user.first_name(), Some("Z"));
        assert_eq!(user.last_name(), Some("B"));

        let stored = store.load().unwrap();
        assert_eq!(stored.user.first_name(), Some("Z"));
        assert_eq!(stored.user.str_field("phone"), Some("123"));
    }

    #[test]
    fn test_update_user_noop_while_anonymous() {
        let mut state = SessionState::hydrate(store());
        state.update_user(&UserProfile::from_json(r#"{"firstName":"Z"}"#).unwrap());
        assert!(state.session().user.is_none());
    }

    #[test]
    fn test_register_matches_login_contract() {
        let mut state = SessionState::hydrate(store());
        state.register(payload(), false);
        assert!(state.is_authenticated());
    }
}
