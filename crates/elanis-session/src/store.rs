//! Durable credential persistence across the two storage areas.

use elanis_api::{CredentialStore, UserProfile};
use elanis_common::{FileArea, MemoryArea, StorageArea};
use tracing::{debug, warn};

/// Storage keys shared by both areas.
pub mod keys {
    /// Canonical access-token key.
    pub const ACCESS_TOKEN: &str = "authToken";
    /// Legacy spelling written by old installs. Read as a fallback and
    /// removed on every clear; never written.
    pub const LEGACY_ACCESS_TOKEN: &str = "token";
    pub const REFRESH_TOKEN: &str = "refreshToken";
    pub const USER_ID: &str = "userId";
    pub const USER_DATA: &str = "userData";

    pub const ALL: [&str; 5] = [
        ACCESS_TOKEN,
        LEGACY_ACCESS_TOKEN,
        REFRESH_TOKEN,
        USER_ID,
        USER_DATA,
    ];
}

/// The credential subset persisted by the token store.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredCredentials {
    pub user: UserProfile,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user_id: Option<String>,
}

impl StoredCredentials {
    /// Derive the persisted subset from a login payload.
    pub fn from_profile(user: UserProfile) -> Self {
        let access_token = user.access_token().map(String::from);
        let refresh_token = user.refresh_token().map(String::from);
        let user_id = user.id().map(String::from);
        Self {
            user,
            access_token,
            refresh_token,
            user_id,
        }
    }
}

/// Credential persistence over a durable ("remember me") area and a
/// process-scoped area. Only one area holds credentials at a time; every
/// write defensively clears both first so no stale copy lingers.
///
/// Nothing in here touches the network, and no expected condition
/// (absence, corruption) escapes as an error.
pub struct TokenStore {
    durable: Box<dyn StorageArea>,
    scoped: Box<dyn StorageArea>,
}

impl TokenStore {
    /// Store over the default locations: the credential file under the
    /// Elanis root, and an in-memory session area.
    pub fn open() -> Self {
        Self::with_areas(
            Box::new(FileArea::default_location()),
            Box::new(MemoryArea::new()),
        )
    }

    pub fn with_areas(durable: Box<dyn StorageArea>, scoped: Box<dyn StorageArea>) -> Self {
        Self { durable, scoped }
    }

    /// Persist credentials into the selected area, wiping both areas first.
    /// Write failures are logged; the in-memory session stays authoritative.
    pub fn save(&self, credentials: &StoredCredentials, persistent: bool) {
        self.remove_known_keys();

        let area = if persistent {
            self.durable.as_ref()
        } else {
            self.scoped.as_ref()
        };

        let mut write = |key: &str, value: &str| {
            if let Err(e) = area.set(key, value) {
                warn!("Failed to persist {key}: {e}");
            }
        };

        if let Some(token) = &credentials.access_token {
            write(keys::ACCESS_TOKEN, token);
        }
        if let Some(token) = &credentials.refresh_token {
            write(keys::REFRESH_TOKEN, token);
        }
        if let Some(id) = &credentials.user_id {
            write(keys::USER_ID, id);
        }
        write(keys::USER_DATA, &credentials.user.to_json());
        debug!(persistent, "Credentials saved");
    }

    /// Recover credentials, durable area taking precedence. A profile blob
    /// that fails to deserialize is treated as corruption: both areas are
    /// wiped and the result is empty.
    pub fn load(&self) -> Option<StoredCredentials> {
        let area = self.active_area()?;

        let raw = area.get(keys::USER_DATA)?;
        // Old builds sometimes wrote the literal string "undefined".
        if raw.is_empty() || raw == "undefined" {
            return None;
        }

        let user = match UserProfile::from_json(&raw) {
            Ok(user) => user,
            Err(e) => {
                warn!("Stored profile is corrupt, wiping credentials: {e}");
                self.clear();
                return None;
            }
        };

        Some(StoredCredentials {
            access_token: self.read_access_token(area),
            refresh_token: area.get(keys::REFRESH_TOKEN),
            user_id: area.get(keys::USER_ID),
            user,
        })
    }

    /// Remove every known credential key from both areas. Idempotent.
    pub fn clear(&self) {
        self.remove_known_keys();
    }

    /// Full teardown for the logout sequence: named-key removal followed
    /// by a blanket clear of both areas, to catch anything not enumerated.
    pub fn purge(&self) {
        self.remove_known_keys();
        self.durable.clear();
        self.scoped.clear();
    }

    /// Re-persist the profile blob after an in-place update, into whichever
    /// area currently holds the session.
    pub fn update_profile(&self, user: &UserProfile) {
        let Some(area) = self.active_area() else {
            return;
        };
        if let Err(e) = area.set(keys::USER_DATA, &user.to_json()) {
            warn!("Failed to update stored profile: {e}");
        }
    }

    fn remove_known_keys(&self) {
        for key in keys::ALL {
            self.durable.remove(key);
            self.scoped.remove(key);
        }
    }

    /// The area currently holding credentials, durable first.
    fn active_area(&self) -> Option<&dyn StorageArea> {
        for area in [self.durable.as_ref(), self.scoped.as_ref()] {
            if area.get(keys::USER_DATA).is_some() || area.get(keys::ACCESS_TOKEN).is_some() {
                return Some(area);
            }
        }
        None
    }

    fn read_access_token(&self, area: &dyn StorageArea) -> Option<String> {
        area.get(keys::ACCESS_TOKEN)
            .or_else(|| area.get(keys::LEGACY_ACCESS_TOKEN))
    }
}

impl CredentialStore for TokenStore {
    fn access_token(&self) -> Option<String> {
        self.read_access_token(self.durable.as_ref())
            .or_else(|| self.read_access_token(self.scoped.as_ref()))
    }

    fn refresh_token(&self) -> Option<String> {
        self.durable
            .get(keys::REFRESH_TOKEN)
            .or_else(|| self.scoped.get(keys::REFRESH_TOKEN))
    }

    fn store_tokens(&self, access_token: &str, refresh_token: &str) {
        let area = self.active_area().unwrap_or(self.durable.as_ref());
        if let Err(e) = area.set(keys::ACCESS_TOKEN, access_token) {
            warn!("Failed to persist rotated access token: {e}");
        }
        if let Err(e) = area.set(keys::REFRESH_TOKEN, refresh_token) {
            warn!("Failed to persist rotated refresh token: {e}");
        }
    }
}
