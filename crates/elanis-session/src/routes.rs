//! Role derivation and dashboard routing.
//!
//! The API has returned the role both as a singular `role` string and as a
//! `roles` list (first entry authoritative); both shapes are normalized
//! here, once, before any routing decision. Roles are recomputed on
//! demand and never stored.

use elanis_api::UserProfile;

pub const CLIENT_DASHBOARD: &str = "/ClientDashboard";
pub const ADMIN_DASHBOARD: &str = "/AdminDashboard";
pub const PROVIDER_DASHBOARD: &str = "/FreelancerDashboard";
pub const HOME: &str = "/";

/// Canonical role derived from the profile's role indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Client,
    Admin,
    Provider,
    Unknown,
}

impl Role {
    /// Case-insensitive synonym match. "claint" is a historical typo the
    /// server actually shipped.
    pub fn parse(raw: &str) -> Role {
        match raw.to_lowercase().as_str() {
            "user" | "client" | "claint" => Role::Client,
            "admin" => Role::Admin,
            "provider" | "freelancer" | "company" => Role::Provider,
            _ => Role::Unknown,
        }
    }

    pub fn of(user: Option<&UserProfile>) -> Role {
        user.and_then(UserProfile::raw_role)
            .map(Role::parse)
            .unwrap_or(Role::Unknown)
    }

    pub fn dashboard_path(self) -> &'static str {
        match self {
            Role::Client => CLIENT_DASHBOARD,
            Role::Admin => ADMIN_DASHBOARD,
            Role::Provider => PROVIDER_DASHBOARD,
            Role::Unknown => HOME,
        }
    }
}

/// Dashboard path for a profile; absent or unrecognized roles land on the
/// default route, never an error.
pub fn dashboard_path(user: Option<&UserProfile>) -> &'static str {
    Role::of(user).dashboard_path()
}

/// Human-readable role label shown next to the user's name.
pub fn role_display(user: Option<&UserProfile>) -> &'static str {
    let Some(raw) = user.and_then(UserProfile::raw_role) else {
        return "";
    };
    match raw.to_lowercase().as_str() {
        "user" | "client" => "Client",
        "admin" => "Admin",
        "provider" | "freelancer" => "Service Provider",
        "company" => "Company",
        _ => "User",
    }
}

/// Display name: "First Last" when both are present, else the first of
/// name/email/username, else "User".
pub fn display_name(user: Option<&UserProfile>) -> String {
    let Some(user) = user else {
        return "User".to_string();
    };

    if let (Some(first), Some(last)) = (user.first_name(), user.last_name()) {
        return format!("{first} {last}");
    }

    user.name()
        .or_else(|| user.email())
        .or_else(|| user.username())
        .unwrap_or("User")
        .to_string()
}
