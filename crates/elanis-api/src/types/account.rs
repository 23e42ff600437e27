//! Account endpoint payloads.

use crate::types::request::{FileUpload, FormField};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// User profile blob as returned by the server.
///
/// The API has shipped several shapes over time (singular `role` vs a
/// `roles` list, `id` vs `userId`, token fields mixed into the profile),
/// so the profile stays an opaque JSON object with typed accessors rather
/// than a fixed struct. Login responses are stored whole as the profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(pub serde_json::Map<String, Value>);

impl UserProfile {
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(UserProfile(map)),
            _ => None,
        }
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// User identifier: `id`, falling back to `userId`.
    pub fn id(&self) -> Option<&str> {
        self.str_field("id").or_else(|| self.str_field("userId"))
    }

    /// Access token as embedded in login payloads: `accessToken`,
    /// falling back to the legacy `token` spelling.
    pub fn access_token(&self) -> Option<&str> {
        self.str_field("accessToken")
            .or_else(|| self.str_field("token"))
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.str_field("refreshToken")
    }

    /// Raw role indicator: first entry of `roles` if present, else the
    /// singular `role` field.
    pub fn raw_role(&self) -> Option<&str> {
        self.0
            .get("roles")
            .and_then(Value::as_array)
            .and_then(|roles| roles.first())
            .and_then(Value::as_str)
            .or_else(|| self.str_field("role"))
    }

    pub fn first_name(&self) -> Option<&str> {
        self.str_field("firstName")
    }

    pub fn last_name(&self) -> Option<&str> {
        self.str_field("lastName")
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn email(&self) -> Option<&str> {
        self.str_field("email")
    }

    pub fn username(&self) -> Option<&str> {
        self.str_field("username")
    }

    /// Shallow merge: fields from `patch` win, everything else is kept.
    pub fn merge(&mut self, patch: &UserProfile) {
        for (key, value) in &patch.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }
}

/// New access/refresh pair from `POST /Account/refresh-token`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Body of `POST /Account/login`. Either an email or a phone number
/// identifies the account.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub password: String,
}

impl LoginRequest {
    pub fn with_email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            phone_number: None,
            password: password.into(),
        }
    }

    pub fn with_phone(phone_number: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: None,
            phone_number: Some(phone_number.into()),
            password: password.into(),
        }
    }
}

/// Multipart body of `POST /Account/register-user`.
#[derive(Clone, Debug, Default)]
pub struct UserRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub password: String,
    pub profile_image: Option<FileUpload>,
}

impl UserRegistration {
    pub fn into_form(self) -> Vec<FormField> {
        let mut fields = vec![
            FormField::text("firstName", self.first_name),
            FormField::text("lastName", self.last_name),
            FormField::text("email", self.email),
            FormField::text("password", self.password),
        ];
        if let Some(phone) = self.phone_number {
            fields.push(FormField::text("phoneNumber", phone));
        }
        if let Some(image) = self.profile_image {
            fields.push(FormField::file("profileImage", image));
        }
        fields
    }
}

/// Multipart body of `POST /Account/register-service-provider`.
///
/// Category ids are appended as repeated `selectedCategoryIds` fields;
/// the id document and certificate travel as file parts.
#[derive(Clone, Debug, Default)]
pub struct ProviderRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub password: String,
    pub hourly_rate: Option<f64>,
    pub selected_category_ids: Vec<String>,
    pub id_document: Option<FileUpload>,
    pub certificate: Option<FileUpload>,
}

impl ProviderRegistration {
    pub fn into_form(self) -> Vec<FormField> {
        let mut fields = vec![
            FormField::text("firstName", self.first_name),
            FormField::text("lastName", self.last_name),
            FormField::text("email", self.email),
            FormField::text("password", self.password),
        ];
        if let Some(phone) = self.phone_number {
            fields.push(FormField::text("phoneNumber", phone));
        }
        if let Some(rate) = self.hourly_rate {
            fields.push(FormField::text("hourlyRate", rate.to_string()));
        }
        for category_id in self.selected_category_ids {
            fields.push(FormField::text("selectedCategoryIds", category_id));
        }
        if let Some(doc) = self.id_document {
            fields.push(FormField::file("idDocument", doc));
        }
        if let Some(cert) = self.certificate {
            fields.push(FormField::file("certificate", cert));
        }
        fields
    }
}

/// Body of `POST /Account/reset-password`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordReset {
    pub email: String,
    pub token: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Body of `POST /Account/change-password` (requires a bearer token).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Body of `POST /Account/verify-otp`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerification {
    pub email: String,
    pub otp: String,
}
