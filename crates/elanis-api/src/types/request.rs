//! Outbound request description, independent of the HTTP backend.

use std::collections::BTreeMap;
use std::time::Duration;

/// A single request against the API, relative to the configured base URL.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: String,
    pub path: String,
    pub content: RequestContent,
    /// Bearer token attached as `Authorization`; filled in by the client
    /// from the credential store when not set explicitly.
    pub bearer: Option<String>,
    pub extra_headers: BTreeMap<String, String>,
    /// Per-request timeout override.
    pub timeout: Option<Duration>,
    /// Marks the one-shot replay after a token refresh. A request that
    /// carries this flag is never refreshed again.
    pub retried: bool,
}

/// Request body variants the API uses.
#[derive(Clone, Debug)]
pub enum RequestContent {
    Empty,
    Json(serde_json::Value),
    /// Multipart form, used by the registration endpoints.
    Form(Vec<FormField>),
}

#[derive(Clone, Debug)]
pub struct FormField {
    pub name: String,
    pub value: FormValue,
}

#[derive(Clone, Debug)]
pub enum FormValue {
    Text(String),
    File(FileUpload),
}

/// A file attached to a multipart registration form.
#[derive(Clone, Debug)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: bytes::Bytes,
}

impl ApiRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            content: RequestContent::Empty,
            bearer: None,
            extra_headers: BTreeMap::new(),
            timeout: None,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new("GET", path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new("POST", path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new("PUT", path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new("DELETE", path)
    }

    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.content = RequestContent::Json(body);
        self
    }

    pub fn with_form(mut self, fields: Vec<FormField>) -> Self {
        self.content = RequestContent::Form(fields);
        self
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(name.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl FormField {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: FormValue::Text(value.into()),
        }
    }

    pub fn file(name: impl Into<String>, upload: FileUpload) -> Self {
        Self {
            name: name.into(),
            value: FormValue::File(upload),
        }
    }
}
