//! HTTP response capture plus envelope helpers.

use crate::error::{ApiError, Result};
use crate::types::ApiEnvelope;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// Raw response as returned by the network layer.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        ApiResponse {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON without envelope handling.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Unwrap the standard envelope, mapping HTTP failures and
    /// `succeeded: false` into errors.
    pub fn envelope<T: DeserializeOwned>(&self) -> Result<T> {
        self.check_status()?;
        self.json::<ApiEnvelope<T>>()?.into_result()
    }

    /// Envelope handling for endpoints whose payload does not matter.
    pub fn ack(&self) -> Result<()> {
        self.check_status()?;
        self.json::<ApiEnvelope<serde_json::Value>>()?.into_ack()
    }

    fn check_status(&self) -> Result<()> {
        if self.is_success() {
            return Ok(());
        }
        let message = self.server_message();
        if self.status == 401 {
            return Err(ApiError::AuthenticationFailed(message));
        }
        Err(ApiError::Http {
            status: self.status,
            message,
        })
    }

    /// Best-effort extraction of the server's `message` field for error text.
    fn server_message(&self) -> String {
        serde_json::from_slice::<ApiEnvelope<serde_json::Value>>(&self.body)
            .ok()
            .and_then(|env| env.message)
            .unwrap_or_else(|| String::from_utf8_lossy(&self.body).into_owned())
    }
}
