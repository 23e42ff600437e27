//! The response envelope shared by every Elanis API endpoint.

use crate::error::{ApiError, Result};
use serde::{Deserialize, Serialize};

/// `{succeeded, data, message, errors?}` wrapper around every response body.
///
/// `succeeded == false` is treated the same as an HTTP-level failure for
/// control-flow purposes.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub succeeded: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, turning `succeeded: false` into an error.
    pub fn into_result(self) -> Result<T> {
        if !self.succeeded {
            return Err(ApiError::rejected(self.message, self.errors));
        }
        self.data
            .ok_or_else(|| ApiError::rejected(Some("response contained no data".to_string()), None))
    }

    /// Like [`Self::into_result`] but for endpoints whose payload is irrelevant.
    pub fn into_ack(self) -> Result<()> {
        if !self.succeeded {
            return Err(ApiError::rejected(self.message, self.errors));
        }
        Ok(())
    }
}
