use crate::error::{ApiError, Result};
use crate::traits::Network;
use crate::types::{ApiRequest, ApiResponse, FormValue, RequestContent};
use async_trait::async_trait;
use reqwest::Client;

pub struct NativeNetwork {
    client: Client,
}

impl NativeNetwork {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Network for NativeNetwork {
    async fn execute(&self, url: &str, request: ApiRequest) -> Result<ApiResponse> {
        let method = match request.method.to_uppercase().as_str() {
            "POST" => reqwest::Method::POST,
            "PUT" => reqwest::Method::PUT,
            "DELETE" => reqwest::Method::DELETE,
            "PATCH" => reqwest::Method::PATCH,
            _ => reqwest::Method::GET,
        };

        let mut req_builder = self.client.request(method.clone(), url);

        for (k, v) in &request.extra_headers {
            req_builder = req_builder.header(k, v);
        }

        if let Some(token) = &request.bearer {
            req_builder = req_builder.bearer_auth(token);
        }

        if let Some(timeout) = request.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        match request.content {
            RequestContent::Empty => {}
            RequestContent::Json(body) => {
                req_builder = req_builder.json(&body);
            }
            RequestContent::Form(fields) => {
                let mut form = reqwest::multipart::Form::new();
                for field in fields {
                    form = match field.value {
                        FormValue::Text(value) => form.text(field.name, value),
                        FormValue::File(upload) => {
                            let part = reqwest::multipart::Part::bytes(upload.data.to_vec())
                                .file_name(upload.file_name)
                                .mime_str(&upload.content_type)
                                .map_err(|e| ApiError::Config(e.to_string()))?;
                            form.part(field.name, part)
                        }
                    };
                }
                req_builder = req_builder.multipart(form);
            }
        }

        tracing::debug!("[ElanisHTTP-Out] {} {}", method, url);

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout
            } else {
                ApiError::Transport(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let mut headers = std::collections::BTreeMap::new();
        for (k, v) in response.headers() {
            if let Ok(val) = v.to_str() {
                headers.insert(k.as_str().to_string(), val.to_string());
            }
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout
            } else {
                ApiError::Transport(e.to_string())
            }
        })?;

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}
