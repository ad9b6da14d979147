//! Response shape produced by the handlers: status, headers, serialized body.

use crate::error::ProductError;
use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::collections::BTreeMap;

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// HTTP-style result of one handler invocation. An empty `body` means no content.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status_code: StatusCode,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    /// JSON body from an already-built value. Sets `content-type`.
    pub fn json_value(status_code: StatusCode, body: serde_json::Value) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(header::CONTENT_TYPE.as_str().to_string(), CONTENT_TYPE_JSON.to_string());
        Self {
            status_code,
            headers,
            body: body.to_string(),
        }
    }

    pub fn json<T: Serialize>(status_code: StatusCode, data: &T) -> Result<Self, ProductError> {
        let value = serde_json::to_value(data)
            .map_err(|e| ProductError::Unexpected(format!("serialize response: {}", e)))?;
        Ok(Self::json_value(status_code, value))
    }

    pub fn no_content() -> Self {
        Self {
            status_code: StatusCode::NO_CONTENT,
            headers: BTreeMap::new(),
            body: String::new(),
        }
    }

    /// Parse the body back into JSON. `Value::Null` when there is no body.
    pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        if self.body.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&self.body)
    }
}

pub fn created<T: Serialize>(data: &T) -> Result<ApiResponse, ProductError> {
    ApiResponse::json(StatusCode::CREATED, data)
}

pub fn ok<T: Serialize>(data: &T) -> Result<ApiResponse, ProductError> {
    ApiResponse::json(StatusCode::OK, data)
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status_code;
        let headers = response.headers_mut();
        for (name, value) in self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(&value),
            ) {
                (Ok(n), Ok(v)) => {
                    headers.insert(n, v);
                }
                _ => tracing::warn!(header = %name, "dropping header that is not valid HTTP"),
            }
        }
        response
    }
}
