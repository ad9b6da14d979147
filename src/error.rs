//! Typed errors and the mapping from failures to wire responses.

use crate::response::ApiResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Startup configuration problems. Never turned into a response.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
    #[error("unknown product store '{0}' (expected memory or dynamodb)")]
    UnknownStore(String),
}

/// Failures raised by a record store adapter.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store backend: {0}")]
    Backend(String),
    #[error("corrupt record {id}: {message}")]
    Corrupt { id: String, message: String },
    #[error("record {id} cannot be stored: {message}")]
    Unrepresentable { id: String, message: String },
}

/// One field-level schema violation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Everything a product handler can fail with.
#[derive(Error, Debug)]
pub enum ProductError {
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("validation failed: {} field error(s)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("product id is required")]
    MissingIdentifier,
    #[error("product not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("unexpected: {0}")]
    Unexpected(String),
}

impl ProductError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProductError::MalformedInput(_)
            | ProductError::Validation(_)
            | ProductError::MissingIdentifier => StatusCode::BAD_REQUEST,
            ProductError::NotFound(_) => StatusCode::NOT_FOUND,
            ProductError::Store(_) | ProductError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Status and body for this failure. Server-side detail never reaches the body.
    pub fn classify(&self) -> ApiResponse {
        let body = match self {
            ProductError::MalformedInput(detail) => {
                json!({ "error": format!("invalid request body format: {}", detail) })
            }
            ProductError::Validation(errors) => json!({ "errors": errors }),
            ProductError::MissingIdentifier => json!({ "message": "Product ID is required" }),
            ProductError::NotFound(_) => json!({ "message": "Product not found" }),
            ProductError::Store(_) | ProductError::Unexpected(_) => {
                json!({ "message": "Internal Server Error" })
            }
        };
        ApiResponse::json_value(self.status(), body)
    }

    /// Log the failure with its detail, then classify it.
    pub fn into_api_response(self) -> ApiResponse {
        if self.status().is_server_error() {
            tracing::error!(error = %self, "product request failed");
        } else {
            tracing::warn!(error = %self, "product request rejected");
        }
        self.classify()
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        self.into_api_response().into_response()
    }
}
