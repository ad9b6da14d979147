//! Request shape handed to the handlers by the deployment layer.

use crate::error::ProductError;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Path parameter carrying the product id.
pub const ID_PARAM: &str = "id";

/// One incoming request: path parameters and the raw, still-undecoded body bytes.
#[derive(Clone, Debug, Default)]
pub struct ApiRequest {
    pub path_parameters: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.path_parameters.insert(ID_PARAM.to_string(), id.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// The `id` path parameter. Absent or empty is `MissingIdentifier`.
    pub fn require_id(&self) -> Result<&str, ProductError> {
        self.path_parameters
            .get(ID_PARAM)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .ok_or(ProductError::MissingIdentifier)
    }

    /// Decode and parse the body as a JSON object. Invalid UTF-8, bad JSON and
    /// non-object values are all `MalformedInput`.
    pub fn json_object(&self) -> Result<Map<String, Value>, ProductError> {
        let raw = self
            .body
            .as_deref()
            .ok_or_else(|| ProductError::MalformedInput("missing request body".into()))?;
        match serde_json::from_slice::<Value>(raw) {
            Ok(Value::Object(m)) => Ok(m),
            Ok(_) => Err(ProductError::MalformedInput("expected a JSON object".into())),
            Err(e) => Err(ProductError::MalformedInput(e.to_string())),
        }
    }
}
