//! Schema validation for product bodies.

use crate::error::{FieldError, ProductError};
use crate::model::{ProductDraft, AVAILABLE, DESCRIPTION, NAME, PRICE};
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Check every schema field and report all violations at once.
    /// Fields outside the schema, including any client `productID`, are dropped.
    pub fn validate(body: &Map<String, Value>) -> Result<ProductDraft, ProductError> {
        let mut errors = Vec::new();

        let name = non_empty_string(body, NAME, &mut errors);
        let description = non_empty_string(body, DESCRIPTION, &mut errors);
        let price = number(body, PRICE, &mut errors);
        let available = boolean(body, AVAILABLE, &mut errors);

        match (name, description, price, available) {
            (Some(name), Some(description), Some(price), Some(available)) if errors.is_empty() => {
                Ok(ProductDraft {
                    name,
                    description,
                    price,
                    available,
                })
            }
            _ => Err(ProductError::Validation(errors)),
        }
    }
}

fn non_empty_string(
    body: &Map<String, Value>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(field, format!("{} is required", field)));
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            errors.push(FieldError::new(field, format!("{} must not be empty", field)));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::new(field, format!("{} must be a string", field)));
            None
        }
    }
}

fn number(body: &Map<String, Value>, field: &'static str, errors: &mut Vec<FieldError>) -> Option<f64> {
    match body.get(field) {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(field, format!("{} is required", field)));
            None
        }
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if f.is_finite() => Some(f),
            _ => {
                errors.push(FieldError::new(field, format!("{} must be a finite number", field)));
                None
            }
        },
        Some(_) => {
            errors.push(FieldError::new(field, format!("{} must be a number", field)));
            None
        }
    }
}

fn boolean(body: &Map<String, Value>, field: &'static str, errors: &mut Vec<FieldError>) -> Option<bool> {
    match body.get(field) {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(field, format!("{} is required", field)));
            None
        }
        Some(Value::Bool(b)) => Some(*b),
        Some(_) => {
            errors.push(FieldError::new(field, format!("{} must be a boolean", field)));
            None
        }
    }
}
