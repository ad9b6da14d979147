//! Request validation.

mod validation;
pub use validation::RequestValidator;
