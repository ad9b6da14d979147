//! The product record as stored and returned on the wire.

use serde::{Deserialize, Serialize};

/// Wire and storage name of the key attribute.
pub const PRODUCT_ID: &str = "productID";
pub const NAME: &str = "name";
pub const DESCRIPTION: &str = "description";
pub const PRICE: &str = "price";
pub const AVAILABLE: &str = "available";

/// One stored product. `product_id` is assigned by the server on create and never changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "productID")]
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub available: bool,
}

/// Client-supplied fields that passed validation but have no id yet.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub available: bool,
}

impl ProductDraft {
    /// Attach the key. Any id the client put in the body was already dropped during validation.
    pub fn with_id(self, product_id: impl Into<String>) -> Product {
        Product {
            product_id: product_id.into(),
            name: self.name,
            description: self.description,
            price: self.price,
            available: self.available,
        }
    }
}
