//! Product API: stateless create, read, update, delete and list handlers over a key-value store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod id;
pub mod model;
pub mod request;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{AppConfig, StoreBackend};
pub use error::{ConfigError, FieldError, ProductError, StoreError};
pub use id::{IdGenerator, UuidGenerator};
pub use model::{Product, ProductDraft};
pub use request::ApiRequest;
pub use response::ApiResponse;
pub use routes::{app, common_routes, product_routes};
pub use service::RequestValidator;
pub use state::AppState;
pub use store::{DynamoDbConfig, DynamoDbStore, InMemoryStore, ProductStore};
