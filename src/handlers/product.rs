//! Product handlers: create, get, update, delete, list.
//!
//! Each call runs parse, validate, store, respond and stops at the first failing
//! stage. Every failure goes through `ProductError::into_api_response`.

use crate::error::ProductError;
use crate::model::Product;
use crate::request::ApiRequest;
use crate::response::{created, ok, ApiResponse};
use crate::service::RequestValidator;
use crate::state::AppState;

fn respond(result: Result<ApiResponse, ProductError>) -> ApiResponse {
    result.unwrap_or_else(ProductError::into_api_response)
}

async fn fetch_existing(state: &AppState, id: &str) -> Result<Product, ProductError> {
    state
        .store
        .get(id)
        .await?
        .ok_or_else(|| ProductError::NotFound(id.to_string()))
}

/// POST: 201 with the stored product and its generated id.
pub async fn create(state: &AppState, req: ApiRequest) -> ApiResponse {
    respond(create_product(state, &req).await)
}

async fn create_product(state: &AppState, req: &ApiRequest) -> Result<ApiResponse, ProductError> {
    let body = req.json_object()?;
    let draft = RequestValidator::validate(&body)?;
    let product = draft.with_id(state.ids.generate());
    state.store.put(&product).await?;
    tracing::info!(id = %product.product_id, "created product");
    created(&product)
}

/// GET by id: 200 with the product.
pub async fn get(state: &AppState, req: ApiRequest) -> ApiResponse {
    respond(get_product(state, &req).await)
}

async fn get_product(state: &AppState, req: &ApiRequest) -> Result<ApiResponse, ProductError> {
    let id = req.require_id()?;
    let product = fetch_existing(state, id).await?;
    ok(&product)
}

/// PUT by id: full replacement keyed by the path id. 404 before the body is read if absent.
pub async fn update(state: &AppState, req: ApiRequest) -> ApiResponse {
    respond(update_product(state, &req).await)
}

async fn update_product(state: &AppState, req: &ApiRequest) -> Result<ApiResponse, ProductError> {
    let id = req.require_id()?;
    fetch_existing(state, id).await?;
    let body = req.json_object()?;
    let draft = RequestValidator::validate(&body)?;
    let product = draft.with_id(id);
    state.store.put(&product).await?;
    tracing::info!(id = %product.product_id, "updated product");
    ok(&product)
}

/// DELETE by id: 204 with no body.
pub async fn delete(state: &AppState, req: ApiRequest) -> ApiResponse {
    respond(delete_product(state, &req).await)
}

async fn delete_product(state: &AppState, req: &ApiRequest) -> Result<ApiResponse, ProductError> {
    let id = req.require_id()?;
    fetch_existing(state, id).await?;
    state.store.delete(id).await?;
    tracing::info!(id = %id, "deleted product");
    Ok(ApiResponse::no_content())
}

/// GET collection: every stored product in store order.
pub async fn list(state: &AppState, _req: ApiRequest) -> ApiResponse {
    respond(list_products(state).await)
}

async fn list_products(state: &AppState) -> Result<ApiResponse, ProductError> {
    let products = state.store.scan().await?;
    ok(&products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::id::IdGenerator;
    use crate::store::ProductStore;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use serde_json::json;
    use std::sync::Arc;

    struct FixedId(&'static str);

    impl IdGenerator for FixedId {
        fn generate(&self) -> String {
            self.0.to_string()
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl ProductStore for BrokenStore {
        async fn put(&self, _: &Product) -> Result<(), StoreError> {
            Err(StoreError::Backend("throttled".into()))
        }
        async fn get(&self, _: &str) -> Result<Option<Product>, StoreError> {
            Err(StoreError::Backend("throttled".into()))
        }
        async fn delete(&self, _: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("throttled".into()))
        }
        async fn scan(&self) -> Result<Vec<Product>, StoreError> {
            Err(StoreError::Backend("throttled".into()))
        }
    }

    const PEN: &str = r#"{"name":"Pen","description":"Blue pen","price":1.5,"available":true}"#;

    #[tokio::test]
    async fn create_uses_generated_id() {
        let mut state = AppState::in_memory();
        state.ids = Arc::new(FixedId("generated-1"));
        let body = r#"{"productID":"mine","name":"Pen","description":"Blue pen","price":1.5,"available":true}"#;
        let r = create(&state, ApiRequest::new().with_body(body)).await;
        assert_eq!(r.status_code, StatusCode::CREATED);
        assert_eq!(r.body_json().unwrap()["productID"], "generated-1");
        assert!(state.store.get("mine").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_missing_id_is_400() {
        let state = AppState::in_memory();
        let r = update(&state, ApiRequest::new().with_body(PEN)).await;
        assert_eq!(r.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(r.body_json().unwrap(), json!({ "message": "Product ID is required" }));
    }

    #[tokio::test]
    async fn update_of_absent_record_short_circuits_before_body() {
        let state = AppState::in_memory();
        let r = update(&state, ApiRequest::new().with_id("ghost").with_body("{broken")).await;
        assert_eq!(r.status_code, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn store_failures_are_generic_500() {
        let state = AppState::new(Arc::new(BrokenStore));
        for r in [
            create(&state, ApiRequest::new().with_body(PEN)).await,
            get(&state, ApiRequest::new().with_id("x")).await,
            delete(&state, ApiRequest::new().with_id("x")).await,
            list(&state, ApiRequest::new()).await,
        ] {
            assert_eq!(r.status_code, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(r.body_json().unwrap(), json!({ "message": "Internal Server Error" }));
        }
    }

    #[tokio::test]
    async fn invalid_create_stores_nothing() {
        let state = AppState::in_memory();
        let r = create(&state, ApiRequest::new().with_body(r#"{"name":"Pen"}"#)).await;
        assert_eq!(r.status_code, StatusCode::BAD_REQUEST);
        assert!(state.store.scan().await.unwrap().is_empty());
    }
}
