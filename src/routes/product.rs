//! HTTP routes for products. Raw body bytes go to the handlers undecoded; decoding
//! happens at the handler's parse stage, after the existence check on update.

use crate::handlers::product;
use crate::request::ApiRequest;
use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;

fn api_request(id: Option<String>, body: Bytes) -> ApiRequest {
    let mut req = ApiRequest::new();
    if let Some(id) = id {
        req = req.with_id(id);
    }
    if !body.is_empty() {
        req = req.with_body(body.to_vec());
    }
    req
}

async fn create(State(state): State<AppState>, body: Bytes) -> ApiResponse {
    product::create(&state, api_request(None, body)).await
}

async fn list(State(state): State<AppState>) -> ApiResponse {
    product::list(&state, ApiRequest::new()).await
}

async fn read(State(state): State<AppState>, Path(id): Path<String>) -> ApiResponse {
    product::get(&state, ApiRequest::new().with_id(id)).await
}

async fn update(State(state): State<AppState>, Path(id): Path<String>, body: Bytes) -> ApiResponse {
    product::update(&state, api_request(Some(id), body)).await
}

async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResponse {
    product::delete(&state, ApiRequest::new().with_id(id)).await
}

/// `/products` and `/products/:id`. Bodies larger than `max_body_bytes` get 413.
pub fn product_routes(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/products", get(list).post(create))
        .route("/products/:id", get(read).put(update).delete(delete))
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(max_body_bytes)),
        )
        .with_state(state)
}
