mod common;
mod product;

pub use common::common_routes;
pub use product::product_routes;

use crate::state::AppState;
use axum::Router;

/// Full application router: common routes plus product CRUD.
pub fn app(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes())
        .merge(product_routes(state, max_body_bytes))
}
