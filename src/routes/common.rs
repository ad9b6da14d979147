//! Liveness and build identification for the product server. Neither route touches the store.

use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct ServiceInfo {
    service: &'static str,
    version: &'static str,
}

const SERVICE: ServiceInfo = ServiceInfo {
    service: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
};

#[derive(Serialize)]
struct Liveness {
    status: &'static str,
    #[serde(flatten)]
    service: ServiceInfo,
}

async fn liveness() -> Json<Liveness> {
    Json(Liveness {
        status: "ok",
        service: SERVICE,
    })
}

async fn service_info() -> Json<ServiceInfo> {
    Json(SERVICE)
}

pub fn common_routes() -> Router {
    Router::new()
        .route("/health", get(liveness))
        .route("/version", get(service_info))
}
