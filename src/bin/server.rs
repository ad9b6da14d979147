//! Product server: reads config from env, picks the store, serves product routes.

use product_api::{app, AppConfig, AppState, DynamoDbStore, InMemoryStore, ProductStore, StoreBackend};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("product_api=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let store: Arc<dyn ProductStore> = match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory product store; records are lost on exit");
            Arc::new(InMemoryStore::new())
        }
        StoreBackend::DynamoDb => {
            let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
            let store = DynamoDbStore::new(&sdk_config, config.dynamodb());
            tracing::info!(table = %store.table_name(), "using DynamoDB product store");
            Arc::new(store)
        }
    };

    let router = app(AppState::new(store), config.max_body_bytes);
    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
