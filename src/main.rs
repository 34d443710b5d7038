use std::net::SocketAddr;

use placement_hub::{
    config::{get_config, init_config, Config, LogFormat, StoreBackend},
    database::pool::{create_pool, run_migrations},
    middleware::cors::cors_layer,
    routes,
    store::{MemoryStore, PgStore, PlacementStore},
    AppState,
};
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config()?;
    init_tracing(config.log_format);

    info!(
        backend = ?config.store_backend,
        transitions = %config.transition_policy,
        "starting placement hub"
    );

    match config.store_backend {
        StoreBackend::Postgres => {
            let pool = create_pool(config).await?;
            run_migrations(&pool).await?;
            info!("database migrations applied");
            serve(config, PgStore::new(pool)).await
        }
        StoreBackend::Memory => {
            tracing::warn!("running against the in-memory demo store; data is not persisted");
            serve(config, MemoryStore::with_demo_data()).await
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn serve<S: PlacementStore>(config: &Config, store: S) -> anyhow::Result<()> {
    let state = AppState::new(store, config.transition_policy);

    let app = routes::router(state)
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(cors_layer(config.cors_allowed_origin.as_deref())?)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
