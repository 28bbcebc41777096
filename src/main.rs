use std::{net::SocketAddr, sync::Arc};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use waste_tracker::{
    catalog::Catalog,
    config::{Config, LedgerBackend},
    menu::fetch_menu,
    remote::RemoteStore,
    router,
    storage::FileStore,
    AppState, LedgerStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    config.log_summary();

    let client = reqwest::Client::new();
    let store: Arc<dyn LedgerStore> = match &config.ledger {
        LedgerBackend::File(path) => Arc::new(FileStore::open(path.clone()).await?),
        LedgerBackend::Remote { base_url, auth } => {
            Arc::new(RemoteStore::new(client.clone(), base_url.clone(), auth.clone()))
        }
    };

    let catalog = match &config.menu {
        Some(source) => fetch_menu(&client, source).await,
        None => Catalog::bundled(),
    };

    let app = router(AppState::new(store, catalog));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
