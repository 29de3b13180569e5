use crate::api::{self, AppState};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::{BackupSchedule, spawn_scheduler};
use crate::db::Store;
use crate::errors::AppResult;
use std::path::Path;
use tokio::net::TcpListener;
use tokio::sync::watch;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Serve { bind, port } = cmd {
        let mut cfg = cfg.clone();
        if let Some(bind) = bind {
            cfg.bind = bind.clone();
        }
        if let Some(port) = port {
            cfg.port = *port;
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        runtime.block_on(serve(cfg))?;
    }

    Ok(())
}

/// Run the API until Ctrl-C, then stop the scheduler and flush the store.
pub async fn serve(cfg: Config) -> AppResult<()> {
    let store = Store::open(&cfg)?;
    tracing::info!(database = %cfg.database, "store ready");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = spawn_scheduler(
        store.clone(),
        BackupSchedule::from_config(&cfg),
        shutdown_rx,
    );

    let app = api::router(AppState::new(store.clone()), Path::new(&cfg.static_dir));

    let addr = format!("{}:{}", cfg.bind, cfg.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutting down");
    let _ = shutdown_tx.send(true);
    if let Err(e) = scheduler.await {
        tracing::warn!(error = %e, "backup scheduler did not stop cleanly");
    }

    store.close()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
