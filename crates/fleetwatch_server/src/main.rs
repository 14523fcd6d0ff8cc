mod config;
mod telemetry;

use anyhow::Context;
use config::ServiceConfig;
use fleetwatch_api::{
    build_router, AppState, CredentialGate, TelemetryIngestionService, TelemetryQueryService,
    VehicleDirectoryService,
};
use fleetwatch_clickhouse::{ClickHouseClient, ClickHouseTelemetryStore, TelemetryStoreConfig};
use fleetwatch_postgres::{PostgresClient, PostgresVehicleRegistry};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use telemetry::init_telemetry;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() {
    let config = match ServiceConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_telemetry(&config.log_level) {
        eprintln!("Failed to initialize telemetry: {}", e);
        std::process::exit(1);
    }

    info!(
        http_host = %config.http_host,
        http_port = config.http_port,
        "Starting fleetwatch server"
    );
    debug!("Configuration: {:?}", config);

    if let Err(e) = run(config).await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(config: ServiceConfig) -> anyhow::Result<()> {
    let (postgres_client, clickhouse_client) = initialize_stores(&config).await?;

    let registry = Arc::new(PostgresVehicleRegistry::new(postgres_client));
    let store = Arc::new(ClickHouseTelemetryStore::new(
        clickhouse_client,
        TelemetryStoreConfig {
            table: config.telemetry_table.clone(),
            latest_lookback_secs: config.latest_lookback_secs,
        },
    ));

    let state = AppState {
        ingestion: Arc::new(TelemetryIngestionService::new(
            CredentialGate::new(registry.clone()),
            store.clone(),
        )),
        queries: Arc::new(TelemetryQueryService::new(store)),
        directory: Arc::new(VehicleDirectoryService::new(registry)),
    };

    let addr = format!("{}:{}", config.http_host, config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Shutdown complete");
    Ok(())
}

/// Connect to both backing stores, provision their schemas, and seed the
/// bootstrap fleet. Either store may still be starting up alongside this
/// service, and a store can accept connections before it is ready for DDL,
/// so the whole provision-and-seed block is retried with a growing delay,
/// not just connectivity.
async fn initialize_stores(
    config: &ServiceConfig,
) -> anyhow::Result<(PostgresClient, ClickHouseClient)> {
    info!("Initializing PostgreSQL...");
    let postgres_client = PostgresClient::new(
        &config.postgres_host,
        config.postgres_port,
        &config.postgres_database,
        &config.postgres_username,
        &config.postgres_password,
        config.postgres_pool_size,
    )?;
    let registry = PostgresVehicleRegistry::new(postgres_client.clone());
    with_retries("postgresql", config.bootstrap_max_attempts, || async {
        postgres_client.ping().await?;
        fleetwatch_postgres::ensure_schema(&postgres_client).await?;
        fleetwatch_postgres::seed_default_vehicles(&registry).await
    })
    .await?;

    info!("Initializing ClickHouse...");
    let clickhouse_client = ClickHouseClient::new(
        &config.clickhouse_url,
        &config.clickhouse_database,
        &config.clickhouse_username,
        &config.clickhouse_password,
    );
    with_retries("clickhouse", config.bootstrap_max_attempts, || async {
        clickhouse_client.ping().await?;
        fleetwatch_clickhouse::ensure_schema(&clickhouse_client, &config.telemetry_table).await
    })
    .await?;

    Ok((postgres_client, clickhouse_client))
}

/// Run `op` until it succeeds or the attempt budget is spent, sleeping
/// `2 * attempt` seconds between attempts. A budget of zero still runs once.
async fn with_retries<F, Fut>(target: &str, max_attempts: u32, mut op: F) -> anyhow::Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    let max_attempts = max_attempts.max(1);
    for attempt in 1..=max_attempts {
        match op().await {
            Ok(()) => {
                info!(target_store = target, attempt, "store ready");
                return Ok(());
            }
            Err(e) if attempt < max_attempts => {
                let delay = Duration::from_secs(u64::from(attempt) * 2);
                warn!(
                    target_store = target,
                    attempt,
                    delay_secs = delay.as_secs(),
                    "store not ready: {e:#}"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("{target} unreachable after {max_attempts} attempts")
                });
            }
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install ctrl-c handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl-c, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
