use anyhow::Context;
use clap::Parser;
use log::{error, info, warn};
use loggy::{
    config::{ensure_config, get_config_path},
    constants::{DEFAULT_CHECKPOINT_INTERVAL_SECS, DEFAULT_HOST, DEFAULT_PORT},
    db::{spawn_wal_checkpointer, Db},
    logging::init_server_logging,
    server::{serve, ServerState},
};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tokio::{net::TcpListener, signal, sync::watch};

#[derive(Debug, Parser)]
#[command(name = "loggy", version, about = "Collects log records over HTTP and stores them in SQLite")]
struct Cli {
    /// Address to bind the HTTP listener to.
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    host: String,

    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Seconds between WAL checkpoints.
    #[arg(
        long,
        env = "INTERVAL",
        default_value_t = DEFAULT_CHECKPOINT_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    interval: u64,

    /// Config file; defaults to ~/.config/loggy/config.json.
    #[arg(long, env = "LOGGY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_server_logging();
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => get_config_path().context("could not retrieve config path")?,
    };
    let config = ensure_config(&config_path).context("error ensuring config")?;

    let db = Db::open(&config.database_path)
        .await
        .with_context(|| format!("error opening database {}", config.database_path.display()))?;

    let (stop_tx, stop_rx) = watch::channel(false);
    let checkpointer = spawn_wal_checkpointer(db.clone(), Duration::from_secs(cli.interval), stop_rx);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    let state = Arc::new(ServerState {
        db: db.clone(),
        config,
    });
    let served = serve(listener, state, shutdown_signal()).await;

    let _ = stop_tx.send(true);
    if let Err(e) = checkpointer.await {
        warn!("checkpointer task failed: {}", e);
    }
    match db.checkpoint().await {
        Ok(()) => info!("final checkpoint successful"),
        Err(e) => error!("error during final checkpoint: {}", e),
    }
    db.close().await;

    served.context("server error")
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
