use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;
use loggy::{
    app::App,
    constants::{
        DEFAULT_CLIENT_HOST, DEFAULT_PAGE_LIMIT, DEFAULT_PORT, DEFAULT_RETRIES, DEFAULT_TIMEOUT_SECS,
    },
    fetcher::{build_client, LogFetcher, Scheme},
    logging::{default_log_dir, init_client_logging},
    models::NewLogEntry,
    pagination::parse_page_limit,
    theme::Theme,
    ui::run_ui,
};
use std::{io::Read, num::NonZeroUsize, path::PathBuf, time::Duration};

#[derive(Debug, Parser)]
#[command(name = "logctl", version, about = "Browse and submit logs collected by loggy")]
struct Cli {
    /// Host the loggy service listens on.
    #[arg(long, default_value = DEFAULT_CLIENT_HOST)]
    host: String,

    /// Port the loggy service listens on.
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Use https instead of http.
    #[arg(long)]
    tls: bool,

    /// Attempts per page request before giving up.
    #[arg(long, default_value_t = DEFAULT_RETRIES, value_parser = clap::value_parser!(u32).range(1..))]
    retries: u32,

    /// Records per page.
    #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT, value_parser = parse_page_limit)]
    limit: NonZeroUsize,

    /// Timeout for a single request attempt.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Use the light color theme.
    #[arg(long)]
    light: bool,

    /// Directory for logctl's own log file.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Read a message from stdin and submit it as one log entry.
    Send(SendArgs),
}

#[derive(Debug, Args)]
struct SendArgs {
    #[arg(long, default_value = "loggy")]
    key: String,

    #[arg(long, default_value = "dev")]
    environment: String,

    #[arg(long, default_value = "1.0.0")]
    app_version: String,

    #[arg(long, default_value = "logctl")]
    device_name: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_dir = cli.log_dir.clone().unwrap_or_else(default_log_dir);
    let _logger = init_client_logging(&log_dir).context("failed to start logging")?;

    let client = build_client(Duration::from_secs(cli.timeout_secs))
        .context("failed to build http client")?;
    let fetcher = LogFetcher::new(
        client,
        Scheme::from_tls(cli.tls),
        &cli.host,
        cli.port,
        cli.retries,
    );

    match cli.command {
        Some(Command::Send(args)) => send(&fetcher, args).await,
        None => {
            info!("browsing {} ({} retries)", fetcher.url(), fetcher.retries());
            let theme = if cli.light { Theme::light() } else { Theme::dark() };
            run_ui(App::new(cli.limit), fetcher, &theme).await
        }
    }
}

async fn send(fetcher: &LogFetcher, args: SendArgs) -> anyhow::Result<()> {
    let mut message = String::new();
    std::io::stdin()
        .read_to_string(&mut message)
        .context("failed to read message from stdin")?;

    let entry = NewLogEntry {
        key: args.key,
        message: message.trim_end().to_string(),
        environment: args.environment,
        app_version: args.app_version,
        device_name: args.device_name,
    };
    let reply = fetcher
        .submit(&entry)
        .await
        .with_context(|| format!("failed to submit log to {}", fetcher.url()))?;
    println!("{}", reply);
    Ok(())
}
