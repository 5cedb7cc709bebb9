mod check_commands;
mod resolve_commands;

use std::{path::PathBuf, sync::Arc};

use {
    anyhow::Context,
    clap::{Parser, Subcommand},
    tokio_util::sync::CancellationToken,
    tracing::{info, warn},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
    zincsaver_cobalt::CobaltClient,
    zincsaver_config::ZincConfig,
    zincsaver_media::Fetcher,
};

#[derive(Parser)]
#[command(name = "zincsaver", about = "Zincsaver: media links in, media out", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file to load instead of searching the standard locations.
    #[arg(long, global = true, env = "ZINCSAVER_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the Telegram bot (default when no subcommand is provided).
    Run,
    /// Validate the configuration and print diagnostics.
    Check,
    /// Ask the broker about one link and print what would be sent.
    Resolve {
        /// Link to a supported site.
        url: String,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ZincConfig> {
    match path {
        Some(path) => zincsaver_config::load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(zincsaver_config::discover_and_load()),
    }
}

async fn run_bot(config: ZincConfig) -> anyhow::Result<()> {
    let report = zincsaver_config::validate(&config);
    for diagnostic in &report.diagnostics {
        warn!("{diagnostic}");
    }
    if report.has_errors() {
        anyhow::bail!("invalid configuration, run `zincsaver check` for details");
    }

    let client = CobaltClient::new(&config.cobalt)?;
    info!(endpoint = %client.endpoint(), "cobalt broker configured");
    let fetcher = Arc::new(Fetcher::new(Arc::new(client)));

    let cancel = CancellationToken::new();
    let polling = zincsaver_telegram::start_polling(config.telegram, fetcher, cancel.clone()).await?;

    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested");
        }
        shutdown.cancel();
    });

    polling.await?;
    info!("zincsaver stopped");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "zincsaver starting");

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        None | Some(Commands::Run) => run_bot(config).await,
        Some(Commands::Check) => check_commands::handle_check(&config),
        Some(Commands::Resolve { url }) => resolve_commands::handle_resolve(&config, &url).await,
    }
}
