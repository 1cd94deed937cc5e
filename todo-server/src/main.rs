use anyhow::{Context, Result};
use clap::Parser;
use todo_server::config::{Config, ConfigOverrides};
use todo_server::setup::initialize_app;
use todo_server::telemetry::{init_telemetry, log_shutdown_info, log_startup_info, report_error};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "todo-server")]
#[command(about = "Todo item HTTP service")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CONFIG_FILE")]
    config: Option<String>,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Listen address override
    #[arg(long)]
    listen_addr: Option<String>,

    /// Port override (default 8000)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level override
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            database_url: self.database_url.clone(),
            listen_addr: self.listen_addr.clone(),
            port: self.port,
            log_level: self.log_level.clone(),
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_overrides(&cli.overrides());
    config.validate()?;
    Ok(config)
}

/// Resolves on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, initiating graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli).context("Failed to load configuration")?;

    init_telemetry(&config.logging).context("Failed to initialize telemetry")?;
    log_startup_info(&config);

    let app = initialize_app(&config)
        .await
        .context("Failed to initialize application")?;

    let addr = config.server_address();
    let result = app.server.serve(&addr, shutdown_signal()).await;

    // In-flight requests have finished; release every pooled connection
    app.repository.close().await;

    match result {
        Ok(()) => {
            log_shutdown_info();
            Ok(())
        }
        Err(e) => {
            report_error(&e, "serve");
            Err(e)
        }
    }
}
