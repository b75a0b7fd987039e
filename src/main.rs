//! Chain service runner.
//!
//! Runs one service of the chain per process:
//!
//! ```text
//!     client ──▶ C :8082 /process ──▶ B :8081 /call-echo ──▶ A :8080 /echo
//!                   (timeout 2s)          (timeout 1s)
//! ```
//!
//! Every hop adopts or mints `X-Correlation-ID`, forwards it, and answers
//! with a 503 envelope instead of failing when its downstream does.

use clap::Parser;
use std::path::PathBuf;

use service_chain::chain::ServiceRole;
use service_chain::config::{load_config, validate_config, ChainConfig, ConfigError};
use service_chain::http::ChainServer;
use service_chain::lifecycle::{signals, Shutdown};
use service_chain::observability;

#[derive(Parser)]
#[command(name = "service-chain")]
#[command(about = "Run one service of the C -> B -> A call chain", long_about = None)]
struct Cli {
    /// Service role: leaf|middle|root (or a|b|c).
    #[arg(short, long)]
    role: Option<ServiceRole>,

    /// TOML configuration file. Role defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bind address.
    #[arg(long)]
    bind: Option<String>,

    /// Override the downstream base URL.
    #[arg(long)]
    downstream: Option<String>,

    /// Override the downstream timeout in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,
}

impl Cli {
    fn resolve_config(&self) -> Result<ChainConfig, ConfigError> {
        let mut config = match (&self.config, self.role) {
            (Some(path), _) => load_config(path)?,
            (None, Some(role)) => ChainConfig::for_role(role),
            (None, None) => ChainConfig::default(),
        };

        if let Some(role) = self.role {
            if role != config.role() {
                config.service.role = role;
                config.downstream = service_chain::config::DownstreamConfig::for_role(role);
            }
        }
        if let Some(bind) = &self.bind {
            config.service.bind_address = Some(bind.clone());
        }
        if let Some(downstream) = config.downstream.as_mut() {
            if let Some(base_url) = &self.downstream {
                downstream.base_url = base_url.clone();
            }
            if let Some(timeout_ms) = self.timeout_ms {
                downstream.timeout_ms = timeout_ms;
            }
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    observability::init_logging(&config.observability);

    let role = config.role();
    tracing::info!(
        service = role.service_name(),
        role = %role,
        bind_address = %config.service.bind_address(),
        "service-chain v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    if config.observability.metrics_enabled {
        let addr: std::net::SocketAddr = config.observability.metrics_address.parse()?;
        observability::metrics::init_metrics(addr)?;
    }

    let server = ChainServer::new(config)?;
    let listener = server.bind().await?;

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    server.run(listener, shutdown.signalled()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
