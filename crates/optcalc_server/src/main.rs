//! optcalc server
//!
//! REST API for the options and scenario calculators.

use anyhow::Context;
use clap::Parser;
use optcalc_server::config::{build_config, CliArgs as ConfigCliArgs};
use optcalc_server::server::Server;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// optcalc server - REST API for option Greeks, implied volatility, max pain and scenarios
#[derive(Parser, Debug)]
#[command(name = "optcalc_server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Host address to bind to
    #[arg(long, env = "OPTCALC_SERVER_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "OPTCALC_SERVER_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "OPTCALC_LOG_LEVEL")]
    log_level: Option<String>,

    /// Deployment environment (development, staging, production)
    #[arg(long, env = "OPTCALC_ENV")]
    environment: Option<String>,
}

impl From<Args> for ConfigCliArgs {
    fn from(args: Args) -> Self {
        ConfigCliArgs {
            config_file: args.config,
            host: args.host,
            port: args.port,
            log_level: args.log_level,
            environment: args.environment,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cli_args: ConfigCliArgs = args.into();
    let config = build_config(&cli_args).context("failed to load server configuration")?;

    init_tracing(config.log_level.as_filter_str());

    tracing::info!(
        version = optcalc_server::VERSION,
        host = %config.host,
        port = config.port,
        log_level = %config.log_level,
        environment = %config.environment,
        cdf = ?config.calculator.cdf_approximation,
        iv_solver = ?config.calculator.iv_solver,
        max_pain_convention = ?config.calculator.max_pain_convention,
        maintenance_margin = config.calculator.maintenance_margin,
        "starting optcalc server"
    );

    let server = Server::new(config);
    let bind_target = server.config().socket_addr();
    let listener = server
        .bind()
        .await
        .with_context(|| format!("failed to bind {}", bind_target))?;

    server
        .serve(listener)
        .await
        .context("server terminated with an I/O error")?;

    Ok(())
}
