//! Items API server
//!
//! ```sh
//! # Config picked by the ENV profile (ENV=test reads test.toml, default config.toml)
//! items-api
//!
//! # Explicit config path
//! items-api --config /etc/items-api/config.toml
//!
//! # Validate config without starting
//! items-api --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use items_api::config::AppConfig;
use items_api::server::{init_tracing, ServerHandle, ServerOptions};

/// Users and their items behind OAuth2 password login.
#[derive(Parser, Debug)]
#[command(name = "items-api", version, about = "Users and items REST API")]
struct Cli {
    /// Path to the configuration file (TOML). Defaults to the ENV profile file.
    #[arg(short, long, env = "APP_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the seed user.
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let loaded = match cli.config {
        Some(path) => AppConfig::load(&path).map(|cfg| (cfg, path)),
        None => AppConfig::load_for_profile(),
    };

    let (mut config, config_path) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            // Fallback tracing init
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!(
            "   JWT secret  : {}",
            if config.security.jwt_secret.is_some() { "configured" } else { "random per process" }
        );
        println!("   Token TTL   : {} min", config.security.access_token_expire_minutes);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        seed_user: !cli.no_seed,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;

    Ok(())
}
