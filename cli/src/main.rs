//! Room booking service, CLI server
//!
//! Headless HTTP service for booking rooms, suitable for deployment as a
//! systemd service, Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/room-booking/config.toml)
//! room-booking
//!
//! # Custom config path
//! room-booking --config /etc/room-booking/config.toml
//!
//! # Override the port, keep everything in memory
//! room-booking --port 8080 --memory
//!
//! # Validate config without starting
//! room-booking --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use room_booking::config::{AppConfig, StoreBackend};
use room_booking::server::{init_tracing, ServerHandle, ServerOptions};

/// Room booking service: reserve rooms 1 to 10 over date ranges.
#[derive(Parser, Debug)]
#[command(
    name = "room-booking",
    version,
    about = "HTTP service for room reservations",
    long_about = "Room booking service: REST API for creating, querying, \
                  rescheduling and cancelling room reservations.\n\n\
                  Default config: ~/.config/room-booking/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "BOOKING_CONFIG")]
    config: Option<PathBuf>,

    /// Override the HTTP listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Keep reservations in process memory instead of SQLite.
    #[arg(long)]
    memory: bool,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(room_booking::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Log level override applies before tracing starts
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }
    if cli.memory {
        info!("CLI override: backend = memory");
        config.database.backend = StoreBackend::Memory;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!("   Backend     : {:?}", config.database.backend);
        println!("   Database    : {}", config.database.connection_url());
        println!("   Log level   : {}", config.logging.level);
        println!("   Room locks  : {}", config.booking.serialize_room_writes);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;

    Ok(())
}
