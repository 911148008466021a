//! Reusable room booking server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! store selection, migrations, REST API, and graceful shutdown.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::ReservationService;
use crate::config::{AppConfig, StoreBackend};
use crate::domain::ReservationRepository;
use crate::infrastructure::database::migrator::Migrator;
use crate::interfaces::http::create_api_router;
use crate::shared::shutdown::ShutdownCoordinator;
use crate::{init_database, InMemoryReservationRepository, SeaOrmReservationRepository};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the booking service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running booking service.
///
/// The store is created here and injected into the service; it lives until
/// [`ServerHandle::wait`] closes it.
///
/// # Examples
///
/// ```rust,no_run
/// use room_booking::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     // ... wait for shutdown signal ...
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Reservation store shared by the service and health check.
    pub repo: Arc<dyn ReservationRepository>,
    /// Booking rules on top of the store.
    pub service: Arc<ReservationService>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the HTTP listener is bound to.
    pub local_addr: std::net::SocketAddr,

    db: Option<DatabaseConnection>,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the booking service with the given options.
    ///
    /// This will:
    /// 1. Open the configured store (SQLite, or process memory)
    /// 2. Run migrations when the store is SQLite and `auto_migrate` is set
    /// 3. Start the REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("🏨 Starting room booking service...");

        // ── Store ──────────────────────────────────────────────
        let (repo, db): (Arc<dyn ReservationRepository>, Option<DatabaseConnection>) =
            match app_cfg.database.backend {
                StoreBackend::Sqlite => {
                    let db_config = app_cfg.database.to_database_config();
                    info!("Database: {}", db_config.url);
                    let db = init_database(&db_config).await?;

                    if opts.auto_migrate {
                        info!("Running database migrations...");
                        Migrator::up(&db, None).await?;
                        info!("✅ Migrations completed");
                    }

                    (Arc::new(SeaOrmReservationRepository::new(db.clone())), Some(db))
                }
                StoreBackend::Memory => {
                    info!("🧠 Using in-memory reservation store, data is lost on exit");
                    (Arc::new(InMemoryReservationRepository::new()), None)
                }
            };

        // ── Service ────────────────────────────────────────────
        let mut service = ReservationService::new(repo.clone());
        if app_cfg.booking.serialize_room_writes {
            service = service.with_room_locks();
            info!("🔒 Per-room write serialization enabled");
        }
        let service = Arc::new(service);

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(service.clone(), repo.clone());

        let api_addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        let local_addr = listener.local_addr()?;
        info!("🚀 REST API server listening on http://{}", local_addr);
        info!("📚 Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repo,
            service,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    ///
    /// Call [`ServerHandle::wait`] to block until everything has stopped.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the shutdown signal, drain in-flight requests, then close
    /// the store.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            mut api_task,
            ..
        } = self;

        shutdown.signal().wait().await;
        info!("⏳ Waiting for server tasks to complete...");

        let drained = shutdown
            .drain(async {
                match (&mut api_task).await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }
            })
            .await;
        if !drained {
            api_task.abort();
        }

        if let Some(db) = db {
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("✅ Database connection closed");
            }
        }

        info!("👋 Room booking service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down room booking service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
