//! Server runtime.
//!
//! [`ServerHandle`] owns the whole lifecycle: metrics recorder, database
//! and migrations, optional seed user, the HTTP server and graceful
//! shutdown.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::identity::{NewUser, UserService};
use crate::shared::DomainResult;
use crate::config::AppConfig;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::repositories::UserRepository;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};
use crate::{create_api_router, init_database, DatabaseConfig};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the server.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Create the configured seed user when the users table is empty (default: true).
    pub seed_user: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            seed_user: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running server.
///
/// ```rust,no_run
/// use items_api::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the listener is bound to.
    pub local_addr: SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

/// The global recorder can only be installed once per process, so a
/// restart within the same process reuses the first handle.
pub(crate) fn prometheus_handle() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    static PROM_HANDLE: Mutex<Option<PrometheusHandle>> = Mutex::new(None);

    let mut slot = PROM_HANDLE.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(handle) = slot.as_ref() {
        return Ok(handle.clone());
    }
    let handle = PrometheusBuilder::new().install_recorder()?;
    info!("📊 Prometheus metrics recorder installed");
    *slot = Some(handle.clone());
    Ok(handle)
}

/// Secret from the config, or a random one that dies with the process.
fn jwt_config(app_cfg: &AppConfig) -> JwtConfig {
    let minutes = app_cfg.security.access_token_expire_minutes;
    match &app_cfg.security.jwt_secret {
        Some(secret) => JwtConfig::new(secret.clone(), minutes),
        None => {
            warn!("⚠️  No JWT secret configured; using a random one. Tokens will not survive a restart.");
            JwtConfig::with_random_secret(minutes)
        }
    }
}

impl ServerHandle {
    /// Start the server with the given options.
    ///
    /// This will:
    /// 1. Install the Prometheus metrics recorder
    /// 2. Connect to the database and run migrations
    /// 3. Create the seed user (if configured and enabled)
    /// 4. Bind the listener and serve the REST API
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        info!("Starting Items API...");

        let prometheus_handle = prometheus_handle()?;

        let db_config = DatabaseConfig::from(&app_cfg.database);

        let jwt_config = jwt_config(&app_cfg);
        info!(
            "JWT configured with {}min token expiration",
            jwt_config.access_token_expire_minutes
        );

        // ── Database ───────────────────────────────────────────
        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        if opts.seed_user {
            if let Err(e) = seed_default_user(&db, &app_cfg, jwt_config.clone()).await {
                error!("Failed to create seed user: {}", e);
                return Err(e.into());
            }
        }

        // ── REST API server ────────────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let api_router = create_api_router(db.clone(), jwt_config, &app_cfg, prometheus_handle);

        let api_addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown.signal();
        let api_server = axum::serve(listener, api_router.into_make_service())
            .with_graceful_shutdown(async move {
                api_shutdown.wait().await;
                info!("🛑 REST API server received shutdown signal");
            });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("🚀 Server started.");

        Ok(Self {
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for shutdown to be triggered, then drain in-flight requests and
    /// close the pool within the configured timeout.
    pub async fn wait(self) {
        let Self {
            shutdown,
            api_task,
            db,
            ..
        } = self;

        let completed = shutdown
            .shutdown_with_cleanup(move || async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }

                if let Err(e) = db.close().await {
                    warn!("Error closing database connection: {}", e);
                } else {
                    info!("✅ Database connection closed");
                }
            })
            .await;

        if !completed {
            warn!("Some connections were still open at shutdown");
        }
        info!("👋 Items API shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down Items API...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Create the configured seed user if the users table is empty.
async fn seed_default_user(
    db: &DatabaseConnection,
    app_cfg: &AppConfig,
    jwt_config: JwtConfig,
) -> DomainResult<()> {
    let Some(seed) = &app_cfg.seed else {
        return Ok(());
    };

    let service = UserService::new(
        Arc::new(UserRepository::new(db.clone())),
        jwt_config,
        app_cfg.security.bcrypt_cost,
    );

    if service.count_users().await? > 0 {
        return Ok(());
    }

    info!("Creating seed user...");
    let new_user = NewUser {
        username: seed.username.clone(),
        password: seed.password.clone(),
        email: seed.email.clone(),
        full_name: seed.full_name.clone(),
    };

    let user = service.create_user(new_user).await?;
    info!("Seed user created: {}", user.username);
    info!("⚠️  Please change the seed user's password before going to production!");
    Ok(())
}

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
