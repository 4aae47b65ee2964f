use anyhow::Context;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use hubdash_api::state::Adapters;
use hubdash_api::{build_router, AppState};
use hubdash_core::repositories::MenuItemRepository;
use hubdash_core::services::MenuService;
use hubdash_infrastructure::{
    create_pool, run_migrations, CommandProbe, FsDocumentRepository, FsSettingsRepository,
    InMemoryMenuItemRepository, PgMenuItemRepository, SysinfoProbe,
};
use hubdash_security::UserDirectory;
use hubdash_shared::{telemetry, AppConfig, Environment};

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(10 * 60);

#[derive(Parser)]
#[command(name = "hubdash-server")]
#[command(about = "Admin dashboard backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard API (default)
    Serve,
    /// Insert the default menu items into an empty store and exit
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("failed to load configuration")?;
    let _log_guard = telemetry::init_telemetry(&config);

    info!("hubdash starting ({})", config.env);

    let menu_repo = menu_repository(&config).await?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Seed => {
            let inserted = MenuService::new(menu_repo).seed_defaults().await?;
            info!("Seed finished, {} menu items inserted", inserted);
            Ok(())
        }
        Commands::Serve => serve(config, menu_repo).await,
    }
}

async fn menu_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn MenuItemRepository>> {
    if !config.uses_database() {
        warn!("DATABASE_URL not set, menu items are kept in memory");
        return Ok(Arc::new(InMemoryMenuItemRepository::new()));
    }

    info!("Connecting to database...");
    let pool = create_pool(&config.database.url, config.database.max_connections)
        .await
        .context("failed to connect to database")?;
    run_migrations(&pool).await.context("failed to run migrations")?;
    info!("Database connection established.");
    Ok(Arc::new(PgMenuItemRepository::new(pool)))
}

async fn serve(config: AppConfig, menu_repo: Arc<dyn MenuItemRepository>) -> anyhow::Result<()> {
    if config.uses_default_secret() {
        if config.env == Environment::Production {
            warn!("SESSION_SECRET is not set; sessions are signed with the development secret");
        } else {
            info!("Using the development session secret");
        }
    }

    let documents = FsDocumentRepository::new(&config.documentation.dir);
    documents.ensure_dirs().await?;

    let users = UserDirectory::from_settings(&config.auth)?;
    let adapters = Adapters {
        menu_repo,
        document_repo: Arc::new(documents),
        settings_repo: Arc::new(FsSettingsRepository::new(&config.site.file)),
        system_probe: Arc::new(SysinfoProbe::new()),
        network_probe: Arc::new(CommandProbe::new(Duration::from_secs(
            config.network_test.timeout_seconds,
        ))),
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::new(config, adapters, users);

    // A failed seed is logged and does not stop the server.
    if let Err(e) = state.menu.seed_defaults().await {
        error!("Failed to initialize default menu items: {}", e);
    }

    let sessions = Arc::clone(&state.sessions);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let purged = sessions.purge_expired();
            if purged > 0 {
                info!("Purged {} expired sessions", purged);
            }
        }
    });

    let app = build_router(state);

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
