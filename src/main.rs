//! Club management service entry point.
//!
//! Reads configuration from a TOML file (`GAMECLUB_CONFIG` env var or the
//! platform config dir), runs migrations, seeds roles and the bootstrap
//! admin, starts the background tasks and serves the REST API.

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use gameclub::application::board_games::{BoardGamesFacade, BoardGamesService};
use gameclub::application::club_state::{
    start_state_transition_task, ClubStateFacade, ClubStateService, LoggingTransitionHandler,
    StateTransitionHandler,
};
use gameclub::application::tasks::start_item_expiry_task;
use gameclub::application::users::{UserService, UsersFacade};
use gameclub::domain::{RepositoryProvider, Role};
use gameclub::infrastructure::crypto::jwt::JwtConfig;
use gameclub::infrastructure::database::migrator::Migrator;
use gameclub::infrastructure::database::repositories::SeaOrmRepositoryProvider;
use gameclub::infrastructure::webhook::{DiscordNotifier, DiscordTransitionHandler};
use gameclub::interfaces::http::middleware::AuthState;
use gameclub::shared::shutdown::{spawn_signal_listener, ShutdownSignal};
use gameclub::{
    create_api_router, default_config_path, init_database, AppConfig, AppState, DatabaseConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("GAMECLUB_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg.logging.level);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let cfg = AppConfig::default();
            init_tracing(&cfg.logging.level);
            warn!("Failed to load config: {}. Using defaults.", e);
            cfg
        }
    };

    info!("Starting gameclub service...");

    // ── Prometheus metrics recorder ────────────────────────────
    let prometheus = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))?;

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.url.clone(),
    };
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    Migrator::up(&db, None).await?;
    info!("Migrations completed");

    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    seed_roles(&db).await?;
    seed_default_admin(repos.as_ref(), &app_cfg).await;

    // ── Services & facades ─────────────────────────────────────
    let board_games_service = Arc::new(BoardGamesService::new(repos.clone()));
    let club_state_service = Arc::new(ClubStateService::new(repos.clone()));
    let user_service = Arc::new(UserService::new(repos.clone()));

    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_hours: app_cfg.security.jwt_expiration_hours,
        issuer: "gameclub".to_string(),
    };

    let state = AppState {
        board_games: Arc::new(BoardGamesFacade::new(board_games_service.clone())),
        club_states: Arc::new(ClubStateFacade::new(club_state_service.clone())),
        users: Arc::new(UsersFacade::new(user_service.clone())),
        user_service,
        auth: AuthState {
            jwt_config: jwt_config.clone(),
        },
        prometheus,
    };

    // ── Background tasks ───────────────────────────────────────
    let shutdown = ShutdownSignal::new();
    spawn_signal_listener(shutdown.clone());

    let notifier = DiscordNotifier::new(
        app_cfg.discord.webhook_url.clone(),
        app_cfg.discord.timeout_secs(),
    );
    let transition_handler: Arc<dyn StateTransitionHandler> = if notifier.is_configured() {
        info!("Discord notifications enabled");
        Arc::new(DiscordTransitionHandler::new(notifier))
    } else {
        info!("No Discord webhook configured, state transitions will only be logged");
        Arc::new(LoggingTransitionHandler)
    };

    start_state_transition_task(
        club_state_service,
        transition_handler,
        shutdown.clone(),
        app_cfg.tasks.state_transition_interval_secs,
    );
    start_item_expiry_task(
        board_games_service,
        shutdown.clone(),
        app_cfg.tasks.item_expiry_interval_secs,
    );

    // ── REST API server ────────────────────────────────────────
    let router = create_api_router(state);
    let addr = format!("{}:{}", app_cfg.server.host, app_cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    let server_shutdown = shutdown.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            server_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await?;

    // ── Cleanup ────────────────────────────────────────────────
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Gameclub service shutdown complete");
    Ok(())
}

fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

/// Make sure every known role has a row.
async fn seed_roles(db: &sea_orm::DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    use gameclub::infrastructure::database::entities::role;
    use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

    for role_name in Role::all().map(|r| r.as_str()) {
        let exists = role::Entity::find()
            .filter(role::Column::Name.eq(role_name))
            .one(db)
            .await?
            .is_some();
        if !exists {
            role::ActiveModel {
                name: Set(role_name.to_string()),
                ..Default::default()
            }
            .insert(db)
            .await?;
            info!(role = role_name, "Seeded role");
        }
    }
    Ok(())
}

/// Create the bootstrap admin account when no users exist yet.
async fn seed_default_admin(repos: &dyn RepositoryProvider, app_cfg: &AppConfig) {
    use gameclub::domain::NewUser;
    use gameclub::infrastructure::crypto::password::hash_password;

    let users_count = match repos.users().count().await {
        Ok(count) => count,
        Err(e) => {
            error!("Failed to count users: {}", e);
            return;
        }
    };
    if users_count > 0 {
        return;
    }

    info!("Creating default admin user...");
    let password_hash = match hash_password(&app_cfg.admin.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash admin password: {}", e);
            return;
        }
    };

    let admin = match repos
        .users()
        .create(NewUser {
            username: app_cfg.admin.username.clone(),
            email: app_cfg.admin.email.clone(),
            password_hash,
            nickname: None,
        })
        .await
    {
        Ok(user) => user,
        Err(e) => {
            error!("Failed to create admin user: {}", e);
            return;
        }
    };

    for role in [Role::Member, Role::Admin] {
        if let Err(e) = repos.users().assign_role(admin.id, role, None).await {
            error!("Failed to assign {} to admin: {}", role, e);
        }
    }
    info!("Default admin created: {}", app_cfg.admin.email);
    warn!("Please change the admin password immediately!");
}
