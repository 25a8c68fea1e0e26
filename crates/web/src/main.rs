use anyhow::Context;
use storage::{Database, services::reconciliation::SeasonRegistry};
use web::{AppState, build_router, config::Config, middleware::auth::ApiKeys};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting scouting API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");
    if config.tba_api_key.is_none() {
        tracing::warn!("TBA_API_KEY is not set; TBA sync and reconciliation will be unavailable");
    }

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let registry = SeasonRegistry::default();
    tracing::info!("Reconciliation seasons: {:?}", registry.supported_years());

    let state = AppState {
        db,
        api_keys: ApiKeys::from_comma_separated(&config.api_keys),
        tba: config.tba_settings(),
        registry,
    };

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    axum::serve(listener, build_router(state))
        .await
        .context("Server error")?;

    Ok(())
}
