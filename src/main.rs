use dotenvy::dotenv;
use govtracker::{
    config::{database, settings},
    core::analytics::BaselineInsightGenerator,
    errors::Result,
    rpc::{self, AppState},
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();

    // 3. Load config.toml plus environment overrides
    let app_config = settings::load_app_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Connect and create any missing tables
    let db = database::create_connection(&app_config.database.url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Serve until Ctrl-C
    let state = AppState::new(
        db,
        Arc::new(BaselineInsightGenerator),
        chrono::Duration::days(app_config.dashboard.recent_alert_window_days),
    );
    rpc::serve(&app_config.bind_address(), state).await
}
