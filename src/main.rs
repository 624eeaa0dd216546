// src/main.rs

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use catquiz_backend::config::Config;
use catquiz_backend::models::activation_code::{CodeKind, normalize_code};
use catquiz_backend::models::quiz::QuizBank;
use catquiz_backend::routes;
use catquiz_backend::state::AppState;
use catquiz_backend::store::CodeStore;
use dotenvy::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Initialize Database Pool
    let connect_options = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid DATABASE_URL")
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Database connected...");

    // Run Migrations Automatically
    tracing::info!("Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations applied successfully.");

    let store = CodeStore::new(pool);

    // Seed Admin Code
    if let Err(e) = seed_admin_code(&store, &config).await {
        tracing::error!("Failed to seed admin code: {:?}", e);
    }

    // Load the quiz document
    let quiz = QuizBank::load(&config.quiz_data_path)
        .unwrap_or_else(|e| panic!("Failed to load quiz data from {}: {}", config.quiz_data_path, e));
    tracing::info!(
        "Loaded quiz bank: {} questions, {} dimensions",
        quiz.questions.len(),
        quiz.dimensions.len()
    );

    // Create AppState
    let state = AppState {
        store,
        config: config.clone(),
        quiz: Arc::new(quiz),
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    // Start the server
    axum::serve(listener, app).await.unwrap();
}

/// Upserts the configured admin code so it exists and is reset to unused.
/// Safe to run on every startup.
async fn seed_admin_code(store: &CodeStore, config: &Config) -> Result<(), sqlx::Error> {
    if let Some(raw) = &config.admin_code {
        let code = normalize_code(raw);
        store.upsert(&code, CodeKind::Admin).await?;
        tracing::info!("Seeded admin activation code");
    }
    Ok(())
}
