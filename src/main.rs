use rusty_shareit::{
    adapters::clock::SystemClock,
    adapters::mock::{
        item_catalog::ItemCatalog as MockItemCatalog, seed_demo_data,
        user_directory::UserDirectory as MockUserDirectory,
    },
    adapters::postgres::{PostgresBookingRepository, PostgresCommentRepository},
    api::{handlers::AppState, router::create_router},
    application::ServiceDependencies,
    config::AppConfig,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rusty_shareit=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    tracing::info!(
        port = config.port,
        max_connections = config.max_connections,
        policy = ?config.policy,
        "configuration loaded"
    );

    // Initialize database connection pool
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    // Initialize adapters
    // Users and items are owned by other services. Until those adapters exist the
    // in-memory stand-ins start empty, so every request 404s unless SEED_DEMO_DATA is set.
    let user_directory = Arc::new(MockUserDirectory::new());
    let item_catalog = Arc::new(MockItemCatalog::new());
    if config.seed_demo_data {
        seed_demo_data(&user_directory, &item_catalog);
    }

    let service_deps = ServiceDependencies {
        booking_repository: Arc::new(PostgresBookingRepository::new(pool.clone())),
        comment_repository: Arc::new(PostgresCommentRepository::new(pool.clone())),
        user_directory,
        item_catalog,
        clock: Arc::new(SystemClock),
        policy: config.policy,
    };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    // Server configuration
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}

