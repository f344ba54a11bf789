use clap::Parser;
use placemark::config::{self, CliArgs};
use placemark::{create_app, db, run_migrations};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load environment variables from .env if present
    dotenv::dotenv().ok();

    // Parse command line arguments before logging so --debug can widen the filter
    let args = CliArgs::parse();
    let debug = args.debug;

    // Logs go to stdout for humans and to a rolling JSON file for tooling
    let file_appender = tracing_appender::rolling::daily("logs", "placemark.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    let filter = if debug {
        tracing_subscriber::EnvFilter::new("placemark=debug,tower_http=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "placemark=info".into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::fmt::layer().json().with_writer(file_writer))
        .init();

    // Resolve the effective configuration: args > config file > defaults
    let config = config::get_config(args);
    info!(
        address = %config.server_address,
        port = %config.server_port,
        "Loaded configuration"
    );

    // Initialize the database pool
    let pool = Arc::new(db::init_pool(&config.database_url));

    // Apply any pending migrations before accepting requests
    {
        let mut conn = pool.get().expect("Failed to get connection from pool");
        run_migrations(&mut conn);
    }
    info!("Database migrations applied");

    // Build our application with routes
    let app = create_app(pool);

    // Run it
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("Listening on {}", addr);

    axum::serve(listener, app).await.expect("Server error");
}
