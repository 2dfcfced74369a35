//! KaziFlow API server binary.
//!
//! Resolves all process-wide configuration here, once, at startup: CLI
//! args (with env fallbacks) are the single source of truth for the bind
//! address and database location, and a missing JWT secret outside
//! development aborts before anything listens.

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use kaziflow_api::config::ApiConfig;
use kaziflow_core::auth::jwt::resolve_jwt_secret;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "kaziflow_server", about = "KaziFlow API server")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/kaziflow"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Seed the demo fixture into an empty database, then exit.
    #[arg(long, default_value_t = false)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,kaziflow_api=debug,kaziflow_core=debug".parse().unwrap()
            }),
        )
        .init();

    let args = Args::parse();

    info!(database_url = %args.database_url, port = args.port, "starting kaziflow_server");

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&args.database_url)
        .await?;

    info!("running database migrations");
    kaziflow_api::migrate(&pool).await?;

    if args.seed {
        kaziflow_core::seed::seed_demo_data(&pool).await?;
        return Ok(());
    }

    let config = ApiConfig {
        bind_addr: format!("0.0.0.0:{}", args.port),
        pg_connection_url: args.database_url,
        // Fails here — loudly — when JWT_SECRET is unset outside development.
        jwt_secret: resolve_jwt_secret()?,
        google_api_key: std::env::var("GOOGLE_API_KEY").ok().filter(|k| !k.is_empty()),
        allowed_origins: std::env::var("CORS_ALLOW_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| ApiConfig::default_allowed_origins()),
    };

    let state = kaziflow_api::AppState {
        pool,
        config: config.clone(),
        http: reqwest::Client::new(),
    };

    let app = kaziflow_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app).await?;

    Ok(())
}
