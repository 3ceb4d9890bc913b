use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kube_ec_auth::{
  adapters::http::{
    AuthRouteDependencies, RequestIdMiddleware, configure_auth_routes, health_handler,
  },
  domain::auth::services::AuthService,
  infrastructure::{
    config::Config, persistence::postgres::PostgresUserRepository,
    security::Argon2PasswordHasher,
  },
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kube_ec_auth=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting authentication service");

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!(environment = %config.environment, "Configuration loaded");

  tracing::info!("Connecting to database");
  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    anyhow::anyhow!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    )
  })?
  .context("Failed to connect to database")?;
  tracing::info!("Database connection pool created");

  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .context("Failed to run database migrations")?;
  tracing::info!("Database migrations completed");

  let user_repo = Arc::new(PostgresUserRepository::with_timeout(
    db_pool,
    config.database.query_timeout(),
  ));
  let password_hasher = Arc::new(
    Argon2PasswordHasher::new(
      config.security.argon2_memory_kib,
      config.security.argon2_iterations,
      config.security.argon2_parallelism,
    )
    .context("Invalid Argon2 parameters")?,
  );

  let auth_service = Arc::new(AuthService::new(
    user_repo,
    password_hasher,
    config.security.auth_service_config(),
  ));
  let route_deps = AuthRouteDependencies::new(auth_service);

  let bind_address = (config.server.host.clone(), config.server.port);
  tracing::info!("Listening on {}:{}", bind_address.0, bind_address.1);

  HttpServer::new(move || {
    let route_deps = route_deps.clone();
    App::new()
      .wrap(RequestIdMiddleware::new())
      .wrap(Logger::default())
      .route("/health", web::get().to(health_handler))
      .service(
        web::scope("/api/v1/auth").configure(|cfg| configure_auth_routes(cfg, route_deps)),
      )
  })
  .bind(bind_address)
  .context("Failed to bind HTTP server")?
  .run()
  .await
  .context("HTTP server failed")?;

  tracing::info!("Server stopped");
  Ok(())
}
