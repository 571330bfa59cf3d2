use actix_cors::Cors;
use actix_web::{http::header, web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info, warn};
use tracing_actix_web::TracingLogger;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use budget_tracker::config::{AllowedOrigins, AppConfig};
use budget_tracker::openapi::ApiDoc;
use budget_tracker::store::{PgStore, RecordStore};

async fn open_store(config: &AppConfig) -> std::io::Result<RecordStore> {
    let Some(database_url) = config.database_url.as_deref() else {
        warn!("DATABASE_URL not set, records are kept in memory and lost on restart");
        return Ok(RecordStore::memory());
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout)
        .connect(database_url)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {}", e);
            std::io::Error::other(e)
        })?;

    let store = PgStore::new(pool);
    store.migrate().await.map_err(|e| {
        error!("Failed to run migrations: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    Ok(RecordStore::Postgres(store))
}

fn cors_policy(origins: &AllowedOrigins) -> Cors {
    let cors = match origins {
        AllowedOrigins::Any => Cors::default().allow_any_origin(),
        AllowedOrigins::List(list) => list
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin)),
    };

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing subscriber for structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().map_err(|e| {
        error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let store = open_store(&config).await?;

    info!(
        store = store.backend_name(),
        "Starting server at http://{}:{}", config.host, config.port
    );

    let allowed_origins = config.allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            // Middleware (order matters: outer to inner)
            .wrap(TracingLogger::default())
            .wrap(cors_policy(&allowed_origins))
            .app_data(web::Data::new(store.clone()))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .configure(budget_tracker::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
