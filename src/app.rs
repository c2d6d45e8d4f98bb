use std::sync::Arc;

use actix_web::{
    middleware::{DefaultHeaders, Logger},
    web, App, HttpServer,
};
use env_logger::Env;
use log::{debug, info};

use crate::{
    config::{Config, Environment, StorageBackend},
    db::Database,
    errors::AppError,
    repositories::{MemoryRepository, PostgresRepository, SharedUrlRepository},
    routes, services,
};

// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;

// Setup logging with custom format and configuration
fn setup_logging(config: &Config) -> Result<(), AppError> {
    // Configure log level based on environment and config
    let log_level = match config.app.environment {
        Environment::Development => config.app.log_level.clone(),
        Environment::Testing => "debug,actix_web=info".to_string(),
        Environment::Production => "info,actix_web=warn".to_string(),
    };

    let env = Env::default()
        .filter_or("RUST_LOG", log_level)
        .write_style_or("RUST_LOG_STYLE", "always");

    env_logger::try_init_from_env(env)
        .map_err(|e| AppError::Logger(format!("Failed to initialize logger: {}", e)))
}

pub async fn server() -> AppResult<()> {
    // Load application configuration
    let config = Config::load()?;

    // Setup enhanced logging based on configuration
    setup_logging(&config)?;

    // Log startup information
    info!("Starting {} v{}", config.app.name, config.app.version);
    info!("Environment: {:?}", config.app.environment);
    info!("Storage backend: {:?}", config.storage);
    info!(
        "Binding to {}:{} with {} workers",
        config.server.host, config.server.port, config.server.workers
    );

    if config.app.environment == Environment::Development {
        debug!("Debug logging enabled");
        debug!("Full configuration: {:?}", config);
    }

    // Build the configured storage backend. An unreachable database is
    // fatal here, before the HTTP server comes up.
    let (repository, database): (SharedUrlRepository, Option<Database>) = match config.storage {
        StorageBackend::Memory => (Arc::new(MemoryRepository::new()), None),
        StorageBackend::Postgres => {
            let db = Database::connect(&config.db).await?;
            (Arc::new(PostgresRepository::new(&db)), Some(db))
        }
    };

    // Determine if we should enable more verbose logging
    let enable_debug_logging = config.app.environment != Environment::Production;

    // Create a cloned config for the closure
    let app_config = config.clone();

    // Determine log format based on environment
    let log_format = if enable_debug_logging {
        // Detailed format for development/testing
        "%a \"%r\" %s %b %T \"%{Referer}i\" \"%{User-Agent}i\" %{X-Request-ID}i"
    } else {
        // Simple format for production
        "%a \"%r\" %s %b %T"
    };

    // Start the HTTP server
    HttpServer::new(move || {
        let repository = repository.clone();
        let base_url = app_config.server.public_base_url.clone();

        App::new()
            // Keep malformed-body rejections in the common error shape
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                debug!("Rejected request body: {}", err);
                AppError::Validation("Invalid request body".to_string()).into()
            }))
            .wrap(Logger::new(log_format))
            // Add request tracking ID
            .wrap(DefaultHeaders::new().add(("X-Request-ID", uuid::Uuid::new_v4().to_string())))
            // Register the shortener service and routes
            .configure(move |cfg| services::register(repository, base_url, cfg))
            .configure(routes::configure_routes)
    })
    .workers(config.server.workers)
    .bind((config.server.host.to_string(), config.server.port))?
    .run()
    .await?;

    // Release pooled connections once the server has stopped
    if let Some(db) = database {
        db.shutdown().await;
    }

    Ok(())
}
