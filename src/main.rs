use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use campus_match::config::{CatalogSource, Settings};
use campus_match::core::SchoolExplorer;
use campus_match::routes::{self, AppState};
use campus_match::services::{CatalogCache, CatalogError, PostgresCatalog, RemoteCatalog, SchoolCatalog};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(settings: &Settings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match settings.logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "full" => subscriber.init(),
        _ => subscriber.compact().init(),
    }
}

async fn build_catalog(settings: &Settings) -> Result<SchoolCatalog, CatalogError> {
    let catalog = &settings.catalog;

    match catalog.source {
        CatalogSource::Bundled => SchoolCatalog::bundled(),
        CatalogSource::File => {
            let path = catalog
                .path
                .as_deref()
                .ok_or_else(|| CatalogError::InvalidData("catalog.path is required for the file source".into()))?;
            SchoolCatalog::from_file(path)
        }
        CatalogSource::Remote => {
            let url = catalog
                .url
                .clone()
                .ok_or_else(|| CatalogError::InvalidData("catalog.url is required for the remote source".into()))?;
            let remote = RemoteCatalog::new(
                url,
                catalog.api_key.clone(),
                catalog.request_timeout_secs,
                settings.retry.policy(),
            )?;
            info!("Remote catalog: {}", remote.url());
            Ok(SchoolCatalog::Remote(remote))
        }
        CatalogSource::Postgres => {
            let url = catalog
                .database_url
                .as_deref()
                .ok_or_else(|| CatalogError::InvalidData("DATABASE_URL is required for the postgres source".into()))?;
            let max_conn = catalog.max_connections.unwrap_or(10);
            let pg = PostgresCatalog::new(
                url,
                max_conn,
                catalog.min_connections.unwrap_or(1),
                catalog.acquire_timeout_secs.unwrap_or(30),
            )
            .await?;
            info!("PostgreSQL catalog initialized (max: {} connections)", max_conn);
            Ok(SchoolCatalog::Postgres(pg))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings);

    info!("Starting Campus Match service...");

    let catalog = build_catalog(&settings).await.map_err(|e| {
        error!("Failed to initialize {:?} catalog: {}", settings.catalog.source, e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!("Catalog initialized (source: {})", catalog.source_name());

    let cache = Arc::new(CatalogCache::new(settings.catalog.cache_ttl_secs));

    info!("Catalog cache initialized (TTL: {}s)", cache.ttl_secs());

    let recommender = settings.recommender.build();
    info!(
        "Recommender initialized with weights: {:?} (min score {}, max {} results)",
        recommender.weights(),
        recommender.min_score(),
        recommender.max_results()
    );

    // Build application state
    let app_state = AppState {
        catalog: Arc::new(catalog),
        cache,
        explorer: SchoolExplorer::new(recommender),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
