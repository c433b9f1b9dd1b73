use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use career_match::config::{LoggingSettings, Settings};
use career_match::core::{Matcher, MatchingEngine};
use career_match::models::ScoringWeights;
use career_match::routes::{self, AppState};
use career_match::services::{load_seed_file, seed_if_empty, AdvisorClient, CatalogStore, SqliteCatalog};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// JSON error response for malformed request payloads
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

fn init_tracing(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn startup_error(context: &str, e: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, e);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, e))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    init_tracing(&logging);

    info!("Starting career match service...");

    let settings = settings.map_err(|e| startup_error("Failed to load configuration", e))?;

    info!("Configuration loaded successfully");

    // Open the catalog
    let catalog = Arc::new(
        SqliteCatalog::from_settings(
            &settings.database.url,
            settings.database.max_connections,
            settings.database.min_connections,
        )
        .await
        .map_err(|e| startup_error("Failed to open catalog", e))?,
    );

    if let Some(seed_file) = &settings.catalog.seed_file {
        match load_seed_file(seed_file).await {
            Ok(professions) => {
                seed_if_empty(catalog.as_ref(), professions)
                    .await
                    .map_err(|e| startup_error("Failed to seed catalog", e))?;
            }
            Err(e) => warn!("Could not load seed file {}: {}", seed_file, e),
        }
    }

    let store: Arc<dyn CatalogStore> = catalog;

    // Initialize matcher with configured weights
    settings
        .scoring
        .weights
        .validate()
        .map_err(|e| startup_error("Invalid scoring weights", e))?;
    let weights = ScoringWeights::from(&settings.scoring.weights);
    let engine = MatchingEngine::new(store, Matcher::new(weights));

    info!("Matcher initialized with weights: {:?}", engine.matcher().weights());

    let advisor = if settings.advisor.is_usable() {
        let client = AdvisorClient::new(
            settings.advisor.endpoint.clone(),
            settings.advisor.api_key.clone(),
            settings.advisor.model.clone(),
            settings.advisor.timeout(),
        )
        .map_err(|e| startup_error("Failed to build advisor client", e))?;

        info!(
            "Advisor enabled (model: {}, timeout: {}s)",
            settings.advisor.model, settings.advisor.timeout_secs
        );
        Some(Arc::new(client))
    } else {
        info!("Advisor disabled, advice endpoints serve fallback text");
        None
    };

    let app_state = AppState {
        engine,
        advisor,
        matching: settings.matching.clone(),
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
