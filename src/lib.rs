use actix_cors::Cors;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, Error, HttpRequest, HttpResponse, HttpServer, Responder};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod contact;
pub mod db;
pub mod email;
pub mod pricelist;
pub mod quote;
pub mod storage;

pub use crate::db::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }
}

/// Answer malformed JSON bodies with the shared error shape instead of the
/// framework's plain-text default.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse::bad_request(&err.to_string()));
    InternalError::from_response(err, response).into()
}

pub async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "NotFound",
        "The requested resource does not exist",
    ))
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[utoipa::path(
    context_path = "/api",
    tag = "Operations",
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn run() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    #[derive(OpenApi)]
    #[openapi(
        paths(
            crate::contact::handlers::submit_contact,
            crate::pricelist::verify_pricelist,
            crate::health,
        ),
        components(
            schemas(
                contact::models::ContactFormData,
                contact::models::SubmissionOutcome,
                contact::models::FieldError,
                pricelist::GateRequest,
                pricelist::GateResponse,
                HealthResponse,
                ErrorResponse,
            )
        ),
        tags(
            (name = "Contact", description = "Contact form submission pipeline."),
            (name = "Price list", description = "Gated price-list access."),
            (name = "Operations", description = "Liveness and diagnostics.")
        )
    )]
    struct ApiDoc;

    dotenvy::dotenv().ok();
    let app_config = match crate::config::AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = match AppState::new(&app_config).await {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!(
                "Failed to connect to the database. Check SUPABASE_DATABASE_URL in .env and ensure the database is reachable. Error: {}",
                e
            );
            std::process::exit(1);
        }
    };

    let prometheus = PrometheusMetricsBuilder::new("strelka_server")
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");

    let bind = (app_config.bind_addr.clone(), app_config.bind_port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = Cors::default()
            .allowed_origin("https://www.strelka.it")
            .allowed_origin("https://strelka.it")
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .service(
                web::scope("/api")
                    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                    .service(
                        web::resource("/contact")
                            .route(web::post().to(contact::handlers::submit_contact)),
                    )
                    .service(
                        web::resource("/verify-pricelist")
                            .route(web::post().to(pricelist::verify_pricelist)),
                    )
                    .service(web::resource("/health").route(web::get().to(health))),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .default_service(web::route().to(not_found))
    })
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind(bind)?
    .run()
    .await
}
