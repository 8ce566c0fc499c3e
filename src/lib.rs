use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use chrono;
use dotenvy;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod draft;
pub mod letter;
pub mod preview;
pub mod state;
pub mod store;

pub use crate::state::AppState;

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

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

/// Register the `/api` routes. Shared between the server and endpoint tests.
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/letters")
            .route(web::get().to(letter::handlers::get_all_letters))
            .route(web::post().to(letter::handlers::create_letter)),
    )
    .service(
        web::resource("/letters/{id}")
            .route(web::get().to(letter::handlers::get_letter_by_id))
            .route(web::put().to(letter::handlers::update_letter))
            .route(web::delete().to(letter::handlers::delete_letter)),
    )
    .service(
        web::resource("/letters/{id}/pdf")
            .route(web::get().to(letter::handlers::download_letter_pdf)),
    )
    .service(
        web::resource("/letters/{id}/preview")
            .route(web::get().to(preview::handlers::preview_letter)),
    )
    .service(
        web::resource("/letters/{id}/preview/html")
            .route(web::get().to(preview::handlers::preview_letter_html)),
    )
    .service(
        web::resource("/companies").route(web::get().to(letter::handlers::get_all_companies)),
    )
    .service(
        web::resource("/companies/{id}")
            .route(web::get().to(letter::handlers::get_company_by_id)),
    )
    .service(web::resource("/drafts").route(web::post().to(draft::handlers::create_draft)))
    .service(
        web::resource("/drafts/{id}")
            .route(web::get().to(draft::handlers::get_draft))
            .route(web::delete().to(draft::handlers::delete_draft)),
    )
    .service(
        web::resource("/drafts/{id}/ops")
            .route(web::post().to(draft::handlers::apply_draft_op)),
    )
    .service(
        web::resource("/drafts/{id}/signatories/{index}/signature")
            .route(web::post().to(draft::handlers::upload_draft_signature)),
    )
    .service(
        web::resource("/drafts/{id}/submit")
            .route(web::post().to(draft::handlers::submit_draft)),
    )
    .service(
        web::resource("/upload-signature")
            .route(web::post().to(draft::handlers::upload_signature)),
    );
}

pub async fn run() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    #[derive(OpenApi)]
    #[openapi(
        paths(
            crate::letter::handlers::get_all_letters,
            crate::letter::handlers::get_letter_by_id,
            crate::letter::handlers::create_letter,
            crate::letter::handlers::update_letter,
            crate::letter::handlers::delete_letter,
            crate::letter::handlers::download_letter_pdf,
            crate::letter::handlers::get_all_companies,
            crate::letter::handlers::get_company_by_id,
            crate::preview::handlers::preview_letter,
            crate::preview::handlers::preview_letter_html,
            crate::draft::handlers::create_draft,
            crate::draft::handlers::get_draft,
            crate::draft::handlers::apply_draft_op,
            crate::draft::handlers::upload_draft_signature,
            crate::draft::handlers::submit_draft,
            crate::draft::handlers::delete_draft,
            crate::draft::handlers::upload_signature
        ),
        components(
            schemas(
                letter::models::Letter,
                letter::models::LetterPayload,
                letter::models::Company,
                letter::models::Signatory,
                letter::models::Activity,
                draft::state::LetterDraft,
                draft::state::DraftInfoPatch,
                draft::state::SignatoryPatch,
                draft::state::ActivityPatch,
                draft::session::DraftSession,
                draft::session::DraftOp,
                draft::handlers::CreateDraftRequest,
                draft::handlers::SignatureUploadResponse,
                preview::renderer::LetterDocument,
                preview::renderer::DocumentSection,
                preview::renderer::SignatureColumn,
                ErrorResponse,
            )
        ),
        tags(
            (name = "Letter Service", description = "Letter CRUD and PDF download endpoints."),
            (name = "Company Service", description = "Read-only company endpoints."),
            (name = "Draft Service", description = "Letter draft form sessions and signature upload."),
            (name = "Preview Service", description = "Letter preview rendering endpoints.")
        ),
        servers(
            (url = "http://127.0.0.1:8080", description = "Localhost Staging server")
        )
    )]
    struct ApiDoc;

    dotenvy::dotenv().ok(); // Load .env file
    let store_config = match crate::store::StoreConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!(
                "Failed to load store configuration. Please check STORE_BASE_URL in .env. Error: {}",
                e
            );
            std::process::exit(1);
        }
    };
    let app_state = web::Data::new(AppState::new(store_config));

    let prometheus = PrometheusMetricsBuilder::new("surat_menyurat_gateway")
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");

    let bind_addr =
        std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    log::info!("Starting server at http://{}", bind_addr);

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = Cors::default()
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://localhost:8080")
            .allowed_origin("http://127.0.0.1:8080")
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .service(web::scope("/api").configure(api_config))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .backlog(8192)
    .max_connections(25000)
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind(bind_addr)?
    .run()
    .await
}
