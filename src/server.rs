use actix_multipart::Multipart;
use actix_web::{middleware, post, web, App, HttpResponse, HttpServer};
use futures_util::TryStreamExt;
use tracing::info;

use crate::archive;
use crate::batch::{self, BatchOptions, SourceUnit};
use crate::config::ServerConfig;
use crate::engine::ObfuscationOptions;
use crate::errors::AppError;
use crate::metrics::Metrics;

pub struct AppState {
    pub settings: ServerConfig,
    pub metrics: Metrics,
}

/// Accepts a multipart upload, one part per file with the relative path in
/// the part's filename. An optional `options` part (JSON, no filename)
/// overrides the default stage toggles for the whole batch.
#[post("/obfuscate-folder")]
async fn obfuscate_folder(
    mut payload: Multipart,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    state.metrics.batches_total.inc();

    let mut units: Vec<SourceUnit> = Vec::new();
    let mut options = ObfuscationOptions {
        noise_count: state.settings.noise_count,
        ..ObfuscationOptions::default()
    };

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::Upload(e.to_string()))?
    {
        let filename = field
            .content_disposition()
            .get_filename()
            .map(str::to_string);

        let mut content = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?
        {
            content.extend_from_slice(&chunk);
        }

        match filename {
            Some(path) => units.push(SourceUnit { path, content }),
            None if field.name() == "options" => {
                let raw: serde_json::Value = serde_json::from_slice(&content)
                    .map_err(|e| AppError::Upload(format!("invalid options: {}", e)))?;
                let noise_unset = raw.get("noiseCount").is_none();
                options = serde_json::from_value(raw)
                    .map_err(|e| AppError::Upload(format!("invalid options: {}", e)))?;
                // a partial override must not reset the configured count
                if noise_unset {
                    options.noise_count = state.settings.noise_count;
                }
            }
            None => continue,
        }
    }

    let batch_options = BatchOptions {
        obfuscation: options,
        shared_names: false,
        max_file_bytes: state.settings.max_file_bytes,
    };

    let submitted = units.len();
    let results = batch::run_batch(&units, &batch_options)?;
    state.metrics.files_obfuscated.inc_by(results.len() as u64);
    state
        .metrics
        .files_skipped
        .inc_by((submitted - results.len()) as u64);

    let bytes = archive::build_zip(&results)?;
    Ok(HttpResponse::Ok()
        .content_type("application/zip")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"obfuscated_scripts.zip\"",
        ))
        .body(bytes))
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "healthy" }))
}

async fn metrics(state: web::Data<AppState>) -> HttpResponse {
    match state.metrics.render() {
        Ok(text) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4; charset=utf-8")
            .body(text),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "Failed to render metrics",
            "details": e.to_string(),
        })),
    }
}

pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(middleware::Logger::default())
        .wrap(middleware::DefaultHeaders::new().add(("Access-Control-Allow-Origin", "*")))
        .app_data(state)
        .service(web::scope("/api").service(obfuscate_folder))
        .route("/health", web::get().to(health))
        .route("/metrics", web::get().to(metrics))
}

pub async fn start_server(settings: ServerConfig) -> std::io::Result<()> {
    let port = settings.port;
    let state = web::Data::new(AppState {
        settings,
        metrics: Metrics::new(),
    });
    info!("listening on 0.0.0.0:{}", port);
    HttpServer::new(move || create_app(state.clone()))
        .bind(("0.0.0.0", port))?
        .run()
        .await
}
