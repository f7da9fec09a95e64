use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpResponse, HttpServer};
use tracing::info;

use crate::api_json::handlers::*;
use crate::config::Config;
use crate::error::AppError;
use crate::store::Store;

fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .supports_credentials()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Malformed JSON bodies and query strings become `{"error": ...}` 400s.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(format!("invalid JSON body: {}", err)).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(format!("invalid query: {}", err)).into())
}

/// Route table, shared by the server and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .route("/health", web::get().to(|| async { HttpResponse::Ok().json(serde_json::json!({"status": "ok"})) }))
        .service(
            web::scope("/api")
                .route("/courses", web::get().to(list_courses_handler))
                .route("/courses/instructors", web::get().to(list_instructors_handler))
                .route("/courses/titles", web::get().to(list_titles_handler))
                .route("/courses/term-titles", web::get().to(term_titles_handler))
                .route("/courses/term-sections", web::get().to(term_sections_handler))
                .route("/reviews", web::get().to(list_reviews_handler))
                .route("/reviews", web::post().to(post_review_handler))
                .route("/userData", web::get().to(get_user_handler))
                .route("/userData", web::post().to(create_user_handler))
                .route("/userMandatoryCourses/{user_id}", web::get().to(get_mandatory_handler))
                .route("/userMandatoryCourses/{user_id}", web::patch().to(patch_mandatory_handler))
                .route("/schedules", web::get().to(get_schedule_handler))
                .route("/schedules", web::post().to(save_schedule_handler))
                .route("/schedules", web::delete().to(delete_schedule_handler))
                .route("/planner/add-section", web::post().to(add_section_handler))
                .route("/progress/{user_id}", web::get().to(get_progress_handler))
                .route("/progress/{user_id}/toggle", web::post().to(toggle_progress_handler)),
        );
}

pub async fn run_server(config: Config, store: Store) -> std::io::Result<()> {
    let bind_addr = config.bind_addr();
    info!(%bind_addr, workers = config.http_workers, "starting coursemap API");
    let data = web::Data::new(store);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors())
            .app_data(data.clone())
            .configure(configure)
    })
    .workers(config.http_workers)
    .bind(bind_addr)?
    .run()
    .await
}
