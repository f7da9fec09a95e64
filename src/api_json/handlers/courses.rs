use actix_web::{web, HttpResponse};
use tracing::debug;

use crate::api_json::handlers::run_blocking;
use crate::api_json::{non_empty, CourseQuery, TermSectionsQuery};
use crate::error::AppError;
use crate::models::Term;
use crate::store::Store;

/// Unknown term strings select nothing to filter on.
fn parse_term(raw: &str) -> Option<Term> {
    match raw.parse::<Term>() {
        Ok(term) => Some(term),
        Err(e) => {
            debug!("{e}; returning unfiltered sections");
            None
        }
    }
}

/// GET /api/courses
/// `title` wins over `instructor`, which wins over `term`. Without any
/// filter every section is returned.
pub async fn list_courses_handler(
    store: web::Data<Store>,
    query: web::Query<CourseQuery>,
) -> Result<HttpResponse, AppError> {
    let store = store.get_ref().clone();
    let q = query.into_inner();

    if let Some(title) = non_empty(&q.title).map(str::to_string) {
        let rows = run_blocking(move || store.sections_by_title(&title)).await?;
        return Ok(HttpResponse::Ok().json(rows));
    }
    if let Some(instructor) = non_empty(&q.instructor).map(str::to_string) {
        let rows = run_blocking(move || store.sections_by_instructor(&instructor)).await?;
        return Ok(HttpResponse::Ok().json(rows));
    }
    let term = non_empty(&q.term).and_then(parse_term);
    let rows = run_blocking(move || store.sections_in_term(term)).await?;
    Ok(HttpResponse::Ok().json(rows))
}

/// GET /api/courses/instructors
pub async fn list_instructors_handler(store: web::Data<Store>) -> Result<HttpResponse, AppError> {
    let store = store.get_ref().clone();
    let names = run_blocking(move || store.instructors()).await?;
    Ok(HttpResponse::Ok().json(names))
}

/// GET /api/courses/titles
pub async fn list_titles_handler(store: web::Data<Store>) -> Result<HttpResponse, AppError> {
    let store = store.get_ref().clone();
    let titles = run_blocking(move || store.distinct_titles()).await?;
    Ok(HttpResponse::Ok().json(titles))
}

/// GET /api/courses/term-titles?term=
pub async fn term_titles_handler(
    store: web::Data<Store>,
    query: web::Query<TermSectionsQuery>,
) -> Result<HttpResponse, AppError> {
    let raw = non_empty(&query.term).ok_or_else(|| AppError::BadRequest("Term is required".into()))?;
    let term = parse_term(raw);
    let store = store.get_ref().clone();
    let titles = run_blocking(move || store.term_titles(term)).await?;
    Ok(HttpResponse::Ok().json(titles))
}

/// GET /api/courses/term-sections?title=&term=
pub async fn term_sections_handler(
    store: web::Data<Store>,
    query: web::Query<TermSectionsQuery>,
) -> Result<HttpResponse, AppError> {
    let (title, raw_term) = match (non_empty(&query.title), non_empty(&query.term)) {
        (Some(title), Some(term)) => (title.to_string(), term),
        _ => return Err(AppError::BadRequest("Title and term are required".into())),
    };
    let term = parse_term(raw_term);
    let store = store.get_ref().clone();
    let sections = run_blocking(move || store.term_sections(&title, term)).await?;
    Ok(HttpResponse::Ok().json(sections))
}
