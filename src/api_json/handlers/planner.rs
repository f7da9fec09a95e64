use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::debug;

use crate::api_json::AddSectionRequest;
use crate::error::AppError;
use crate::models::Term;
use crate::schedule::{add_section, course_cards};

/// POST /api/planner/add-section
/// Adds a section to the submitted events of a term. Cap and time conflicts
/// come back as 409 with the user-facing message.
pub async fn add_section_handler(body: web::Json<AddSectionRequest>) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let term: Term = req.term.parse().map_err(AppError::BadRequest)?;

    match add_section(term, &req.events, &req.section) {
        Ok(events) => {
            let courses = course_cards(&events);
            Ok(HttpResponse::Ok().json(json!({"events": events, "courses": courses})))
        }
        Err(e) => {
            debug!(%term, title = %req.section.course_title, "section rejected: {e}");
            Err(AppError::Conflict(e.to_string()))
        }
    }
}
