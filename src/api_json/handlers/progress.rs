use actix_web::{web, HttpResponse};
use serde::Serialize;
use serde_json::json;

use crate::api_json::handlers::run_blocking;
use crate::api_json::ToggleRequest;
use crate::error::AppError;
use crate::progress::{Catalog, Category, CompletionStore, CourseId, CourseState, ProgressTracker};
use crate::store::Store;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CourseStateDto {
    id: CourseId,
    display_name: &'static str,
    category: Category,
    state: CourseState,
}

fn course_states(tracker: &ProgressTracker<'_>) -> Vec<CourseStateDto> {
    tracker
        .catalog()
        .courses()
        .map(|n| CourseStateDto {
            id: n.id,
            display_name: n.display_name,
            category: n.category,
            state: tracker.state(n.id),
        })
        .collect()
}

/// GET /api/progress/{userId}
/// Completed and unlocked courses derived from the stored completion row.
pub async fn get_progress_handler(
    store: web::Data<Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let store = store.get_ref().clone();
    let row = run_blocking(move || store.load_completion(&user_id)).await?;

    let tracker = ProgressTracker::from_row(Catalog::standard(), &row);
    Ok(HttpResponse::Ok().json(json!({
        "completed": tracker.completed(),
        "unlocked": tracker.unlocked(),
        "courses": course_states(&tracker),
    })))
}

/// POST /api/progress/{userId}/toggle
/// Toggles one course and persists every flipped flag in one write. A failed
/// write is reported as `persisted: false`; the returned state still
/// reflects the toggle.
pub async fn toggle_progress_handler(
    store: web::Data<Store>,
    path: web::Path<String>,
    body: web::Json<ToggleRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let catalog = Catalog::standard();
    let course = catalog
        .lookup(body.course_id.trim())
        .ok_or_else(|| AppError::BadRequest(format!("Unknown course '{}'", body.course_id)))?;

    let store = store.get_ref().clone();
    let (outcome, persisted, completed, unlocked) = run_blocking(move || {
        let row = store.load_completion(&user_id)?;
        let mut tracker = ProgressTracker::from_row(catalog, &row);
        let (outcome, persisted) = tracker.toggle_and_persist(course, &store, &user_id);
        Ok::<_, AppError>((outcome, persisted, tracker.completed().clone(), tracker.unlocked().clone()))
    })
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "course": outcome.course,
        "action": outcome.action,
        "completed": completed,
        "unlocked": unlocked,
        "updates": outcome.updates,
        "persisted": persisted,
    })))
}
