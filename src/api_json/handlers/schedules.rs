use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::info;

use crate::api_json::handlers::run_blocking;
use crate::api_json::{non_empty, SaveScheduleRequest, ScheduleQuery};
use crate::error::AppError;
use crate::store::Store;

fn user_and_term(query: &ScheduleQuery) -> Result<(String, String), AppError> {
    match (non_empty(&query.user_id), non_empty(&query.term)) {
        (Some(user_id), Some(term)) => Ok((user_id.to_string(), term.to_string())),
        _ => Err(AppError::BadRequest("UserId and term are required".into())),
    }
}

/// GET /api/schedules?userId=&term=
/// Responds with the stored row, or `null` when none exists.
pub async fn get_schedule_handler(
    store: web::Data<Store>,
    query: web::Query<ScheduleQuery>,
) -> Result<HttpResponse, AppError> {
    let (user_id, term) = user_and_term(&query)?;
    let store = store.get_ref().clone();
    let row = run_blocking(move || store.get_schedule(&user_id, &term)).await?;
    Ok(HttpResponse::Ok().json(row))
}

/// POST /api/schedules
/// Replaces the whole stored schedule for the user's term.
pub async fn save_schedule_handler(
    store: web::Data<Store>,
    body: web::Json<SaveScheduleRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let store = store.get_ref().clone();
    let saved = run_blocking(move || store.put_schedule(&req.user_id, &req.term, &req.schedule)).await?;
    info!(user_id = %saved.user_id, term = %saved.term, events = saved.schedule.len(), "schedule saved");
    Ok(HttpResponse::Created().json(saved))
}

/// DELETE /api/schedules?userId=&term=
pub async fn delete_schedule_handler(
    store: web::Data<Store>,
    query: web::Query<ScheduleQuery>,
) -> Result<HttpResponse, AppError> {
    let (user_id, term) = user_and_term(&query)?;
    let store = store.get_ref().clone();
    run_blocking(move || store.delete_schedule(&user_id, &term)).await?;
    Ok(HttpResponse::Ok().json(json!({"deleted": true})))
}
