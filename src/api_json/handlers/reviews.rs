use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::info;

use crate::api_json::handlers::run_blocking;
use crate::api_json::{non_empty, InstructorQuery, NewReview};
use crate::error::AppError;
use crate::store::Store;

/// GET /api/reviews?instructor=
pub async fn list_reviews_handler(
    store: web::Data<Store>,
    query: web::Query<InstructorQuery>,
) -> Result<HttpResponse, AppError> {
    let instructor = non_empty(&query.instructor)
        .ok_or_else(|| AppError::BadRequest("Instructor is required".into()))?
        .to_string();
    let store = store.get_ref().clone();
    let reviews = run_blocking(move || store.reviews_for(&instructor)).await?;
    Ok(HttpResponse::Ok().json(reviews))
}

/// POST /api/reviews
/// Inserts the review and updates the instructor's aggregate in one transaction.
pub async fn post_review_handler(
    store: web::Data<Store>,
    body: web::Json<NewReview>,
) -> Result<HttpResponse, AppError> {
    let review = body.into_inner();
    let store = store.get_ref().clone();
    let instructor = review.instructor.clone();
    let id = run_blocking(move || {
        store.post_review(
            &review.instructor,
            &review.user_id,
            review.rating,
            review.comment.as_deref(),
        )
    })
    .await?;
    info!(review_id = id, %instructor, "review stored");
    Ok(HttpResponse::Created().json(json!({"success": true})))
}
