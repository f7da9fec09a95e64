use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::api_json::handlers::run_blocking;
use crate::api_json::{non_empty, NewUser, UserQuery};
use crate::error::AppError;
use crate::store::Store;

/// GET /api/userData?userId=
pub async fn get_user_handler(
    store: web::Data<Store>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse, AppError> {
    let user_id = non_empty(&query.user_id)
        .ok_or_else(|| AppError::BadRequest("UserId is required".into()))?
        .to_string();
    let store = store.get_ref().clone();
    match run_blocking(move || store.get_user(&user_id)).await? {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Err(AppError::NotFound("User not found".into())),
    }
}

/// POST /api/userData
/// Creates the user and an empty mandatory-course row. An existing user is
/// a 409 carrying the stored record.
pub async fn create_user_handler(
    store: web::Data<Store>,
    body: web::Json<NewUser>,
) -> Result<HttpResponse, AppError> {
    let new_user = body.into_inner();
    if new_user.user_id.trim().is_empty() {
        return Err(AppError::BadRequest("UserId is required".into()));
    }
    let store = store.get_ref().clone();
    let lookup = store.clone();
    let user_id = new_user.user_id.clone();

    match run_blocking(move || store.create_user(&new_user.user_id, &new_user.email)).await {
        Ok(user) => Ok(HttpResponse::Created().json(user)),
        Err(AppError::Conflict(msg)) => {
            let existing = run_blocking(move || lookup.get_user(&user_id)).await?;
            Ok(HttpResponse::Conflict().json(json!({"error": msg, "data": existing})))
        }
        Err(e) => Err(e),
    }
}
