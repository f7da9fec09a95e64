use actix_web::{web, HttpResponse};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

use crate::api_json::handlers::run_blocking;
use crate::error::AppError;
use crate::progress::CompletionStore;
use crate::store::Store;

/// GET /api/userMandatoryCourses/{userId}
/// Returns `{"userId": ..., "CSCI_111": false, ...}`.
pub async fn get_mandatory_handler(
    store: web::Data<Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let store = store.get_ref().clone();
    let lookup_id = user_id.clone();
    let flags = run_blocking(move || store.load_completion(&lookup_id)).await?;

    let mut body = Map::new();
    body.insert("userId".into(), Value::String(user_id));
    for (column, done) in flags {
        body.insert(column, Value::Bool(done));
    }
    Ok(HttpResponse::Ok().json(Value::Object(body)))
}

/// PATCH /api/userMandatoryCourses/{userId}
/// Body is a map of course column to completion flag.
pub async fn patch_mandatory_handler(
    store: web::Data<Store>,
    path: web::Path<String>,
    body: web::Json<BTreeMap<String, bool>>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let updates = body.into_inner();
    let store = store.get_ref().clone();
    run_blocking(move || store.patch_completion(&user_id, &updates)).await?;
    Ok(HttpResponse::Ok().json(json!({"success": true})))
}
