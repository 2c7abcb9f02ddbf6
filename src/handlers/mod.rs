pub mod activity;
pub mod auth;
pub mod daily;
pub mod exercise;
pub mod meal;

use actix_web::HttpResponse;

// GET /health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
