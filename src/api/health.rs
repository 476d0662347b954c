use actix_web::{HttpResponse, Responder};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = Object, example = json!({
            "message": "HRMS Lite API is running"
        }))
    ),
    tag = "Health"
)]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "HRMS Lite API is running" }))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check", body = Object, example = json!({
            "status": "ok"
        }))
    ),
    tag = "Health"
)]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
