use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::store::RecordStore;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    /// Record store backend in use
    #[schema(example = "postgres")]
    pub store: String,
}

/// GET / - Welcome text
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Welcome to the Budget Tracker API!")
}

/// Health check endpoint that verifies record store connectivity
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Record store reachable", body = HealthResponse),
        (status = 503, description = "Record store unreachable", body = HealthResponse)
    )
)]
#[get("/health")]
pub async fn health_check(store: web::Data<RecordStore>) -> impl Responder {
    let backend = store.backend_name();

    match store.ping().await {
        Ok(()) => HttpResponse::Ok().json(HealthResponse {
            status: "healthy".to_string(),
            store: backend.to_string(),
        }),
        Err(err) => {
            warn!(store = backend, "Health check failed: {}", err);
            HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: "unhealthy".to_string(),
                store: backend.to_string(),
            })
        }
    }
}
