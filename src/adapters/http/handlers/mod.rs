pub mod auth;

use actix_web::HttpResponse;

/// Liveness probe
///
/// GET /health
pub async fn health_handler() -> HttpResponse {
  HttpResponse::Ok().body("OK")
}
