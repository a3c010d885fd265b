// Route exports
pub mod schools;
pub mod tools;

use actix_web::{web, HttpResponse};
use validator::ValidationErrors;
use crate::models::ErrorResponse;

pub use schools::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(schools::configure)
            .configure(tools::configure),
    );
}

pub(crate) fn validation_error(errors: ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}
